//! Scenario file support for the showcase.
//!
//! A scenario bundles the dropdown settings, the option list, the layout the
//! scripted host reports and the steps to play back. Scenarios are plain JSON
//! so they can be edited by hand.

use droplist_ui::{DropdownSettings, Key};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Log level setting for the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current scenario file format version.
/// Increment this when making breaking changes to the format.
pub const CONFIG_VERSION: u32 = 1;

/// Geometry the scripted host reports when the dropdown measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,

    /// Trigger position and size
    #[serde(default)]
    pub anchor_left: f32,
    #[serde(default = "default_anchor_top")]
    pub anchor_top: f32,
    #[serde(default = "default_anchor_width")]
    pub anchor_width: f32,
    #[serde(default = "default_anchor_height")]
    pub anchor_height: f32,

    /// Height of one popup row; the popup's natural height is rows times this
    #[serde(default = "default_row_height")]
    pub row_height: f32,
}

fn default_viewport_width() -> f32 {
    1024.0
}

fn default_viewport_height() -> f32 {
    768.0
}

fn default_anchor_top() -> f32 {
    80.0
}

fn default_anchor_width() -> f32 {
    240.0
}

fn default_anchor_height() -> f32 {
    32.0
}

fn default_row_height() -> f32 {
    28.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            anchor_left: 0.0,
            anchor_top: default_anchor_top(),
            anchor_width: default_anchor_width(),
            anchor_height: default_anchor_height(),
            row_height: default_row_height(),
        }
    }
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    /// Left click on the trigger
    Click,
    /// Click on a popup row
    SelectRow { row: usize },
    /// Touch ending on a popup row
    TouchRow { row: usize },
    /// Pointer press anywhere in the window; it only reaches the dropdown when
    /// it misses the trigger and the popup
    Press { x: f32, y: f32 },
    /// Page scroll
    Scroll,
    /// Scroll inside the popup list
    ScrollPopup { offset: f32 },
    /// Viewport resize; the scripted layout takes the new size
    Resize { width: f32, height: f32 },
    /// Escape key
    Escape,
    /// Focus moves elsewhere
    Blur,
    /// Move the trigger (e.g. after the page re-flowed)
    MoveAnchor { top: f32 },
    /// New controlled value from the application
    SetValue { value: Option<Key> },
    /// New controlled open flag from the application
    SetOpen { open: bool },
    /// Replace the option list
    SetOptions { options: Value },
}

/// A complete showcase scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseConfig {
    /// Version of the scenario file format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Dropdown behaviour and texts
    #[serde(default)]
    pub settings: DropdownSettings,

    /// Option list, in the grouped JSON shape `options_from_json` accepts
    #[serde(default = "default_options")]
    pub options: Value,

    /// Initial controlled value
    #[serde(default)]
    pub value: Option<Key>,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default = "default_steps")]
    pub steps: Vec<Step>,
}

fn default_options() -> Value {
    json!([
        { "isGroup": true, "groupName": "Fruit", "items": [
            { "id": 1, "name": "Apple" },
            { "id": 2, "name": "Banana" },
            { "id": 3, "name": "Cherry", "disabled": true }
        ]},
        { "isGroup": true, "groupName": "Vegetables", "className": "veg", "items": [
            { "id": 4, "name": "Carrot" },
            { "id": 5, "name": "Leek" }
        ]},
        { "id": 6, "name": "Other" }
    ])
}

fn default_steps() -> Vec<Step> {
    vec![
        Step::Click,
        Step::ScrollPopup { offset: 40.0 },
        Step::SelectRow { row: 2 },
        Step::Click,
        Step::Escape,
        Step::MoveAnchor { top: 700.0 },
        Step::Click,
        Step::Press { x: 900.0, y: 20.0 },
    ]
}

impl ShowcaseConfig {
    /// Create a scenario with the built-in demo content.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            settings: DropdownSettings::default()
                .key_field("id".to_string())
                .label_field("name".to_string()),
            options: default_options(),
            value: None,
            layout: LayoutConfig::default(),
            steps: default_steps(),
        }
    }

    /// Serialize the scenario to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        config.settings.validate()?;

        Ok(config)
    }

    /// Get the default filename for scenario files.
    pub fn default_filename() -> &'static str {
        "droplist-config.json"
    }

    /// Get the default scenario path for auto-load.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("droplist").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("droplist")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load a scenario from `path`.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded scenario from {:?}", path);
        Ok(config)
    }

    /// Try to load a scenario from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No scenario file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load scenario file {:?}: {}", path, e);
                None
            }
        }
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Scenario version is newer than supported
    #[error("Scenario file version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Dropdown settings failed validation
    #[error("Invalid dropdown settings: {0}")]
    Settings(#[from] droplist_ui::ConfigError),

    /// I/O error when reading the scenario
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
