//! Dropdown settings and their JSON form.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_NO_OPTIONS_TEXT, DEFAULT_PLACEHOLDER};
use crate::visibility::DismissPolicy;

/// Behaviour and text settings of a dropdown.
///
/// Options, the controlled value and the controlled open flag are set on the
/// [`Dropdown`](crate::Dropdown) itself since they change at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownSettings {
    /// Item field holding the key; blank means items are their own key
    #[serde(default)]
    pub key_field: String,

    /// Item field holding the label
    #[serde(default)]
    pub label_field: String,

    /// Trigger text when nothing is selected
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Trigger text when there are no options
    #[serde(default = "default_no_options_text")]
    pub no_options_text: String,

    /// Open above the trigger by default
    #[serde(default)]
    pub prefer_above: bool,

    /// Move to the other side when the preferred side is too cramped
    #[serde(default = "default_true")]
    pub auto_flip: bool,

    /// Restore the popup scroll offset on re-open
    #[serde(default = "default_true")]
    pub keep_scroll_position: bool,

    /// Close when the viewport resizes
    #[serde(default = "default_true")]
    pub close_on_resize: bool,

    /// Close on Escape
    #[serde(default = "default_true")]
    pub close_on_escape: bool,

    /// Close when the page scrolls
    #[serde(default = "default_true")]
    pub close_on_scroll: bool,

    /// Fixed maximum popup height, applied before viewport fitting
    #[serde(default)]
    pub fixed_popup_height: Option<f32>,

    /// Clamp and flip the popup to keep it inside the viewport
    #[serde(default = "default_true")]
    pub fit_to_viewport: bool,

    /// Disable the trigger entirely
    #[serde(default)]
    pub disabled: bool,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_no_options_text() -> String {
    DEFAULT_NO_OPTIONS_TEXT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DropdownSettings {
    fn default() -> Self {
        Self {
            key_field: String::new(),
            label_field: String::new(),
            placeholder: default_placeholder(),
            no_options_text: default_no_options_text(),
            prefer_above: false,
            auto_flip: true,
            keep_scroll_position: true,
            close_on_resize: true,
            close_on_escape: true,
            close_on_scroll: true,
            fixed_popup_height: None,
            fit_to_viewport: true,
            disabled: false,
        }
    }
}

impl DropdownSettings {
    builder_field!(key_field, String);
    builder_field!(label_field, String);
    builder_field!(placeholder, String);
    builder_field!(no_options_text, String);
    builder_field!(prefer_above, bool);
    builder_field!(auto_flip, bool);
    builder_field!(keep_scroll_position, bool);
    builder_field!(fit_to_viewport, bool);
    builder_field!(disabled, bool);
    builder_option!(fixed_popup_height, f32);

    /// Set all three dismissal switches at once.
    pub fn dismiss_on(mut self, policy: DismissPolicy) -> Self {
        self.close_on_scroll = policy.close_on_scroll;
        self.close_on_escape = policy.close_on_escape;
        self.close_on_resize = policy.close_on_resize;
        self
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize the settings to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(height) = self.fixed_popup_height {
            if !height.is_finite() || height < 0.0 {
                return Err(ConfigError::InvalidPopupHeight(height));
            }
        }
        Ok(())
    }

    /// The dismissal switches as a policy for the controller.
    pub fn dismiss_policy(&self) -> DismissPolicy {
        DismissPolicy {
            close_on_scroll: self.close_on_scroll,
            close_on_escape: self.close_on_escape,
            close_on_resize: self.close_on_resize,
        }
    }
}

/// Errors that can occur when loading dropdown settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse dropdown settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Fixed popup height is negative or not a number
    #[error("Fixed popup height must be a non-negative number, got {0}")]
    InvalidPopupHeight(f32),
}
