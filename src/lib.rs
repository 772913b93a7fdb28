//! droplist - Headless showcase for the droplist_ui dropdown
//!
//! Loads a scenario file and plays it against a dropdown through a scripted
//! host, logging every notification along the way.

mod app;
mod config;
mod error;
mod host;
mod message;

pub use app::{describe, ShowcaseApp};
pub use config::{ConfigError, LayoutConfig, LogLevel, ShowcaseConfig, Step, CONFIG_VERSION};
pub use error::AppError;
pub use host::ScriptedHost;
pub use message::Message;
