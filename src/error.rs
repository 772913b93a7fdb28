//! Top-level showcase errors.

use crate::config::ConfigError;

/// Errors that end a showcase run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The scenario could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A step referenced something the scenario doesn't have
    #[error("Step {index} is invalid: {reason}")]
    InvalidStep { index: usize, reason: String },
}
