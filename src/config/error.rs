//! Configuration error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file that must exist was not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// The merged sources could not be deserialized into [`Settings`](super::Settings)
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A loaded value failed validation
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// A control environment variable holds an unusable value
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// `NOTIFY_CONFIG_DIR` and `NOTIFY_CONFIG_FILE` were both set
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        ConfigError::FileNotFound(path.into())
    }
}
