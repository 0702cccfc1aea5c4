//! Configuration settings structures for the notify CLI
//!
//! These structures are deserialized from TOML files and `NOTIFY_*`
//! environment variables by [`ConfigLoader`](super::ConfigLoader).

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::client::ClientOptions;
use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_base_url() -> String {
    ClientOptions::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    ClientOptions::DEFAULT_TIMEOUT.as_secs()
}

fn default_connect_timeout_secs() -> u64 {
    ClientOptions::DEFAULT_CONNECT_TIMEOUT.as_secs()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/notify.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Root
// ============================================================================

/// All settings consumed by the `notify` binary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        Validate::validate(&self.client)
            .map_err(|e| ConfigError::validation("client", e.to_string()))?;

        self.logger.clone().into_logger_config()?;
        Ok(())
    }
}

// ============================================================================
// Client Configuration
// ============================================================================

/// Connection settings for the notification service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    /// Service base URL
    #[serde(default = "default_base_url")]
    #[validate(url(message = "base_url must be an absolute URL"))]
    pub base_url: String,

    /// Combined API key; checked when the client is built
    #[serde(default)]
    pub api_key: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 600, message = "timeout_secs must be between 1 and 600"))]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    #[validate(range(
        min = 1,
        max = 120,
        message = "connect_timeout_secs must be between 1 and 120"
    ))]
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    /// Client options derived from this configuration
    pub fn to_options(&self) -> ClientOptions {
        ClientOptions::new(self.base_url.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// File representation of [`LoggerConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or `EnvFilter` directive, e.g. "info" or "notify_rs=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Converts to the runtime logger configuration, validating it
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .file
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = FileConfig {
            enabled: self.file.enabled,
            path: PathBuf::from(self.file.path),
            append: self.file.append,
            format,
        };

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}
