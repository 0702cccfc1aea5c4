//! Configuration loader for the notify CLI
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "NOTIFY_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "NOTIFY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "NOTIFY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml`
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `NOTIFY_*` environment variables (highest priority)
///
/// Directory files are all optional so the CLI works from environment
/// variables alone. A single file set through `NOTIFY_CONFIG_FILE` or
/// [`ConfigLoader::with_config_file`] must exist.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from `NOTIFY_CONFIG_DIR`,
    /// `NOTIFY_CONFIG_FILE` and `NOTIFY_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `NOTIFY_CONFIG_DIR` and `NOTIFY_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::MutualExclusivityError(format!(
                "{} and {} cannot both be set. Use {} for layered configuration or \
                 {} for a single configuration file.",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV, CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: config_dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load only the given file (plus environment overrides)
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment read from `NOTIFY_APP_ENV`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the single configuration file is missing
    /// - parsing or deserialization fails
    /// - validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        tracing::debug!(
            environment = %self.environment,
            config_file = ?self.config_file,
            config_dir = %self.config_dir.display(),
            "configuration loaded"
        );

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // NOTIFY_CLIENT__API_KEY -> client.api_key
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let layers = [
            "default.toml".to_string(),
            format!("{}.toml", self.environment.as_str()),
            "local.toml".to_string(),
        ];

        layers.iter().try_fold(builder, |builder, name| {
            Self::add_file_source(builder, &self.config_dir.join(name), false)
        })
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let path = path.to_str().ok_or_else(|| {
            ConfigError::validation("config_path", "configuration path is not valid UTF-8")
        })?;

        Ok(builder.add_source(File::new(path, FileFormat::Toml).required(required)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching process env vars run one at a time
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const CONTROL_VARS: [&str; 6] = [
        "NOTIFY_CONFIG_DIR",
        "NOTIFY_CONFIG_FILE",
        "NOTIFY_APP_ENV",
        "NOTIFY_CLIENT__BASE_URL",
        "NOTIFY_CLIENT__API_KEY",
        "NOTIFY_LOGGER__LEVEL",
    ];

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets env vars for one test and restores the previous values on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Starts with every loader control variable cleared
        fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in CONTROL_VARS {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_loader_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_loader_mutual_exclusivity_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set("NOTIFY_CONFIG_DIR", "/custom/config");
        env.set("NOTIFY_CONFIG_FILE", "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("NOTIFY_CONFIG_DIR"));
                assert!(msg.contains("NOTIFY_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_without_any_files_uses_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);
        env.set("NOTIFY_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_layers_in_order() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();

        let temp_dir = setup_config_dir(&[
            (
                "default.toml",
                r#"
[client]
base_url = "https://api.example.com"
timeout_secs = 20

[logger]
level = "info"
"#,
            ),
            (
                "production.toml",
                r#"
[client]
base_url = "https://prod.example.com"
"#,
            ),
            (
                "local.toml",
                r#"
[logger]
level = "debug"
"#,
            ),
        ]);
        env.set("NOTIFY_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("NOTIFY_APP_ENV", "production");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(settings.client.base_url, "https://prod.example.com");
        assert_eq!(settings.client.timeout_secs, 20);
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_env_vars_override_files() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();

        let temp_dir = setup_config_dir(&[(
            "default.toml",
            r#"
[client]
base_url = "https://api.example.com"
"#,
        )]);
        env.set("NOTIFY_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("NOTIFY_CLIENT__BASE_URL", "http://localhost:6011");
        env.set("NOTIFY_CLIENT__API_KEY", "key-from-env");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.client.base_url, "http://localhost:6011");
        assert_eq!(settings.client.api_key, "key-from-env");
    }

    #[test]
    fn test_single_file_mode() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let temp_dir = setup_config_dir(&[(
            "notify.toml",
            r#"
[client]
timeout_secs = 5
"#,
        )]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("notify.toml"))
            .load()
            .expect("Should load settings");
        assert_eq!(settings.client.timeout_secs, 5);
    }

    #[test]
    fn test_single_file_missing() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let result = ConfigLoader::new()
            .unwrap()
            .with_config_file("/definitely/missing/notify.toml")
            .load();

        match result {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("notify.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();

        let temp_dir = setup_config_dir(&[(
            "default.toml",
            r#"
[client]
timeout_secs = 0
"#,
        )]);
        env.set("NOTIFY_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_with_environment_override() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Staging);
        assert_eq!(loader.environment(), AppEnvironment::Staging);
    }
}
