//! CLI module for the `notify` binary
//!
//! - Argument parsing with clap
//! - Configuration loading with CLI overrides
//! - Command execution against the notification service

pub mod executor;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands, PersonalisationArgs};

use anyhow::Context;

use crate::client::NotificationClient;
use crate::config::{ConfigLoader, Settings};
use crate::logger::init_logger;

/// Load configuration and apply CLI overrides
///
/// Precedence, lowest first: configuration files, `NOTIFY_*` environment
/// variables, then command-line flags.
///
/// # Errors
/// Returns error if configuration loading or validation fails
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut loader = ConfigLoader::new()?;
    if let Some(env) = cli.env {
        loader = loader.with_environment(env);
    }
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path);
    }

    let mut settings = loader.load().context("Configuration error")?;
    apply_overrides(cli, &mut settings);
    settings.validate().context("Configuration error")?;

    Ok(settings)
}

fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(base_url) = &cli.base_url {
        settings.client.base_url = base_url.clone();
    }
    if let Some(api_key) = &cli.api_key {
        settings.client.api_key = api_key.clone();
    }
    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }
}

/// Initialize logger from settings
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;

    init_logger(logger_config).context("Logger initialization error")
}

/// Build the client described by `settings`
pub fn build_client(settings: &Settings) -> anyhow::Result<NotificationClient> {
    if settings.client.api_key.is_empty() {
        anyhow::bail!(
            "No API key configured: pass --api-key, set NOTIFY_API_KEY or set client.api_key"
        );
    }

    Ok(NotificationClient::with_options(
        settings.client.to_options(),
        &settings.client.api_key,
    )?)
}

/// Run the parsed command line to completion
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;
    init_logger_from_settings(&settings)?;

    let client = build_client(&settings)?;
    execute_command(&cli.command, &client, &mut std::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const API_KEY: &str =
        "unit_test-26785a09-ab16-4eb0-8407-a37497a57506-3d844edf-8d35-48ac-975b-e847b4f122b0";

    #[test]
    fn test_cli_overrides_take_precedence() {
        let cli = Cli::try_parse_from([
            "notify",
            "--quiet",
            "--base-url",
            "http://localhost:6011",
            "--api-key",
            API_KEY,
            "list-templates",
        ])
        .unwrap();

        let mut settings = Settings::default();
        apply_overrides(&cli, &mut settings);

        assert_eq!(settings.client.base_url, "http://localhost:6011");
        assert_eq!(settings.client.api_key, API_KEY);
        assert_eq!(settings.logger.level, "error");
    }

    #[test]
    fn test_build_client_requires_key() {
        let err = build_client(&Settings::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn test_build_client_from_settings() {
        let mut settings = Settings::default();
        settings.client.base_url = "http://localhost:6011".to_string();
        settings.client.api_key = API_KEY.to_string();

        let client = build_client(&settings).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:6011/");
    }
}
