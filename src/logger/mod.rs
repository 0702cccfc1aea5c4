//! Logging for the `notify` binary
//!
//! Built on `tracing-subscriber` with:
//! - Console output on stderr with color control, so stdout stays machine-readable
//! - Optional file output in Full, Compact or JSON format
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the application.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;
use tracing_subscriber::{
    Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;
    let filter = config.filter()?;

    // File layer goes first so ANSI escapes from the console layer do not
    // leak into formatted span fields in the file.
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::Init {
            message: e.to_string(),
        })?;

    Ok(())
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stderr().is_terminal();

    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = writer::open_log_file(config)?;
    let layer = fmt::layer().with_ansi(false).with_writer(writer);

    Ok(match config.format {
        LogFormat::Full => layer.with_target(true).boxed(),
        LogFormat::Compact => layer.with_target(true).compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_file_layer_each_format() {
        let temp_dir = TempDir::new().unwrap();

        for (name, format) in [
            ("full.log", LogFormat::Full),
            ("compact.log", LogFormat::Compact),
            ("json.log", LogFormat::Json),
        ] {
            let path = temp_dir.path().join(name);
            let config = FileConfig {
                enabled: true,
                path: path.clone(),
                append: true,
                format,
            };
            assert!(file_layer(&config).is_ok());
            assert!(path.exists());
        }
    }

    #[test]
    fn test_json_file_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notify.log");
        let config = FileConfig {
            enabled: true,
            path: path.clone(),
            append: false,
            format: LogFormat::Json,
        };

        let subscriber = tracing_subscriber::registry().with(file_layer(&config).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(operation = "send_sms", "response received");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let line: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(line["fields"]["operation"], "send_sms");
        assert_eq!(line["fields"]["message"], "response received");
        assert!(!content.contains('\u{1b}'), "file output must not contain ANSI codes");
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            file: FileConfig {
                enabled: false,
                path: PathBuf::from("unused.log"),
                ..FileConfig::default()
            },
            level: "info".to_string(),
        };
        assert!(init_logger(config).is_err());
    }
}
