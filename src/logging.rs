//! Logging System
//!
//! Structured logging built on the `tracing` crate: configurable level,
//! output format, and destination. Host console output is handled separately
//! by [`crate::host::HostConsoleBridge`], which marshals UI-bound lines onto
//! the host main thread.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const VALID_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file")
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Enable colored output (text format, stdout only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stdout".to_string()
}

fn default_log_file() -> PathBuf {
    directories::ProjectDirs::from("com", "stagelink", "stagelink")
        .map(|dirs| dirs.data_dir().join("stagelink.log"))
        .unwrap_or_else(|| PathBuf::from("stagelink.log"))
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !VALID_LEVELS.contains(&self.level.as_str()) {
            return Err(format!("unknown log level: {}", self.level));
        }
        if !["text", "json"].contains(&self.format.as_str()) {
            return Err(format!("unknown log format: {}", self.format));
        }
        if !["stdout", "file"].contains(&self.output.as_str()) {
            return Err(format!("unknown log output: {}", self.output));
        }
        Ok(())
    }
}

/// The folder log files are written to, for the "Open Log Folder" command.
pub fn log_folder(config: &LoggingConfig) -> PathBuf {
    config
        .file
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Initialize the logging system.
///
/// Priority order (highest to lowest):
/// 1. `STAGELINK_LOG` environment variable
/// 2. Configuration file
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), String> {
    let level = config.map(|c| c.level.clone()).unwrap_or_else(default_log_level);
    let filter = EnvFilter::try_from_env("STAGELINK_LOG")
        .or_else(|_| EnvFilter::try_new(&level))
        .map_err(|e| format!("invalid log filter: {e}"))?;

    let format = config.map(|c| c.format.clone()).unwrap_or_else(default_format);
    let to_file = config.map(|c| c.output == "file").unwrap_or(false);
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);

    let open_log_file = || -> Result<std::fs::File, String> {
        let log_file = config
            .map(|c| c.file.clone())
            .unwrap_or_else(default_log_file);
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create log directory: {e}"))?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| format!("failed to open log file {log_file:?}: {e}"))
    };

    if format == "json" {
        if to_file {
            let writer = open_log_file()?;
            base_subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(writer),
                )
                .init();
        } else {
            base_subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    } else if to_file {
        let writer = open_log_file()?;
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(std::io::stdout),
            )
            .init();
    }

    Ok(())
}
