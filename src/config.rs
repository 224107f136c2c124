//! Engine configuration.
//!
//! Settings the pipeline platform exposes per engine instance, with TOML
//! file loading, environment variable overrides, and defaults.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Engine-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Re-derive the context on scene events. When off, the engine stays on
    /// its bootstrap context for its whole lifetime.
    #[serde(default = "default_true")]
    pub automatic_context_switch: bool,

    /// Suppress the untested-host-version dialog for host major versions
    /// below this value. The warning is still logged.
    #[serde(default)]
    pub compatibility_dialog_min_version: u32,

    /// Use the alternate menu title in case the default collides with
    /// another plugin.
    #[serde(default)]
    pub use_alternate_menu_name: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            automatic_context_switch: default_true(),
            compatibility_dialog_min_version: 0,
            use_alternate_menu_name: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineSettings {
    /// Loads settings from a TOML file and applies environment overrides.
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let mut settings: EngineSettings = toml::from_str(&contents)?;
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Environment variables take precedence over file values:
    /// `STAGELINK_AUTOMATIC_CONTEXT_SWITCH`, `STAGELINK_USE_ALTERNATE_MENU_NAME`,
    /// `STAGELINK_COMPATIBILITY_DIALOG_MIN_VERSION`.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = env_bool("STAGELINK_AUTOMATIC_CONTEXT_SWITCH") {
            self.automatic_context_switch = value;
        }
        if let Some(value) = env_bool("STAGELINK_USE_ALTERNATE_MENU_NAME") {
            self.use_alternate_menu_name = value;
        }
        if let Ok(raw) = std::env::var("STAGELINK_COMPATIBILITY_DIALOG_MIN_VERSION") {
            if let Ok(value) = raw.parse() {
                self.compatibility_dialog_min_version = value;
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.logging.validate().map_err(SettingsError::Invalid)
    }
}

fn env_bool(name: &str) -> Option<bool> {
    match std::env::var(name).ok()?.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
