//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Emulator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Subscriber directory configuration
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Communication log configuration
    #[serde(default)]
    pub logbook: LogBookConfig,

    /// Diagnostic logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// JSON file of `"imsi": "ki"` pairs; the built-in sample set when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogBookConfig {
    /// Directory holding communication_log.txt and sms_log.txt
    #[serde(default = "default_logbook_dir")]
    pub dir: PathBuf,

    /// Write log files (if false, logs are kept in memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogBookConfig {
    fn default() -> Self {
        Self {
            dir: default_logbook_dir(),
            persist: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_logbook_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from `SIM_*` environment variables.
    ///
    /// Nested keys use `__`, e.g. `SIM_LOGBOOK__DIR=/tmp/sim`.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_builder(
            config::Config::builder().add_source(
                config::Environment::with_prefix("SIM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
