//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for a game engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding save slots.
    #[serde(default = "default_save_dir")]
    save_dir: PathBuf,

    /// File extension appended to slot names.
    #[serde(default = "default_save_extension")]
    save_extension: String,
}

#[instrument]
fn default_save_dir() -> PathBuf {
    PathBuf::from(".")
}

#[instrument]
fn default_save_extension() -> String {
    "txt".to_string()
}

impl EngineConfig {
    /// Creates a configuration with explicit values.
    #[instrument(skip(save_dir, save_extension))]
    pub fn new(save_dir: impl Into<PathBuf>, save_extension: impl Into<String>) -> Self {
        Self {
            save_dir: save_dir.into(),
            save_extension: save_extension.into(),
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(save_dir = %config.save_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(default_save_dir(), default_save_extension())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
