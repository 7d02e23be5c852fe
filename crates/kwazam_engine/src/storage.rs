//! Save slots on disk.

use crate::codec::{self, CodecError};
use crate::config::EngineConfig;
use crate::state::GameState;
use derive_more::{Display, Error};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct StorageError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<CodecError> for StorageError {
    #[track_caller]
    fn from(err: CodecError) -> Self {
        Self::new(format!("Malformed save: {}", err))
    }
}

/// Maps save-slot names to files in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStore {
    dir: PathBuf,
    extension: String,
}

impl SaveStore {
    /// Creates a store rooted at `dir` using the given file extension.
    #[instrument(skip(dir, extension))]
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Creates a store from the engine configuration.
    #[instrument(skip(config))]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.save_dir().clone(), config.save_extension().clone())
    }

    /// Returns the directory holding the slots.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path for a slot.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let mut path = self.dir.join(name);
        if !self.extension.is_empty() {
            path.set_extension(&self.extension);
        }
        path
    }

    /// Writes the state to a slot, returning the file written.
    #[instrument(skip(self, state))]
    pub fn write(&self, name: &str, state: &GameState) -> Result<PathBuf, StorageError> {
        if name.trim().is_empty() {
            return Err(StorageError::new("Save slot name is empty"));
        }
        let path = self.path_for(name);
        debug!(path = %path.display(), "Writing save");
        std::fs::write(&path, codec::serialize(state))?;
        info!(path = %path.display(), "Game saved");
        Ok(path)
    }

    /// Reads and decodes a slot into a fresh state.
    #[instrument(skip(self))]
    pub fn read(&self, name: &str) -> Result<GameState, StorageError> {
        let path = self.path_for(name);
        debug!(path = %path.display(), "Reading save");
        let text = std::fs::read_to_string(&path)?;
        let state = codec::deserialize(&text)?;
        info!(path = %path.display(), pieces = state.pieces().len(), "Game loaded");
        Ok(state)
    }
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
