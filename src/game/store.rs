//! Persistence channel for the day state
//!
//! The store keeps a single blob and replaces it whole on every write. Reads
//! fail open: anything that cannot be decoded is reported as
//! [`Loaded::Corrupt`] so the game starts fresh instead of erroring.
//!
//! Two processes sharing one state file are not coordinated; the last write
//! wins.

use super::state::GameDayState;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access game state at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode game state")]
    Encode(#[from] serde_json::Error),
}

/// Where the blob lives
pub trait Persistence {
    /// Read the raw blob; `Ok(None)` when nothing has been saved yet
    ///
    /// # Errors
    ///
    /// Returns an error if the storage exists but cannot be read.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the blob in one step
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn save(&mut self, blob: &str) -> Result<(), StoreError>;
}

/// JSON file on disk, replaced via write-to-temp then rename
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persistence for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&mut self, blob: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, blob).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

/// In-process store for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing blob, valid or not
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            writes: 0,
        }
    }

    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of saves so far
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Persistence for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), StoreError> {
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Outcome of reading the store
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Missing,
    Corrupt,
    Found(GameDayState),
}

/// Typed access to a [`Persistence`] channel
#[derive(Debug, Clone)]
pub struct GameStore<P: Persistence> {
    channel: P,
}

impl<P: Persistence> GameStore<P> {
    pub const fn new(channel: P) -> Self {
        Self { channel }
    }

    pub const fn channel(&self) -> &P {
        &self.channel
    }

    pub fn into_inner(self) -> P {
        self.channel
    }

    /// Read and decode the saved state, never failing
    pub fn read(&self) -> Loaded {
        match self.channel.load() {
            Ok(None) => Loaded::Missing,
            Ok(Some(blob)) => GameDayState::decode(&blob).map_or_else(
                || {
                    warn!(len = blob.len(), "saved game state failed validation");
                    Loaded::Corrupt
                },
                Loaded::Found,
            ),
            Err(e) => {
                warn!(error = %e, "could not read saved game state");
                Loaded::Corrupt
            }
        }
    }

    /// Replace the saved state with `state`
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the underlying write fails. The game
    /// can keep going; the caller decides how loudly to report it.
    pub fn write(&mut self, state: &GameDayState) -> Result<(), StoreError> {
        let blob = state.encode()?;
        self.channel.save(&blob)?;
        debug!(date = %state.date, guesses = state.guesses.len(), "game state written");
        Ok(())
    }
}
