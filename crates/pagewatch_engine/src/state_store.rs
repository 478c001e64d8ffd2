use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("state file {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Durable URL-to-fingerprint mapping, stored as one pretty-printed JSON
/// object and rewritten whole every run.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the previous run's mapping.
    ///
    /// A missing file is an empty map (first run). An unparsable file is an
    /// error the caller must not paper over: restarting from empty state
    /// would silently re-baseline every monitored page.
    pub fn load(&self) -> Result<BTreeMap<String, String>, StateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(StateError::Io(err)),
        };
        serde_json::from_str(&content).map_err(|source| StateError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the whole state file via a temp file in the same directory
    /// followed by a rename, so a crash mid-write can never leave a
    /// half-written mapping behind.
    pub fn save(&self, map: &BTreeMap<String, String>) -> Result<(), StateError> {
        let content = serde_json::to_string_pretty(map).map_err(StateError::Serialize)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Remove any existing file so the rename succeeds on every platform.
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        tmp.persist(&self.path).map_err(|err| StateError::Io(err.error))?;
        Ok(())
    }
}
