//! Key/value persistence for the only durable state, the history list.
//!
//! [`Storage`] mirrors a browser's local storage: string values under fixed
//! string keys. [`FileStorage`] keeps one `<key>.json` file per key in a
//! directory; [`MemoryStorage`] is the in-process variant used by tests and
//! short-lived sessions.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::GradientError;

/// String key/value store.
pub trait Storage {
    /// Returns the value under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>, GradientError>;

    /// Replaces the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), GradientError>;
}

/// Directory-backed storage, one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, GradientError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GradientError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, value)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote storage key");
        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, GradientError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GradientError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
