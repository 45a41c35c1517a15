//! JSON-file storage backend for terminal hosts.
//!
//! DESIGN
//! ======
//! The whole key-value map lives in one JSON object on disk. Every batch
//! rewrites a sibling temp file and renames it over the original, so a crash
//! mid-write leaves either the old map or the new one, never half a session.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStore, StorageError};

const FILE_NAME: &str = "session.json";
const TEMP_SUFFIX: &str = "tmp";

/// Store persisted as `session.json` under a state directory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing
    /// store file cannot be read. A file that does not parse is treated as
    /// empty.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(FILE_NAME);
        let entries = load(&path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened session file");
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&self, next: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_vec_pretty(next)?;
        let temp = self.path.with_extension(TEMP_SUFFIX);
        fs::write(&temp, raw)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    match fs::read(path) {
        Ok(raw) if raw.is_empty() => Ok(BTreeMap::new()),
        Ok(raw) => match serde_json::from_slice(&raw) {
            Ok(entries) => Ok(entries),
            Err(error) => {
                // Replaced wholesale by the next commit.
                tracing::warn!(%error, path = %path.display(), "session file unreadable; starting empty");
                Ok(BTreeMap::new())
            }
        },
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(error) => Err(error.into()),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_many(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        let mut next = entries.clone();
        for (key, value) in items {
            next.insert((*key).to_owned(), (*value).to_owned());
        }
        self.commit(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        if !keys.iter().any(|key| entries.contains_key(*key)) {
            return Ok(());
        }
        let mut next = entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.commit(&next)?;
        *entries = next;
        Ok(())
    }
}
