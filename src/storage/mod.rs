//! Key-value persistence port for client session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store and the API access layer both read and clear the same two
//! entries (`token`, `user`). They share one `Arc<dyn KeyValueStore>` so that
//! either path sees the other's writes.
//!
//! DESIGN
//! ======
//! Batch operations exist so callers can write or clear related entries as a
//! unit. Backends that can make a batch atomic (the file backend) do so.


pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key of the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON-serialized user record.
pub const USER_KEY: &str = "user";
/// Both session entries, in the order they are written.
pub const SESSION_KEYS: [&str; 2] = [TOKEN_KEY, USER_KEY];

/// Errors produced by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Entries could not be encoded for the backing file.
    #[error("storage contents could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    /// A previous writer panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string key-value store in the shape of browser `localStorage`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry in `entries` as one unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written; no entry is applied.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove every key in `keys` as one unit. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written; no key is removed.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError>;

    /// Write a single entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_many(&[(key, value)])
    }

    /// Remove a single entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_many(&[key])
    }
}
