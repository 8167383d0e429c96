//! Key-value storage abstraction for persisted cart state.
//!
//! The cart treats storage as an injected capability rather than an
//! ambient global, so tests can substitute [`MemoryStore`] for the
//! file-backed store the CLI uses. Values are strings; structured data is
//! JSON-encoded by the caller.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Errors from the storage layer.
///
/// Storage failure is recoverable: callers surface it and leave the cart
/// unmutated rather than crash. Malformed *values* are not a storage
/// error - interpreting them is the caller's concern.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store's own on-disk image could not be parsed.
    #[error("storage corrupted: {0}")]
    Corrupted(String),
}

/// A string key-value store, the persistence boundary for all cart state.
///
/// Object-safe so it can be injected as `dyn KeyValueStore` where needed.
pub trait KeyValueStore {
    /// Read a value, `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key; deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// File-backed store: one JSON object per state file.
///
/// This is the CLI's durability layer. A missing file reads as an empty
/// store; every write persists the whole map. Concurrent writers on the
/// same file are last-write-wins, which matches the single-user scope of
/// the cart.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is not created until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(StorageError::Unavailable(e.to_string())),
        };
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupted(e.to_string()))
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
