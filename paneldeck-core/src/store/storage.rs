//! Durable storage backends for the layout snapshot
//!
//! A backend is a small key-value slot store. The layout store writes one
//! key after every committed change and reads it once at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// A key-value slot store for serialized snapshots.
pub trait LayoutStorage {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes the value stored under `key`. Deleting a missing key is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a backend rooted at `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing a key.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LayoutStorage for FileStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory backend for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.into(), value.into());
        storage
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl LayoutStorage for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
