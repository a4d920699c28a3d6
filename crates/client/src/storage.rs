//! Injected persistence for session state.
//!
//! The session manager never touches the filesystem directly; it talks to a
//! [`StoragePort`]. `FileStorage` backs the real app and `MemoryStorage`
//! backs tests, where a cloned handle simulates an app restart over the same
//! stored bytes.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Persistence port for session state.
///
/// Implementations hold a single opaque string payload, the shape of one
/// browser `localStorage` slot.
pub trait StoragePort {
    /// Load the stored payload, `None` if nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Store a payload, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn store(&self, payload: &str) -> Result<(), StorageError>;

    /// Remove the stored payload. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory storage with a shared handle.
///
/// Clones share the same slot, so a test can build a second session manager
/// over a clone of the handle and observe what a restarted app would see.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a valid Option<String>.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot().clone())
    }

    fn store(&self, payload: &str) -> Result<(), StorageError> {
        *self.slot() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}

// =============================================================================
// FileStorage
// =============================================================================

/// File-backed storage, one payload per file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by the given file. Nothing is read or created until
    /// the port is used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StoragePort for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nexus-client-{}-{name}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        storage.store("payload").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("payload"));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_memory_storage_clones_share_the_slot() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.store("shared").unwrap();
        assert_eq!(handle.load().unwrap().as_deref(), Some("shared"));

        handle.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let path = temp_file("round-trip");
        let storage = FileStorage::new(&path);

        assert_eq!(storage.load().unwrap(), None);

        storage.store("payload").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("payload"));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_clear_is_idempotent() {
        let storage = FileStorage::new(temp_file("clear"));
        storage.clear().unwrap();
        storage.clear().unwrap();
    }
}
