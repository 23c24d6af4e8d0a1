//! In-memory credential storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::{CredentialStorage, StorageError, StorageResult};

/// Credential storage backed by a `HashMap`.
///
/// Nothing survives the process. Useful for tests and for clients that must
/// not leave a token on disk. Writes and removals can be made to fail with
/// [`set_failing`](Self::set_failing) to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryCredentialStorage {
    entries: RwLock<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryCredentialStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `value` under `key`.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    /// When `true`, every subsequent write or removal fails.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::io(
                "memory storage",
                std::io::Error::other("storage is read-only"),
            ));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Lock("mutex poisoned".to_string())
}

impl CredentialStorage for MemoryCredentialStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failing_store_keeps_previous_value() {
        let store = MemoryCredentialStorage::with_entry("ACCESS_TOKEN", "old");
        store.set_failing(true);

        assert!(store.write("ACCESS_TOKEN", "new").is_err());
        assert!(store.remove("ACCESS_TOKEN").is_err());
        assert_eq!(store.read("ACCESS_TOKEN").unwrap().as_deref(), Some("old"));

        store.set_failing(false);
        store.remove("ACCESS_TOKEN").unwrap();
        assert!(store.is_empty());
    }
}
