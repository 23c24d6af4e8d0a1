//! Platform interface for durable credential storage.

use super::error::StorageResult;

/// Small key/value store for client secrets.
///
/// The session store keeps exactly one entry here (see
/// [`CREDENTIAL_KEY`](super::CREDENTIAL_KEY)), read once at startup and
/// rewritten on every credential change.
///
/// # Implementation Notes
///
/// Writes MUST be atomic: a reader sees either the complete old value or the
/// complete new value, never a partial one. File-backed implementations use
/// the write-to-temp-then-rename pattern.
pub trait CredentialStorage: Send + Sync {
    /// Reads the entry stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the entry exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails (e.g. I/O error, permission denied).
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Atomically writes `value` under `key`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the entry under `key`.
    ///
    /// # Errors
    ///
    /// Returns `Ok(())` even if the entry doesn't exist.
    /// Only returns an error for actual I/O failures.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Checks if an entry exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read operation fails.
    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}
