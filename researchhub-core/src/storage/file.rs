//! File system backed credential storage.
//!
//! Each entry is one file under the `ResearchHub` storage directory. Writes
//! follow the write-to-temp-then-rename sequence:
//!
//! 1. Write the value to a scratch file in the same directory
//! 2. `fsync` the scratch file
//! 3. Atomically rename it over the entry
//! 4. `fsync` the directory (unix only)

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use super::{CredentialStorage, StorageError, StoragePaths, StorageResult};

/// Credential storage keeping one file per entry.
///
/// # Example
///
/// ```no_run
/// use researchhub_core::storage::{CredentialStorage, FileCredentialStorage, StoragePaths};
///
/// let storage = FileCredentialStorage::new(StoragePaths::new("/tmp/client"))?;
/// storage.write("ACCESS_TOKEN", "abc")?;
/// assert_eq!(storage.read("ACCESS_TOKEN")?, Some("abc".to_string()));
/// # Ok::<(), researchhub_core::storage::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStorage {
    paths: StoragePaths,
}

impl FileCredentialStorage {
    /// Creates the storage, making sure the storage directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(paths: StoragePaths) -> StorageResult<Self> {
        fs::create_dir_all(paths.app_dir()).map_err(|e| {
            StorageError::io(
                format!("create storage directory '{}'", paths.app_dir().display()),
                e,
            )
        })?;
        Ok(Self { paths })
    }

    /// Returns the paths this storage writes to.
    #[must_use]
    pub const fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    fn entry_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.paths.entry_path(key))
    }

    fn open_scratch(path: &Path) -> std::io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        // Tokens are secrets: owner read/write only.
        #[cfg(unix)]
        options.mode(0o600);
        options.open(path)
    }

    fn sync_directory(&self) -> StorageResult<()> {
        #[cfg(unix)]
        {
            let dir = File::open(self.paths.app_dir())
                .map_err(|e| StorageError::io("open storage directory for sync", e))?;
            dir.sync_all()
                .map_err(|e| StorageError::io("fsync storage directory", e))?;
        }
        Ok(())
    }
}

impl CredentialStorage for FileCredentialStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                StorageError::Corrupted {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(format!("read '{}'", path.display()), e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let final_path = self.entry_path(key)?;
        let scratch = self.paths.scratch_path(key);

        let mut file = Self::open_scratch(&scratch).map_err(|e| {
            StorageError::io(format!("create scratch file '{}'", scratch.display()), e)
        })?;
        let written = file
            .write_all(value.as_bytes())
            .and_then(|()| file.sync_all());
        drop(file);
        if let Err(e) = written {
            let _ = fs::remove_file(&scratch);
            return Err(StorageError::io(
                format!("write scratch file '{}'", scratch.display()),
                e,
            ));
        }

        fs::rename(&scratch, &final_path).map_err(|e| {
            let _ = fs::remove_file(&scratch);
            StorageError::io(
                format!(
                    "rename '{}' to '{}'",
                    scratch.display(),
                    final_path.display()
                ),
                e,
            )
        })?;

        self.sync_directory()
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => self.sync_directory(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(format!("remove '{}'", path.display()), e)),
        }
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.entry_path(key)?.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> (tempfile::TempDir, FileCredentialStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileCredentialStorage::new(StoragePaths::new(dir.path())).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_write_read_remove() {
        let (_dir, storage) = storage();

        assert_eq!(storage.read("ACCESS_TOKEN").unwrap(), None);
        assert!(!storage.exists("ACCESS_TOKEN").unwrap());

        storage.write("ACCESS_TOKEN", "first").unwrap();
        storage.write("ACCESS_TOKEN", "second").unwrap();
        assert_eq!(
            storage.read("ACCESS_TOKEN").unwrap().as_deref(),
            Some("second")
        );
        assert!(storage.exists("ACCESS_TOKEN").unwrap());

        storage.remove("ACCESS_TOKEN").unwrap();
        assert_eq!(storage.read("ACCESS_TOKEN").unwrap(), None);
        // removing twice is fine
        storage.remove("ACCESS_TOKEN").unwrap();
    }

    #[test]
    fn test_no_scratch_files_left_behind() {
        let (_dir, storage) = storage();
        storage.write("ACCESS_TOKEN", "abc").unwrap();

        let names: Vec<String> = fs::read_dir(storage.paths().app_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["ACCESS_TOKEN".to_string()]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_dir, storage) = storage();
        for key in ["", "../escape", ".hidden", "a/b"] {
            assert!(matches!(
                storage.write(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, storage) = storage();
        storage.write("ACCESS_TOKEN", "abc").unwrap();
        let mode = fs::metadata(storage.paths().entry_path("ACCESS_TOKEN"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
