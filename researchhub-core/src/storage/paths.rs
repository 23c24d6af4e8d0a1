//! Storage path helpers.

use std::path::{Path, PathBuf};

const APP_DIRNAME: &str = "researchhub";
const TMP_SUFFIX: &str = "tmp";

/// Paths for client storage artifacts under `<root>/researchhub`.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
    app_dir: PathBuf,
}

impl StoragePaths {
    /// Builds storage paths rooted at `root`.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let app_dir = root.join(APP_DIRNAME);
        Self { root, app_dir }
    }

    /// Returns the storage root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `ResearchHub` storage directory.
    #[must_use]
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Returns the path of the entry stored under `key`.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.app_dir.join(key)
    }

    /// Returns a unique scratch path next to the entry, used for atomic writes.
    #[must_use]
    pub fn scratch_path(&self, key: &str) -> PathBuf {
        self.app_dir
            .join(format!(".{key}.{}.{TMP_SUFFIX}", uuid::Uuid::new_v4()))
    }
}
