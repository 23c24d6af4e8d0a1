//! Durable client storage for the session credential.

mod error;
mod file;
mod memory;
mod paths;
mod traits;

pub use error::{StorageError, StorageResult};
pub use file::FileCredentialStorage;
pub use memory::MemoryCredentialStorage;
pub use paths::StoragePaths;
pub use traits::CredentialStorage;

/// Fixed key under which the session credential is persisted.
pub const CREDENTIAL_KEY: &str = "ACCESS_TOKEN";
