//! Error types for credential storage.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by credential storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O operation failed.
    #[error("storage io error ({context}): {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The stored entry is not valid UTF-8 or otherwise malformed.
    #[error("corrupted entry {key}: {reason}")]
    Corrupted {
        /// The entry key.
        key: String,
        /// Description of the problem.
        reason: String,
    },

    /// The key cannot be used as a storage entry name.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// Errors coming from a storage lock.
    #[error("storage lock error: {0}")]
    Lock(String),
}

impl StorageError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
