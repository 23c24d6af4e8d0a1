use std::collections::BTreeMap;

use thiserror::Error;

use crate::storage::StorageError;

/// Error outputs from the `ResearchHub` client.
#[derive(Debug, Error)]
pub enum ResearchHubError {
    /// The presented input is not valid for the requested operation
    #[error("invalid_input_{attribute}: {reason}")]
    InvalidInput {
        /// The attribute that was rejected.
        attribute: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Unexpected error serializing or deserializing information
    #[error("serialization_error: {error}")]
    SerializationError {
        /// Details of the failure.
        error: String,
    },
    /// Transport failure talking to the backend
    #[error("network_error at {url} (status {status:?}): {error}")]
    NetworkError {
        /// The URL of the request.
        url: String,
        /// The HTTP status, when a response was received.
        status: Option<u16>,
        /// Details of the failure.
        error: String,
    },
    /// The backend rejected the credential (missing, invalid or expired)
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Message returned by the backend.
        message: String,
    },
    /// The credential is valid but the account may not perform the operation
    #[error("forbidden: {message}")]
    Forbidden {
        /// Message returned by the backend.
        message: String,
    },
    /// The backend rejected a mutation, e.g. a required field is missing
    #[error("validation_error: {message}")]
    Validation {
        /// Summary message returned by the backend.
        message: String,
        /// Per-field messages, keyed by field name.
        errors: BTreeMap<String, Vec<String>>,
    },
    /// Any other non-success response. The body is kept as returned.
    #[error("api_error (status {status}): {body}")]
    Api {
        /// The HTTP status.
        status: u16,
        /// The raw response body.
        body: String,
    },
    /// The operation needs a signed-in session
    #[error("not_authenticated")]
    NotAuthenticated,
    /// Durable credential storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// HTTP client failure outside a request (e.g. building the client)
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl ResearchHubError {
    /// Returns `true` when the backend rejected the credential itself.
    ///
    /// The session store treats this as a forced logout.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The backend's human readable message, when there is one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::Validation { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ResearchHubError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError {
            error: error.to_string(),
        }
    }
}
