use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Opaque bearer token identifying an authenticated session.
///
/// The token is zeroized on drop and never appears in `Debug` output.
pub struct Credential(SecretString);

impl Credential {
    /// Wraps a raw token.
    ///
    /// Returns `None` for an empty or whitespace-only token, which the
    /// backend would reject anyway.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return None;
        }
        Some(Self(SecretString::from(token)))
    }

    /// Returns the raw token, for the `Authorization` header and storage.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self(SecretString::from(self.expose().to_owned()))
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Credential {}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}
