//! Login and registration flows.

use super::{ProfileResolver, SessionStore};
use crate::api::ApiClient;
use crate::credential::Credential;
use crate::error::ResearchHubError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};

/// Message shown when a login fails without a backend message.
pub const LOGIN_FAILED: &str = "Invalid credentials.";
/// Message shown when a registration fails without a backend message.
pub const REGISTRATION_FAILED: &str = "Registration failed.";

/// The backend's message for a failed flow, or `fallback` when it sent none.
#[must_use]
pub fn failure_message(err: &ResearchHubError, fallback: &str) -> String {
    match err.backend_message() {
        Some(message) if !message.trim().is_empty() => message.to_string(),
        _ => fallback.to_string(),
    }
}

impl<R: ProfileResolver> SessionStore<R> {
    /// Signs in with email and password.
    ///
    /// On success the session holds the new credential and the profile from
    /// the response; the profile is returned so the caller can navigate to
    /// the role's home.
    ///
    /// # Errors
    /// Returns the backend's rejection (use [`failure_message`] with
    /// [`LOGIN_FAILED`] to display it) or a transport error. The session is
    /// left untouched on error.
    pub async fn login(
        &self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ResearchHubError> {
        let response = api
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.establish(response)
    }

    /// Creates an account and signs in with it.
    ///
    /// # Errors
    /// Returns the backend's rejection (use [`failure_message`] with
    /// [`REGISTRATION_FAILED`] to display it) or a transport error.
    pub async fn register(
        &self,
        api: &ApiClient,
        request: &RegisterRequest,
    ) -> Result<UserProfile, ResearchHubError> {
        let response = api.register(request).await?;
        self.establish(response)
    }

    fn establish(&self, response: AuthResponse) -> Result<UserProfile, ResearchHubError> {
        let credential =
            Credential::new(response.token).ok_or_else(|| ResearchHubError::SerializationError {
                error: "backend returned an empty token".to_string(),
            })?;
        tracing::info!(user = response.user.id, role = %response.user.role, "signed in");
        // The resolution keeps running in the background and refreshes the
        // profile from /me.
        drop(self.set_credential(Some(credential)));
        self.set_profile(Some(response.user.clone()));
        Ok(response.user)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_failure_message_prefers_backend() {
        let err = ResearchHubError::Unauthorized {
            message: "Wrong password".to_string(),
        };
        assert_eq!(failure_message(&err, LOGIN_FAILED), "Wrong password");

        let blank = ResearchHubError::Validation {
            message: "  ".to_string(),
            errors: BTreeMap::new(),
        };
        assert_eq!(failure_message(&blank, REGISTRATION_FAILED), REGISTRATION_FAILED);

        let transport = ResearchHubError::NetworkError {
            url: "http://x/login".to_string(),
            status: None,
            error: "connection refused".to_string(),
        };
        assert_eq!(failure_message(&transport, LOGIN_FAILED), LOGIN_FAILED);
    }
}
