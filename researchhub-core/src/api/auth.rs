//! Login, registration and the current-session profile.

use reqwest::Method;

use super::ApiClient;
use crate::credential::Credential;
use crate::error::ResearchHubError;
use crate::models::{AuthResponse, LoginRequest, ProfileEnvelope, RegisterRequest, UserProfile};

impl ApiClient {
    /// `POST /login`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Unauthorized`] or
    /// [`ResearchHubError::Validation`] with the backend's message when the
    /// credentials are rejected, or a transport error.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ResearchHubError> {
        tracing::debug!(email = %request.email, "logging in");
        self.request
            .json(self.builder(Method::POST, "/login").json(request))
            .await
    }

    /// `POST /register`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when the backend rejects the
    /// registration (e.g. email already taken), or a transport error.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<AuthResponse, ResearchHubError> {
        tracing::debug!(email = %request.email, role = %request.role, "registering");
        self.request
            .json(self.builder(Method::POST, "/register").json(request))
            .await
    }

    /// `GET /me` with the current credential.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::NotAuthenticated`] without sending
    /// anything when there is no credential, and
    /// [`ResearchHubError::Unauthorized`] when the backend rejects it.
    pub async fn me(&self) -> Result<UserProfile, ResearchHubError> {
        let credential = self
            .current_credential()
            .ok_or(ResearchHubError::NotAuthenticated)?;
        self.me_with(&credential).await
    }

    /// `GET /me` with an explicit credential, regardless of the configured
    /// credential source.
    ///
    /// # Errors
    /// Same as [`me`](Self::me).
    pub async fn me_with(&self, credential: &Credential) -> Result<UserProfile, ResearchHubError> {
        self.request
            .json::<ProfileEnvelope>(self.builder_with(Method::GET, "/me", credential))
            .await
            .map(Into::into)
    }
}
