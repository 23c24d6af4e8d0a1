//! Typed access to the `ResearchHub` REST backend.
//!
//! Every request carries the current credential, read from the configured
//! [`CredentialSource`] at send time, as a bearer `Authorization` header.
//! Endpoint groups live in the submodules; all of them are methods on
//! [`ApiClient`].

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::error::ResearchHubError;
use crate::http_request::Request;

mod auth;
mod equipment;
mod experiments;
mod favorites;
mod projects;
mod reservations;
mod users;

/// Supplies the credential to attach to outgoing requests.
///
/// The API client only ever reads it; ownership stays with the session
/// store.
pub trait CredentialSource: Send + Sync {
    /// The credential to use for the next request, if any.
    fn credential(&self) -> Option<Credential>;
}

impl CredentialSource for Credential {
    fn credential(&self) -> Option<Credential> {
        Some(self.clone())
    }
}

/// HTTP client for the backend endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    request: Request,
    credentials: Option<Arc<dyn CredentialSource>>,
}

impl ApiClient {
    /// Creates a client that sends requests without a credential until
    /// [`with_credential_source`](Self::with_credential_source) is called.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let request = Request::new(config.timeout());
        Self {
            config,
            request,
            credentials: None,
        }
    }

    /// Attaches the credential from `source` to every subsequent request.
    #[must_use]
    pub fn with_credential_source(mut self, source: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(source);
        self
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn current_credential(&self) -> Option<Credential> {
        self.credentials.as_ref().and_then(|source| source.credential())
    }

    /// Builds a request carrying the current credential.
    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let credential = self.current_credential();
        self.request
            .req(method, &self.config.url(path), credential.as_ref())
    }

    /// Builds a request carrying an explicit credential.
    fn builder_with(
        &self,
        method: Method,
        path: &str,
        credential: &Credential,
    ) -> RequestBuilder {
        self.request
            .req(method, &self.config.url(path), Some(credential))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ResearchHubError> {
        self.request.json(self.builder(Method::GET, path)).await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url())
            .field("has_credential_source", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}
