use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::credential::Credential;
use crate::error::ResearchHubError;
use crate::models::ErrorPayload;

/// A simple wrapper on an HTTP client for making requests. Sets sensible defaults such as timeouts
/// and user-agent, and attaches the bearer credential when one is given.
///
/// Requests are sent exactly once: no retry, no cache, no deduplication.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    client: reqwest::Client,
    timeout: Duration,
}

impl Request {
    /// Initializes a new `Request` instance.
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Creates a request builder with defaults applied.
    pub(crate) fn req(
        &self,
        method: Method,
        url: &str,
        credential: Option<&Credential>,
    ) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(
                reqwest::header::USER_AGENT,
                format!("researchhub-core/{}", env!("CARGO_PKG_VERSION")),
            );
        match credential {
            Some(credential) => builder.bearer_auth(credential.expose()),
            None => builder,
        }
    }

    /// Sends a request built by `req` and maps non-success statuses to errors.
    pub(crate) async fn handle(
        &self,
        request_builder: RequestBuilder,
    ) -> Result<Response, ResearchHubError> {
        let (client, request) = request_builder.build_split();
        let request = request?;
        let url = request.url().to_string();
        let method = request.method().clone();

        let response = client.execute(request).await.map_err(|err| {
            tracing::debug!(%url, %method, "request failed: {err}");
            ResearchHubError::NetworkError {
                url: url.clone(),
                status: None,
                error: err.to_string(),
            }
        })?;

        let status = response.status();
        tracing::debug!(%url, %method, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, body))
    }

    /// Sends the request and decodes a JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        request_builder: RequestBuilder,
    ) -> Result<T, ResearchHubError> {
        let response = self.handle(request_builder).await?;
        let url = response.url().to_string();
        let text = response.text().await.map_err(|err| ResearchHubError::NetworkError {
            url,
            status: None,
            error: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| ResearchHubError::SerializationError {
            error: format!("unexpected response body: {e}"),
        })
    }

    /// Sends the request and discards the body.
    pub(crate) async fn send(
        &self,
        request_builder: RequestBuilder,
    ) -> Result<(), ResearchHubError> {
        self.handle(request_builder).await.map(drop)
    }
}

/// Maps a non-success response to the error taxonomy.
///
/// The body is surfaced unmodified: parsed into `message`/`errors` when it is
/// the backend's error payload, kept raw otherwise.
fn error_from_response(status: StatusCode, body: String) -> ResearchHubError {
    let payload = serde_json::from_str::<ErrorPayload>(&body).ok();
    let message = payload
        .as_ref()
        .and_then(|p| p.message.clone())
        .unwrap_or_else(|| body.clone());

    match status.as_u16() {
        // 419 is the backend's "session expired".
        401 | 419 => ResearchHubError::Unauthorized { message },
        403 => ResearchHubError::Forbidden { message },
        422 => ResearchHubError::Validation {
            message,
            errors: payload.map(|p| p.errors).unwrap_or_default(),
        },
        code => ResearchHubError::Api { status: code, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_field_messages() {
        let err = error_from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"The title field is required.","errors":{"title":["The title field is required."]}}"#
                .to_string(),
        );
        match err {
            ResearchHubError::Validation { message, errors } => {
                assert_eq!(message, "The title field is required.");
                assert_eq!(errors["title"], vec!["The title field is required."]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_auth_statuses() {
        let err = error_from_response(StatusCode::UNAUTHORIZED, r#"{"message":"Unauthenticated."}"#.to_string());
        assert!(err.is_auth_failure());
        assert_eq!(err.backend_message(), Some("Unauthenticated."));

        let expired = error_from_response(StatusCode::from_u16(419).unwrap(), String::new());
        assert!(expired.is_auth_failure());

        let forbidden = error_from_response(StatusCode::FORBIDDEN, "nope".to_string());
        assert!(matches!(forbidden, ResearchHubError::Forbidden { ref message } if message == "nope"));
        assert!(!forbidden.is_auth_failure());
    }

    #[test]
    fn test_other_statuses_keep_raw_body() {
        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>".to_string());
        assert!(matches!(
            err,
            ResearchHubError::Api { status: 500, ref body } if body == "<html>oops</html>"
        ));
    }
}
