use std::time::Duration;

use crate::error::ResearchHubError;

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how the client talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Builds a config for the backend at `base_url`.
    ///
    /// Trailing slashes are dropped so endpoint paths can be appended as-is.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::InvalidInput`] if `base_url` is not an
    /// absolute `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ResearchHubError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| {
            ResearchHubError::InvalidInput {
                attribute: "base_url".to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResearchHubError::InvalidInput {
                attribute: "base_url".to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL of an endpoint path such as `/projects/3`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("https://hub.example.org/api/").unwrap();
        assert_eq!(config.base_url(), "https://hub.example.org/api");
        assert_eq!(config.url("/me"), "https://hub.example.org/api/me");
        assert_eq!(config.url("projects/3"), "https://hub.example.org/api/projects/3");
    }

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(ClientConfig::new("ftp://hub.example.org").is_err());
        assert!(ClientConfig::new("not a url").is_err());
    }

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
