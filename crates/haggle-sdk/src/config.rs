//! Client configuration.

use std::time::Duration;

use haggle_core::{HaggleError, Result};
use reqwest::Url;

/// Environment variable that overrides the negotiation endpoint.
pub const ENDPOINT_ENV: &str = "HAGGLE_API_URL";

/// Endpoint used for local development when nothing is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/ai_negotiate";

/// Where and how to reach the negotiation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Full URL of the negotiate endpoint.
    endpoint: Url,

    /// Optional request timeout. `None` waits for the backend indefinitely.
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for an endpoint URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = endpoint.trim();
        let url = Url::parse(endpoint)
            .map_err(|e| HaggleError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(HaggleError::InvalidEndpoint(format!(
                "{}: unsupported scheme '{}'",
                endpoint,
                url.scheme()
            )));
        }

        Ok(Self {
            endpoint: url,
            timeout: None,
        })
    }

    /// Read the endpoint from [`ENDPOINT_ENV`], falling back to [`DEFAULT_ENDPOINT`].
    pub fn from_env() -> Result<Self> {
        Self::from_override(std::env::var(ENDPOINT_ENV).ok().as_deref())
    }

    /// Use `value` when it is set and not blank, otherwise the default endpoint.
    pub fn from_override(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::new(DEFAULT_ENDPOINT),
        }
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The negotiate endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve a sibling path of the negotiate endpoint
    /// (`http://host/ai_negotiate` + `agents` = `http://host/agents`).
    pub fn sibling(&self, path: &str) -> Result<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| HaggleError::InvalidEndpoint(format!("{}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::from_override(None).unwrap();
        assert_eq!(config.endpoint().as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), None);

        let config = ClientConfig::from_override(Some("   ")).unwrap();
        assert_eq!(config.endpoint().as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_override_endpoint() {
        let config = ClientConfig::from_override(Some("https://deals.example.com/ai_negotiate")).unwrap();
        assert_eq!(config.endpoint().host_str(), Some("deals.example.com"));
    }

    #[test]
    fn test_invalid_endpoints() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(HaggleError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com/ai_negotiate"),
            Err(HaggleError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_sibling_paths() {
        let config = ClientConfig::new("http://localhost:8000/ai_negotiate").unwrap();
        assert_eq!(config.sibling("agents").unwrap().as_str(), "http://localhost:8000/agents");
        assert_eq!(config.sibling("stores").unwrap().as_str(), "http://localhost:8000/stores");
    }

    #[test]
    fn test_timeout() {
        let config = ClientConfig::new(DEFAULT_ENDPOINT)
            .unwrap()
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }
}
