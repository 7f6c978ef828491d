//! HTTP client for the negotiation backend.

use async_trait::async_trait;
use haggle_core::{HaggleError, NegotiatePayload, NegotiationResult, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::catalog::{AgentDirectory, ServiceInfo, ServicesResponse, StoreInfo, StoresResponse};
use crate::config::ClientConfig;
use crate::transport::NegotiationTransport;

/// Talks to the backend over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    /// Endpoint and timeout.
    config: ClientConfig,

    /// HTTP client.
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for a configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| HaggleError::ConnectionError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Build a transport from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List the agents the backend can negotiate with.
    pub async fn list_agents(&self) -> Result<AgentDirectory> {
        self.get_json("agents").await
    }

    /// List store agents.
    pub async fn list_stores(&self) -> Result<Vec<StoreInfo>> {
        let response: StoresResponse = self.get_json("stores").await?;
        Ok(response.stores)
    }

    /// List service agents.
    pub async fn list_services(&self) -> Result<Vec<ServiceInfo>> {
        let response: ServicesResponse = self.get_json("services").await?;
        Ok(response.services)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.sibling(path)?;
        debug!(%url, "Fetching catalog");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| HaggleError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HaggleError::Status {
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| HaggleError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl NegotiationTransport for HttpTransport {
    async fn negotiate(&self, payload: &NegotiatePayload) -> Result<NegotiationResult> {
        let url = self.config.endpoint().clone();
        debug!(%url, query = %payload.query, max_rounds = payload.max_rounds, "Sending negotiation");

        let response = self
            .http_client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| HaggleError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_text, "Negotiation failed");
            return Err(HaggleError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| HaggleError::ConnectionError(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }
}
