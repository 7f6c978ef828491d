//! The seam between the controller and the network.

use std::sync::Arc;

use async_trait::async_trait;
use haggle_core::{NegotiatePayload, NegotiationResult, Result};

/// Something that can run one negotiation round trip.
#[async_trait]
pub trait NegotiationTransport: Send + Sync {
    /// Send the payload and return the parsed result.
    ///
    /// Non-success statuses, network failures and unparseable bodies are
    /// all errors.
    async fn negotiate(&self, payload: &NegotiatePayload) -> Result<NegotiationResult>;
}

#[async_trait]
impl<T: NegotiationTransport + ?Sized> NegotiationTransport for Arc<T> {
    async fn negotiate(&self, payload: &NegotiatePayload) -> Result<NegotiationResult> {
        (**self).negotiate(payload).await
    }
}
