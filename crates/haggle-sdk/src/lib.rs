//! # Haggle SDK
//!
//! Client SDK for talking to a negotiation backend, plus the
//! single-flight [`RequestController`] that drives a submission.

pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod transport;

pub use catalog::{AgentDirectory, ServiceInfo, StoreInfo};
pub use client::HttpTransport;
pub use config::{ClientConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV};
pub use controller::{RequestController, RequestState, SubmissionInfo, GENERIC_FAILURE_MESSAGE};
pub use transport::NegotiationTransport;

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::client::HttpTransport;
    pub use crate::config::ClientConfig;
    pub use crate::controller::{RequestController, RequestState, GENERIC_FAILURE_MESSAGE};
    pub use crate::transport::NegotiationTransport;
    pub use haggle_core::prelude::*;
}
