//! # Haggle Core
//!
//! Core types shared by every Haggle crate.
//!
//! This crate provides:
//! - [`NegotiationRequest`] - Validated query sent to the backend
//! - [`NegotiationStrength`] / [`StrengthSelector`] - Round budget selection
//! - [`NegotiationResult`] - Ranked offers, transcript and best deal
//! - [`HaggleError`] - Client error types

pub mod error;
pub mod request;
pub mod strength;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorKind, HaggleError, Result};
pub use request::{NegotiatePayload, NegotiationRequest};
pub use strength::{NegotiationStrength, StrengthSelector};
pub use types::{NegotiationLogEntry, NegotiationResult, RankedOffer};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{ErrorKind, HaggleError, Result};
    pub use crate::request::{NegotiatePayload, NegotiationRequest};
    pub use crate::strength::{NegotiationStrength, StrengthSelector};
    pub use crate::types::{NegotiationLogEntry, NegotiationResult, RankedOffer};
}
