//! Negotiation requests.
//!
//! A request only exists for the duration of one submission.

use serde::{Deserialize, Serialize};

use crate::error::{HaggleError, Result};
use crate::strength::NegotiationStrength;

/// A validated negotiation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationRequest {
    query: String,
    strength: NegotiationStrength,
}

/// Wire body sent to the negotiation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiatePayload {
    pub query: String,
    pub max_rounds: u32,
}

impl NegotiationRequest {
    /// Create a request, refusing queries that are blank after trimming.
    pub fn new(query: impl AsRef<str>, strength: NegotiationStrength) -> Result<Self> {
        let query = query.as_ref().trim();
        if query.is_empty() {
            return Err(HaggleError::EmptyQuery);
        }

        Ok(Self {
            query: query.to_string(),
            strength,
        })
    }

    /// The trimmed query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The selected strength.
    pub fn strength(&self) -> NegotiationStrength {
        self.strength
    }

    /// Encode the request for transmission.
    pub fn payload(&self) -> NegotiatePayload {
        NegotiatePayload {
            query: self.query.clone(),
            max_rounds: self.strength.max_rounds(),
        }
    }
}
