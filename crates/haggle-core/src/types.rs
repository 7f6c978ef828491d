//! Result types returned by the negotiation backend.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// One candidate offer from a seller or service provider.
///
/// Created by the backend and never modified by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOffer {
    /// Name of the seller agent (e.g., "BestBuyChicago").
    pub agent: String,

    /// Negotiated price.
    pub price: f64,

    /// Free text from the negotiation, possibly multi-line.
    pub details: String,
}

/// One round of the automated negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationLogEntry {
    /// Round number, as supplied by the backend.
    pub round: u32,

    /// Name of the agent negotiating for the user.
    pub customer: String,

    /// Name of the seller agent.
    pub seller: String,

    /// Summary of the exchange, line breaks preserved.
    pub summary: String,
}

/// Outcome of one negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResultWire", into = "ResultWire")]
pub struct NegotiationResult {
    /// Offers, cheapest first as ordered by the backend.
    pub ranked_offers: Vec<RankedOffer>,

    /// Transcript rounds in backend order.
    pub negotiation_log: Vec<NegotiationLogEntry>,

    /// Label of the model the backend used.
    pub ai_used: String,

    /// The backend's pick, absent when it sent `{}`.
    pub best_deal: Option<RankedOffer>,

    /// Messages the backend put in the log that are not rounds
    /// (e.g., "No matching agents").
    pub notices: Vec<String>,
}

impl RankedOffer {
    /// Create a new offer.
    pub fn new(agent: impl Into<String>, price: f64, details: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            price,
            details: details.into(),
        }
    }
}

impl NegotiationLogEntry {
    /// Create a new log entry.
    pub fn new(
        round: u32,
        customer: impl Into<String>,
        seller: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            round,
            customer: customer.into(),
            seller: seller.into(),
            summary: summary.into(),
        }
    }
}

impl NegotiationResult {
    /// Create an empty result labelled with the model used.
    pub fn new(ai_used: impl Into<String>) -> Self {
        Self {
            ranked_offers: Vec::new(),
            negotiation_log: Vec::new(),
            ai_used: ai_used.into(),
            best_deal: None,
            notices: Vec::new(),
        }
    }

    /// Append an offer.
    pub fn with_offer(mut self, offer: RankedOffer) -> Self {
        self.ranked_offers.push(offer);
        self
    }

    /// Append a transcript round.
    pub fn with_round(mut self, entry: NegotiationLogEntry) -> Self {
        self.negotiation_log.push(entry);
        self
    }

    /// Set the best deal.
    pub fn with_best_deal(mut self, offer: RankedOffer) -> Self {
        self.best_deal = Some(offer);
        self
    }

    /// Append a backend notice.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notices.push(notice.into());
        self
    }
}

/// Response body exactly as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultWire {
    ranked_offers: Vec<RankedOffer>,
    negotiation_log: Vec<LogRecord>,
    #[serde(default)]
    ai_used: String,
    #[serde(
        default,
        deserialize_with = "deserialize_best_deal",
        serialize_with = "serialize_best_deal"
    )]
    best_deal: Option<RankedOffer>,
}

/// A `negotiation_log` element: either a round or an error notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LogRecord {
    Round(NegotiationLogEntry),
    Notice { error: String },
}

impl From<ResultWire> for NegotiationResult {
    fn from(wire: ResultWire) -> Self {
        let mut negotiation_log = Vec::with_capacity(wire.negotiation_log.len());
        let mut notices = Vec::new();

        for record in wire.negotiation_log {
            match record {
                LogRecord::Round(entry) => negotiation_log.push(entry),
                LogRecord::Notice { error } => notices.push(error),
            }
        }

        Self {
            ranked_offers: wire.ranked_offers,
            negotiation_log,
            ai_used: wire.ai_used,
            best_deal: wire.best_deal,
            notices,
        }
    }
}

impl From<NegotiationResult> for ResultWire {
    fn from(result: NegotiationResult) -> Self {
        let negotiation_log = result
            .negotiation_log
            .into_iter()
            .map(LogRecord::Round)
            .chain(result.notices.into_iter().map(|error| LogRecord::Notice { error }))
            .collect();

        Self {
            ranked_offers: result.ranked_offers,
            negotiation_log,
            ai_used: result.ai_used,
            best_deal: result.best_deal,
        }
    }
}

/// `{}` and `null` both mean "no best deal".
fn deserialize_best_deal<'de, D>(deserializer: D) -> Result<Option<RankedOffer>, D::Error>
where
    D: Deserializer<'de>,
{
    let object = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;

    match object {
        None => Ok(None),
        Some(map) if map.is_empty() => Ok(None),
        Some(map) => RankedOffer::deserialize(serde_json::Value::Object(map))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn serialize_best_deal<S>(deal: &Option<RankedOffer>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match deal {
        Some(offer) => offer.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
