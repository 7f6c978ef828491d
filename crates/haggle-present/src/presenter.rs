//! Mapping from negotiation results to display sections.
//!
//! [`present`] is pure: the same result always yields an equal
//! [`DisplayModel`]. Offers and transcript rounds keep the backend's order.

use haggle_core::{NegotiationLogEntry, NegotiationResult, RankedOffer};
use serde::Serialize;

/// Maximum snippet length on the best-deal card.
pub const BEST_DEAL_SNIPPET_CHARS: usize = 150;

/// Maximum snippet length on an offer row.
pub const OFFER_SNIPPET_CHARS: usize = 100;

const EMPTY_TITLE: &str = "No deals found yet";
const EMPTY_BODY: &str =
    "Try adjusting your budget, city, or description. AI can work with many types of products and services.";

/// Everything needed to render one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    /// Present only when the backend picked a best deal with a named agent.
    pub best_deal: Option<BestDealCard>,

    /// Offer rows in received order.
    pub offers: Vec<OfferRow>,

    /// Shown instead of the offer rows when there are none.
    pub empty_state: Option<EmptyState>,

    /// Transcript rows in received order.
    pub transcript: Vec<TranscriptRow>,

    /// Model label for the footer.
    pub ai_used: String,
}

/// The highlighted best-deal card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestDealCard {
    pub agent: String,
    pub initial: String,
    pub price: String,
    pub snippet: String,
}

/// One row of the offer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferRow {
    pub rank: usize,
    pub agent: String,
    pub initial: String,
    pub price: String,
    pub snippet: String,
}

/// Message shown when no offers came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub body: String,
    /// Backend notices such as "No matching agents".
    pub notices: Vec<String>,
}

/// One transcript round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptRow {
    pub round: u32,
    pub label: String,
    pub customer: String,
    pub seller: String,
    pub summary: String,
}

impl DisplayModel {
    /// Whether the best-deal section renders.
    pub fn has_best_deal(&self) -> bool {
        self.best_deal.is_some()
    }

    /// Whether the offer section shows its empty state.
    pub fn offers_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Whether the transcript toggle is shown.
    pub fn logs_present(&self) -> bool {
        !self.transcript.is_empty()
    }
}

/// Build the display model for a result.
pub fn present(result: &NegotiationResult) -> DisplayModel {
    let best_deal = result
        .best_deal
        .as_ref()
        .filter(|deal| !deal.agent.is_empty())
        .map(best_deal_card);

    let offers: Vec<OfferRow> = result
        .ranked_offers
        .iter()
        .enumerate()
        .map(|(idx, offer)| offer_row(idx + 1, offer))
        .collect();

    let empty_state = offers.is_empty().then(|| EmptyState {
        title: EMPTY_TITLE.to_string(),
        body: EMPTY_BODY.to_string(),
        notices: result.notices.clone(),
    });

    let transcript = result.negotiation_log.iter().map(transcript_row).collect();

    DisplayModel {
        best_deal,
        offers,
        empty_state,
        transcript,
        ai_used: result.ai_used.clone(),
    }
}

/// First line of `details`, cut to at most `max_chars` characters.
///
/// The cut is not word-aware.
pub fn snippet(details: &str, max_chars: usize) -> String {
    let first_line = details.split('\n').next().unwrap_or_default();
    first_line.chars().take(max_chars).collect()
}

/// Price with exactly two decimals. Exact halves round up (`0.125` is `"0.13"`).
pub fn format_price(price: f64) -> String {
    format!("{:.2}", (price * 100.0).round() / 100.0)
}

fn initial(agent: &str) -> String {
    agent
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn best_deal_card(deal: &RankedOffer) -> BestDealCard {
    BestDealCard {
        agent: deal.agent.clone(),
        initial: initial(&deal.agent),
        price: format_price(deal.price),
        snippet: snippet(&deal.details, BEST_DEAL_SNIPPET_CHARS),
    }
}

fn offer_row(rank: usize, offer: &RankedOffer) -> OfferRow {
    OfferRow {
        rank,
        agent: offer.agent.clone(),
        initial: initial(&offer.agent),
        price: format_price(offer.price),
        snippet: snippet(&offer.details, OFFER_SNIPPET_CHARS),
    }
}

fn transcript_row(entry: &NegotiationLogEntry) -> TranscriptRow {
    TranscriptRow {
        round: entry.round,
        label: format!("Round {} — Talked to {}", entry.round, entry.seller),
        customer: entry.customer.clone(),
        seller: entry.seller.clone(),
        summary: entry.summary.clone(),
    }
}
