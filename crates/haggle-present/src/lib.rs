//! # Haggle Present
//!
//! Turns a [`NegotiationResult`](haggle_core::NegotiationResult) into
//! renderable sections.

pub mod presenter;
pub mod timeline;
pub mod view;

pub use presenter::{
    present, snippet, BestDealCard, DisplayModel, EmptyState, OfferRow, TranscriptRow,
    BEST_DEAL_SNIPPET_CHARS, OFFER_SNIPPET_CHARS,
};
pub use timeline::NegotiationTimelineState;
pub use view::ResultsView;
