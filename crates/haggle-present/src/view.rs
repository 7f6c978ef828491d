//! The displayed result together with its transcript disclosure.

use haggle_core::NegotiationResult;
use tracing::debug;

use crate::presenter::{present, DisplayModel, TranscriptRow};
use crate::timeline::NegotiationTimelineState;

/// The result currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    model: DisplayModel,
    timeline: NegotiationTimelineState,
}

impl ResultsView {
    /// Wrap a display model with a fresh, open timeline.
    pub fn new(model: DisplayModel) -> Self {
        Self {
            model,
            timeline: NegotiationTimelineState::new(),
        }
    }

    /// Present a result and wrap it.
    pub fn from_result(result: &NegotiationResult) -> Self {
        Self::new(present(result))
    }

    /// Show a different result. The timeline starts open again.
    pub fn replace(&mut self, model: DisplayModel) {
        self.model = model;
        self.timeline.reset();
    }

    /// The display model.
    pub fn model(&self) -> &DisplayModel {
        &self.model
    }

    /// The transcript disclosure state.
    pub fn timeline(&self) -> NegotiationTimelineState {
        self.timeline
    }

    /// Whether the transcript toggle control is shown.
    pub fn show_transcript_toggle(&self) -> bool {
        self.model.logs_present()
    }

    /// Flip the transcript disclosure, returning whether it is now open.
    pub fn toggle_transcript(&mut self) -> bool {
        let open = self.timeline.toggle();
        debug!(open, "Transcript toggled");
        open
    }

    /// Transcript rows to render right now.
    pub fn visible_transcript(&self) -> &[TranscriptRow] {
        if self.timeline.is_open() {
            self.model.transcript.as_slice()
        } else {
            &[]
        }
    }
}
