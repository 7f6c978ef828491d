//! Open/closed state of the negotiation transcript.

/// Whether the transcript rows are rendered.
///
/// Starts open. Not persisted: a new result gets a fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiationTimelineState {
    open: bool,
}

impl Default for NegotiationTimelineState {
    fn default() -> Self {
        Self { open: true }
    }
}

impl NegotiationTimelineState {
    /// Create an open timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the transcript is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Force the flag.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Back to the initial (open) state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_open() {
        assert!(NegotiationTimelineState::new().is_open());
    }

    #[test]
    fn test_toggle() {
        let mut timeline = NegotiationTimelineState::new();
        assert!(!timeline.toggle());
        assert!(!timeline.is_open());
        assert!(timeline.toggle());

        timeline.set_open(false);
        timeline.reset();
        assert!(timeline.is_open());
    }
}
