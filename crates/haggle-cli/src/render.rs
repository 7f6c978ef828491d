//! Plain-text rendering of results, failures and catalog listings.

use haggle_present::{BestDealCard, DisplayModel, EmptyState, OfferRow, ResultsView, TranscriptRow};
use haggle_sdk::{AgentDirectory, ServiceInfo, StoreInfo, GENERIC_FAILURE_MESSAGE};
use owo_colors::OwoColorize;

/// Turns display models into terminal text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render the displayed result, honouring the transcript disclosure.
    pub fn results(&self, view: &ResultsView) -> String {
        let model = view.model();
        let mut lines = Vec::new();

        if let Some(card) = &model.best_deal {
            self.best_deal(card, &mut lines);
            lines.push(String::new());
        }

        match &model.empty_state {
            Some(empty) => self.empty_state(empty, &mut lines),
            None => self.offers(&model.offers, &mut lines),
        }

        if view.show_transcript_toggle() {
            lines.push(String::new());
            self.transcript(view, &mut lines);
        }

        self.footer(model, &mut lines);
        lines.join("\n")
    }

    /// Render a failed submission.
    pub fn failure(&self, message: &str) -> String {
        [
            self.error_text("Something went wrong"),
            GENERIC_FAILURE_MESSAGE.to_string(),
            self.dim(&format!("Technical details: {}", message)),
        ]
        .join("\n")
    }

    pub fn agents(&self, directory: &AgentDirectory) -> String {
        let mut lines = vec![self.heading("AI agents")];
        lines.extend(
            directory
                .ai_agents
                .iter()
                .map(|(name, description)| format!("  {:<20} {}", name, description)),
        );

        if !directory.legacy_agents.is_empty() {
            lines.push(String::new());
            lines.push(self.heading("Legacy agents"));
            lines.extend(
                directory
                    .legacy_agents
                    .iter()
                    .map(|(id, description)| format!("  {:<20} {}", id, description)),
            );
        }

        lines.join("\n")
    }

    pub fn stores(&self, stores: &[StoreInfo]) -> String {
        let mut lines = vec![self.heading("Stores")];
        lines.extend(
            stores
                .iter()
                .map(|s| format!("  {:<12} {:<20} {}", s.id, s.name, s.location)),
        );
        lines.join("\n")
    }

    pub fn services(&self, services: &[ServiceInfo]) -> String {
        let mut lines = vec![self.heading("Services")];
        lines.extend(services.iter().map(|s| format!("  {:<12} {}", s.id, s.name)));
        lines.join("\n")
    }

    fn best_deal(&self, card: &BestDealCard, lines: &mut Vec<String>) {
        lines.push(self.accent("★ Best deal"));
        lines.push(format!(
            "  [{}] {}  {}",
            card.initial,
            self.strong(&card.agent),
            self.accent(&format!("${}", card.price))
        ));
        if !card.snippet.is_empty() {
            lines.push(format!("      {}", card.snippet));
        }
        lines.push(self.dim("      AI compared multiple options to pick this for you."));
    }

    fn offers(&self, offers: &[OfferRow], lines: &mut Vec<String>) {
        lines.push(format!("{}  {}", self.heading("All offers"), self.dim("cheapest first")));
        for row in offers {
            lines.push(format!(
                "  {:>2}. [{}] {:<20} {:>10}  {}",
                row.rank,
                row.initial,
                row.agent,
                format!("${}", row.price),
                row.snippet
            ));
        }
    }

    fn empty_state(&self, empty: &EmptyState, lines: &mut Vec<String>) {
        lines.push(self.heading(&empty.title));
        lines.push(format!("  {}", empty.body));
        for notice in &empty.notices {
            lines.push(self.dim(&format!("  • {}", notice)));
        }
    }

    fn transcript(&self, view: &ResultsView, lines: &mut Vec<String>) {
        if !view.timeline().is_open() {
            lines.push(format!(
                "{} {}",
                self.heading("▶ How AI negotiated for you"),
                self.dim("(hidden)")
            ));
            return;
        }

        lines.push(self.heading("▼ How AI negotiated for you"));
        for row in view.visible_transcript() {
            self.transcript_row(row, lines);
        }
    }

    fn transcript_row(&self, row: &TranscriptRow, lines: &mut Vec<String>) {
        lines.push(format!("  {}", self.strong(&row.label)));
        for line in row.summary.lines() {
            lines.push(format!("    {}", line));
        }
    }

    fn footer(&self, model: &DisplayModel, lines: &mut Vec<String>) {
        if !model.ai_used.is_empty() {
            lines.push(String::new());
            lines.push(self.dim(&format!("Powered by {}", model.ai_used)));
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str) -> String {
        self.heading(text)
    }

    fn accent(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn error_text(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haggle_core::{NegotiationLogEntry, NegotiationResult, RankedOffer};

    fn sample() -> NegotiationResult {
        NegotiationResult::new("Groq Llama 3.1 70B")
            .with_offer(RankedOffer::new("BestBuyChicago", 899.0, "$899 pickup\nmore"))
            .with_offer(RankedOffer::new("TargetLA", 930.0, "$930 with RedCard"))
            .with_round(NegotiationLogEntry::new(1, "USCustomerAgent", "TargetLA", "line a\nline b"))
            .with_best_deal(RankedOffer::new("BestBuyChicago", 899.0, "$899 pickup\nmore"))
    }

    #[test]
    fn test_results_sections() {
        let text = Renderer::new(false).results(&ResultsView::from_result(&sample()));

        assert!(text.contains("★ Best deal"));
        assert!(text.contains("[B] BestBuyChicago  $899.00"));
        assert!(text.contains("All offers"));
        assert!(text.contains("$930.00"));
        assert!(text.contains("Round 1 — Talked to TargetLA"));
        assert!(text.contains("    line b"));
        assert!(text.ends_with("Powered by Groq Llama 3.1 70B"));
        assert!(!text.contains("more"));
    }

    #[test]
    fn test_collapsed_transcript() {
        let mut view = ResultsView::from_result(&sample());
        view.toggle_transcript();
        let text = Renderer::new(false).results(&view);

        assert!(text.contains("▶ How AI negotiated for you (hidden)"));
        assert!(!text.contains("Round 1"));
    }

    #[test]
    fn test_empty_results() {
        let result = NegotiationResult::new("").with_notice("No matching agents");
        let text = Renderer::new(false).results(&ResultsView::from_result(&result));

        assert!(text.starts_with("No deals found yet"));
        assert!(text.contains("• No matching agents"));
        assert!(!text.contains("Best deal"));
        assert!(!text.contains("How AI negotiated"));
        assert!(!text.contains("Powered by"));
    }

    #[test]
    fn test_failure() {
        let text = Renderer::new(false).failure("API error: 500");
        assert!(text.contains(GENERIC_FAILURE_MESSAGE));
        assert!(text.ends_with("Technical details: API error: 500"));
    }
}
