//! Negotiation strength levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HaggleError;

/// How hard the backend should negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStrength {
    /// A single round per seller.
    Quick,
    /// Three rounds (default).
    #[default]
    Standard,
    /// Five rounds, the most the backend is asked for.
    MaxSavings,
}

impl NegotiationStrength {
    /// Every level, weakest first.
    pub const ALL: [NegotiationStrength; 3] = [
        NegotiationStrength::Quick,
        NegotiationStrength::Standard,
        NegotiationStrength::MaxSavings,
    ];

    /// Round budget sent to the backend as `max_rounds`.
    pub fn max_rounds(&self) -> u32 {
        match self {
            NegotiationStrength::Quick => 1,
            NegotiationStrength::Standard => 3,
            NegotiationStrength::MaxSavings => 5,
        }
    }

    /// Label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            NegotiationStrength::Quick => "Quick",
            NegotiationStrength::Standard => "Standard",
            NegotiationStrength::MaxSavings => "Max savings",
        }
    }
}

impl fmt::Display for NegotiationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NegotiationStrength {
    type Err = HaggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(NegotiationStrength::Quick),
            "standard" => Ok(NegotiationStrength::Standard),
            "max savings" | "max-savings" | "max_savings" | "max" => {
                Ok(NegotiationStrength::MaxSavings)
            }
            _ => Err(HaggleError::UnknownStrength(s.to_string())),
        }
    }
}

/// Holds the strength used by the next submission.
///
/// Exactly one level is selected at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrengthSelector {
    selected: NegotiationStrength,
}

impl StrengthSelector {
    /// Create a selector with the default level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a level.
    pub fn select(&mut self, strength: NegotiationStrength) {
        self.selected = strength;
    }

    /// The currently selected level.
    pub fn selected(&self) -> NegotiationStrength {
        self.selected
    }

    /// Round budget of the selected level.
    pub fn max_rounds(&self) -> u32 {
        self.selected.max_rounds()
    }
}
