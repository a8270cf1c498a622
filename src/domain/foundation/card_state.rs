//! Card memory state machine phases.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Phase of a card in the spaced-repetition state machine.
///
/// Persisted as a lowercase string; `parse` validates at the store
/// boundary rather than trusting stored data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    /// Never reviewed; carries no meaningful stability or difficulty.
    #[default]
    New,
    /// In the initial short-term learning steps.
    Learning,
    /// Graduated to long-term review intervals.
    Review,
    /// Lapsed from Review; repeating short-term steps.
    Relearning,
}

impl CardState {
    /// Parses a state from its lowercase string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "new" => Ok(CardState::New),
            "learning" => Ok(CardState::Learning),
            "review" => Ok(CardState::Review),
            "relearning" => Ok(CardState::Relearning),
            other => Err(ValidationError::invalid_format(
                "state",
                format!("unknown card state '{}'", other),
            )),
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardState::New => "new",
            CardState::Learning => "learning",
            CardState::Review => "review",
            CardState::Relearning => "relearning",
        }
    }

    /// Returns true if the card has never been reviewed.
    pub fn is_new(&self) -> bool {
        matches!(self, CardState::New)
    }

    /// Returns true if the card is in short-term steps.
    pub fn is_learning_phase(&self) -> bool {
        matches!(self, CardState::Learning | CardState::Relearning)
    }
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
