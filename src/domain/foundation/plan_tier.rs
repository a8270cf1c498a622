//! Subscription plan tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Billing plan tier, selecting which quota limits apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier; no deck-generation entitlement.
    #[default]
    Free,
    /// Paid tier with higher token limits and deck generation.
    Premium,
}

impl PlanTier {
    /// Parses a tier from its lowercase string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "free" => Ok(PlanTier::Free),
            "premium" => Ok(PlanTier::Premium),
            other => Err(ValidationError::invalid_format(
                "plan_tier",
                format!("unknown plan tier '{}'", other),
            )),
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Premium => "premium",
        }
    }

    /// Returns true if this tier may generate flashcard decks.
    pub fn can_generate_decks(&self) -> bool {
        matches!(self, PlanTier::Premium)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
