//! Per-plan quota limits.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PlanTier;

/// Quota limits applied to a plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// The tier these limits apply to.
    pub tier: PlanTier,
    /// Tokens allowed inside one rolling window.
    pub window_token_limit: u64,
    /// Rolling window length in hours.
    pub window_duration_hours: u32,
    /// Tokens allowed per day.
    pub daily_token_limit: u64,
    /// Deck generations per day. None = no entitlement.
    pub daily_deck_limit: Option<u32>,
    /// Deck generations per calendar month. None = no entitlement.
    pub monthly_deck_limit: Option<u32>,
}

impl PlanLimits {
    /// Get the limits for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Window | Window hours | Daily | Decks/day | Decks/month |
    /// |------|--------|--------------|-------|-----------|-------------|
    /// | Free | 5,000 | 3 | 20,000 | n/a | n/a |
    /// | Premium | 50,000 | 3 | 200,000 | 10 | 100 |
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Free => Self {
                tier,
                window_token_limit: 5_000,
                window_duration_hours: 3,
                daily_token_limit: 20_000,
                daily_deck_limit: None,
                monthly_deck_limit: None,
            },
            PlanTier::Premium => Self {
                tier,
                window_token_limit: 50_000,
                window_duration_hours: 3,
                daily_token_limit: 200_000,
                daily_deck_limit: Some(10),
                monthly_deck_limit: Some(100),
            },
        }
    }

    /// Returns true if this tier may generate decks at all.
    pub fn has_deck_entitlement(&self) -> bool {
        self.daily_deck_limit.is_some()
    }
}
