//! Per-user quota state and reset application.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanTier, Timestamp, UserId};

use super::limits::PlanLimits;
use super::reset::ResetPolicy;

/// Mutable quota counters for one user.
///
/// Created lazily on first check (free tier) and never deleted; the
/// lifetime counters double as an audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaState {
    pub user_id: UserId,
    pub plan_tier: PlanTier,

    /// Rolling-window counter and its anchor.
    pub window_tokens_used: u64,
    pub window_start_at: Timestamp,

    /// Daily counter and its anchor; the anchor also governs the
    /// daily deck counter.
    pub tokens_used_today: u64,
    pub last_reset_at: Timestamp,

    /// Informational weekly counter and its anchor.
    pub tokens_used_this_week: u64,
    pub last_weekly_reset_at: Timestamp,

    /// Deck-generation counters (premium entitlement).
    pub decks_generated_today: u32,
    pub decks_generated_this_month: u32,
    pub last_monthly_reset_at: Timestamp,

    /// Lifetime counters, never reset.
    pub total_tokens_used: u64,
    pub total_messages_count: u64,
}

/// Which reset rules fired during a call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedResets {
    pub window: bool,
    pub daily: bool,
    pub weekly: bool,
    pub monthly: bool,
}

impl AppliedResets {
    /// Returns true if any rule fired and state needs persisting.
    pub fn any(&self) -> bool {
        self.window || self.daily || self.weekly || self.monthly
    }
}

impl QuotaState {
    /// Default state for a user seen for the first time.
    pub fn new_free(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            plan_tier: PlanTier::Free,
            window_tokens_used: 0,
            window_start_at: now,
            tokens_used_today: 0,
            last_reset_at: now,
            tokens_used_this_week: 0,
            last_weekly_reset_at: now,
            decks_generated_today: 0,
            decks_generated_this_month: 0,
            last_monthly_reset_at: now,
            total_tokens_used: 0,
            total_messages_count: 0,
        }
    }

    /// Applies every reset rule whose trigger has elapsed.
    ///
    /// The four rules are independent and idempotent: a user returning
    /// after weeks away fires all of them in one call, and calling
    /// again immediately is a no-op.
    pub fn apply_pending_resets(
        &mut self,
        limits: &PlanLimits,
        policy: &ResetPolicy,
        now: Timestamp,
    ) -> AppliedResets {
        let mut applied = AppliedResets::default();

        let window_hours = limits.window_duration_hours as i64;
        if now.duration_since(&self.window_start_at).num_hours() >= window_hours {
            self.window_tokens_used = 0;
            self.window_start_at = now;
            applied.window = true;
        }

        let daily_anchor = policy.most_recent_daily_anchor(now);
        if self.last_reset_at.is_before(&daily_anchor) {
            self.tokens_used_today = 0;
            self.decks_generated_today = 0;
            self.last_reset_at = now;
            applied.daily = true;
        }

        let week_start = policy.most_recent_week_start(now);
        if self.last_weekly_reset_at.is_before(&week_start) {
            self.tokens_used_this_week = 0;
            self.last_weekly_reset_at = now;
            applied.weekly = true;
        }

        let month_start = policy.most_recent_month_start(now);
        if self.last_monthly_reset_at.is_before(&month_start) {
            self.decks_generated_this_month = 0;
            self.last_monthly_reset_at = now;
            applied.monthly = true;
        }

        applied
    }

    /// Adds token consumption to every horizon and the lifetime totals.
    ///
    /// Counters may exceed their limits; over-limit is reported by the
    /// decision layer, never prevented here.
    pub fn record_tokens(&mut self, tokens: u64) {
        self.window_tokens_used += tokens;
        self.tokens_used_today += tokens;
        self.tokens_used_this_week += tokens;
        self.total_tokens_used += tokens;
        self.total_messages_count += 1;
    }

    /// Records one deck generation.
    pub fn record_deck_generation(&mut self) {
        self.decks_generated_today += 1;
        self.decks_generated_this_month += 1;
    }
}
