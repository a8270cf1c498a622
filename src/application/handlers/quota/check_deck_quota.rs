//! CheckDeckQuotaHandler - Query handler for the deck-generation gate.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::quota::{evaluate_decks, DeckQuotaDecision, PlanLimits, QuotaState, ResetPolicy};
use crate::ports::{Clock, QuotaStore};

/// Query for whether a user may generate another deck.
#[derive(Debug, Clone)]
pub struct CheckDeckQuotaQuery {
    pub user_id: UserId,
}

/// Result of a deck quota check.
#[derive(Debug, Clone)]
pub struct CheckDeckQuotaResult {
    pub decision: DeckQuotaDecision,
}

/// Handler gating deck generation on the per-day and per-month caps.
///
/// Deck generation is an expensive batch job, so unlike the token gate
/// this check does not fail open: a store outage is surfaced and the
/// generation waits.
pub struct CheckDeckQuotaHandler {
    quota_store: Arc<dyn QuotaStore>,
    clock: Arc<dyn Clock>,
    reset_policy: ResetPolicy,
}

impl CheckDeckQuotaHandler {
    pub fn new(quota_store: Arc<dyn QuotaStore>, clock: Arc<dyn Clock>, reset_policy: ResetPolicy) -> Self {
        Self {
            quota_store,
            clock,
            reset_policy,
        }
    }

    pub async fn handle(&self, query: CheckDeckQuotaQuery) -> Result<CheckDeckQuotaResult, DomainError> {
        let now = self.clock.now();

        let mut state = self
            .quota_store
            .get(&query.user_id)
            .await?
            .unwrap_or_else(|| QuotaState::new_free(query.user_id.clone(), now));

        let limits = PlanLimits::for_tier(state.plan_tier);
        if state.apply_pending_resets(&limits, &self.reset_policy, now).any() {
            if let Err(e) = self.quota_store.upsert(&state).await {
                warn!(user_id = %query.user_id, error = %e, "failed to persist quota resets");
            }
        }

        Ok(CheckDeckQuotaResult {
            decision: evaluate_decks(&state, &limits),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryQuotaStore};
    use crate::domain::foundation::{ErrorCode, PlanTier, Timestamp};

    fn now() -> Timestamp {
        // 2024-03-15T11:00:00Z
        Timestamp::from_unix_secs(1_710_500_400)
    }

    fn user() -> UserId {
        UserId::new("student-1").unwrap()
    }

    fn premium_state(decks_today: u32, decks_month: u32) -> QuotaState {
        let mut state = QuotaState::new_free(user(), now());
        state.plan_tier = PlanTier::Premium;
        state.decks_generated_today = decks_today;
        state.decks_generated_this_month = decks_month;
        state
    }

    fn handler(store: Arc<InMemoryQuotaStore>, clock: Arc<FixedClock>) -> CheckDeckQuotaHandler {
        CheckDeckQuotaHandler::new(store, clock, ResetPolicy::new(0, 10).unwrap())
    }

    #[tokio::test]
    async fn free_user_is_denied_with_upgrade_message() {
        let store = Arc::new(InMemoryQuotaStore::new());
        let clock = Arc::new(FixedClock::at(now()));

        let result = handler(store, clock)
            .handle(CheckDeckQuotaQuery { user_id: user() })
            .await
            .unwrap();

        assert!(!result.decision.allowed);
        assert!(result.decision.message.unwrap().contains("premium"));
    }

    #[tokio::test]
    async fn premium_user_under_limits_is_allowed() {
        let store = Arc::new(InMemoryQuotaStore::new());
        let clock = Arc::new(FixedClock::at(now()));
        store.upsert(&premium_state(3, 40)).await.unwrap();

        let result = handler(store, clock)
            .handle(CheckDeckQuotaQuery { user_id: user() })
            .await
            .unwrap();

        assert!(result.decision.allowed);
        assert_eq!(result.decision.daily.remaining, 7);
        assert_eq!(result.decision.monthly.remaining, 60);
    }

    #[tokio::test]
    async fn daily_cap_clears_at_the_next_anchor() {
        let store = Arc::new(InMemoryQuotaStore::new());
        let clock = Arc::new(FixedClock::at(now()));
        store.upsert(&premium_state(10, 40)).await.unwrap();

        let h = handler(store, clock.clone());
        let blocked = h.handle(CheckDeckQuotaQuery { user_id: user() }).await.unwrap();
        assert!(!blocked.decision.allowed);

        clock.advance_days(1);
        let after = h.handle(CheckDeckQuotaQuery { user_id: user() }).await.unwrap();
        assert!(after.decision.allowed);
        assert_eq!(after.decision.daily.used, 0);
        // Monthly usage survives the daily reset.
        assert_eq!(after.decision.monthly.used, 40);
    }

    #[tokio::test]
    async fn store_outage_is_surfaced() {
        let store = Arc::new(InMemoryQuotaStore::new());
        let clock = Arc::new(FixedClock::at(now()));
        store.poison_reads().await;

        let err = handler(store, clock)
            .handle(CheckDeckQuotaQuery { user_id: user() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreError);
    }
}
