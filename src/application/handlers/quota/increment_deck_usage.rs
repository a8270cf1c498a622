//! IncrementDeckUsageHandler - Command handler recording a deck generation.

use std::sync::Arc;

use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::quota::{evaluate_decks, DeckQuotaDecision, PlanLimits, QuotaState, ResetPolicy};
use crate::ports::{Clock, QuotaStore};

/// Command to record one completed deck generation.
#[derive(Debug, Clone)]
pub struct IncrementDeckUsageCommand {
    pub user_id: UserId,
}

/// Result of recording a deck generation.
#[derive(Debug, Clone)]
pub struct IncrementDeckUsageResult {
    /// Deck quota standing after the increment.
    pub decision: DeckQuotaDecision,
}

/// Handler recording deck generations against the daily and monthly caps.
///
/// Store failures are surfaced and logged at error level, matching the
/// token increment path: a silently lost increment would let a user
/// exceed their plan.
pub struct IncrementDeckUsageHandler {
    quota_store: Arc<dyn QuotaStore>,
    clock: Arc<dyn Clock>,
    reset_policy: ResetPolicy,
}

impl IncrementDeckUsageHandler {
    pub fn new(quota_store: Arc<dyn QuotaStore>, clock: Arc<dyn Clock>, reset_policy: ResetPolicy) -> Self {
        Self {
            quota_store,
            clock,
            reset_policy,
        }
    }

    pub async fn handle(
        &self,
        command: IncrementDeckUsageCommand,
    ) -> Result<IncrementDeckUsageResult, DomainError> {
        let now = self.clock.now();

        let mut state = self
            .quota_store
            .get(&command.user_id)
            .await
            .map_err(|e| {
                error!(user_id = %command.user_id, error = %e, "deck usage increment lost: read failed");
                e
            })?
            .unwrap_or_else(|| QuotaState::new_free(command.user_id.clone(), now));

        let limits = PlanLimits::for_tier(state.plan_tier);
        if !limits.has_deck_entitlement() {
            return Err(DomainError::new(
                ErrorCode::AccessDenied,
                "Deck generation requires a premium plan",
            )
            .with_detail("plan_tier", state.plan_tier.to_string()));
        }

        state.apply_pending_resets(&limits, &self.reset_policy, now);
        state.record_deck_generation();

        self.quota_store.upsert(&state).await.map_err(|e| {
            error!(user_id = %command.user_id, error = %e, "deck usage increment lost: write failed");
            e
        })?;

        Ok(IncrementDeckUsageResult {
            decision: evaluate_decks(&state, &limits),
        })
    }
}
