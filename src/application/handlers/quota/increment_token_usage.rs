//! IncrementTokenUsageHandler - Command handler recording token spend.

use std::sync::Arc;

use tracing::error;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::quota::{evaluate_tokens, PlanLimits, QuotaDecision, QuotaState, ResetPolicy};
use crate::ports::{Clock, QuotaStore};

/// Command to record the tokens consumed by one completed AI call.
#[derive(Debug, Clone)]
pub struct IncrementTokenUsageCommand {
    pub user_id: UserId,
    pub tokens: u64,
}

/// Result of recording token usage.
#[derive(Debug, Clone)]
pub struct IncrementTokenUsageResult {
    /// Quota standing after the increment was applied.
    pub decision: QuotaDecision,
}

/// Handler recording token consumption against every horizon.
///
/// Unlike a check, a lost increment is silent under-counting, so store
/// failures here are surfaced to the caller and logged at error level.
/// Counters may exceed their limits; the excess shows up in the next
/// check's decision rather than being clamped.
pub struct IncrementTokenUsageHandler {
    quota_store: Arc<dyn QuotaStore>,
    clock: Arc<dyn Clock>,
    reset_policy: ResetPolicy,
}

impl IncrementTokenUsageHandler {
    pub fn new(quota_store: Arc<dyn QuotaStore>, clock: Arc<dyn Clock>, reset_policy: ResetPolicy) -> Self {
        Self {
            quota_store,
            clock,
            reset_policy,
        }
    }

    pub async fn handle(
        &self,
        command: IncrementTokenUsageCommand,
    ) -> Result<IncrementTokenUsageResult, DomainError> {
        if command.tokens == 0 {
            return Err(DomainError::validation("tokens", "Token count must be positive"));
        }

        let now = self.clock.now();

        let mut state = self
            .quota_store
            .get(&command.user_id)
            .await
            .map_err(|e| {
                error!(user_id = %command.user_id, error = %e, "token usage increment lost: read failed");
                e
            })?
            .unwrap_or_else(|| QuotaState::new_free(command.user_id.clone(), now));

        let limits = PlanLimits::for_tier(state.plan_tier);
        state.apply_pending_resets(&limits, &self.reset_policy, now);
        state.record_tokens(command.tokens);

        self.quota_store.upsert(&state).await.map_err(|e| {
            error!(
                user_id = %command.user_id,
                tokens = command.tokens,
                error = %e,
                "token usage increment lost: write failed"
            );
            e
        })?;

        Ok(IncrementTokenUsageResult {
            decision: evaluate_tokens(&state, &limits, &self.reset_policy, now),
        })
    }
}
