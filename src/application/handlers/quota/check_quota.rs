//! CheckQuotaHandler - Query handler for the token quota gate.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::quota::{evaluate_tokens, PlanLimits, QuotaDecision, QuotaState, ResetPolicy};
use crate::ports::{Clock, QuotaStore};

/// Query for whether a user may start a tutoring request.
#[derive(Debug, Clone)]
pub struct CheckQuotaQuery {
    pub user_id: UserId,
}

/// Result of a token quota check.
#[derive(Debug, Clone)]
pub struct CheckQuotaResult {
    pub decision: QuotaDecision,
}

/// Handler gating every tutoring request on the token quota.
///
/// Runs before each AI call, so it degrades rather than blocks: a store
/// read failure is logged and answered as if the user were fresh. A
/// user never seen before gets a lazily created free-tier state, which
/// is only persisted once a reset actually fires.
pub struct CheckQuotaHandler {
    quota_store: Arc<dyn QuotaStore>,
    clock: Arc<dyn Clock>,
    reset_policy: ResetPolicy,
}

impl CheckQuotaHandler {
    pub fn new(quota_store: Arc<dyn QuotaStore>, clock: Arc<dyn Clock>, reset_policy: ResetPolicy) -> Self {
        Self {
            quota_store,
            clock,
            reset_policy,
        }
    }

    pub async fn handle(&self, query: CheckQuotaQuery) -> Result<CheckQuotaResult, DomainError> {
        let now = self.clock.now();

        let mut state = match self.quota_store.get(&query.user_id).await {
            Ok(Some(state)) => state,
            Ok(None) => QuotaState::new_free(query.user_id.clone(), now),
            Err(e) => {
                warn!(user_id = %query.user_id, error = %e, "quota read failed, allowing request");
                let state = QuotaState::new_free(query.user_id.clone(), now);
                let limits = PlanLimits::for_tier(state.plan_tier);
                return Ok(CheckQuotaResult {
                    decision: evaluate_tokens(&state, &limits, &self.reset_policy, now),
                });
            }
        };

        let limits = PlanLimits::for_tier(state.plan_tier);
        if state.apply_pending_resets(&limits, &self.reset_policy, now).any() {
            if let Err(e) = self.quota_store.upsert(&state).await {
                warn!(user_id = %query.user_id, error = %e, "failed to persist quota resets");
            }
        }

        Ok(CheckQuotaResult {
            decision: evaluate_tokens(&state, &limits, &self.reset_policy, now),
        })
    }
}
