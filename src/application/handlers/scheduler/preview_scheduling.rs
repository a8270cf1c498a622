//! PreviewSchedulingHandler - Query handler for the four-button preview.

use std::sync::Arc;

use crate::domain::foundation::{CardId, DomainError, ErrorCode, UserId};
use crate::domain::scheduler::{preview, SchedulerConfig, SchedulingPreview};
use crate::ports::{CardStore, Clock};

/// Query for what each rating would do to a card.
#[derive(Debug, Clone)]
pub struct PreviewSchedulingQuery {
    pub user_id: UserId,
    pub card_id: CardId,
}

/// Result of a scheduling preview.
#[derive(Debug, Clone)]
pub struct PreviewSchedulingResult {
    pub preview: SchedulingPreview,
}

/// Handler for previewing scheduling outcomes without persisting.
///
/// Backs the interval hints shown under the rating buttons, so it is
/// called once per displayed card and must never mutate the card.
pub struct PreviewSchedulingHandler {
    card_store: Arc<dyn CardStore>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
}

impl PreviewSchedulingHandler {
    pub fn new(card_store: Arc<dyn CardStore>, clock: Arc<dyn Clock>, config: SchedulerConfig) -> Self {
        Self {
            card_store,
            clock,
            config,
        }
    }

    pub async fn handle(
        &self,
        query: PreviewSchedulingQuery,
    ) -> Result<PreviewSchedulingResult, DomainError> {
        let card = self
            .card_store
            .get(&query.card_id)
            .await?
            .filter(|card| card.user_id == query.user_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CardNotFound, "Card not found")
                    .with_detail("card_id", query.card_id.to_string())
            })?;

        Ok(PreviewSchedulingResult {
            preview: preview(&card.memory, &self.config, self.clock.now()),
        })
    }
}
