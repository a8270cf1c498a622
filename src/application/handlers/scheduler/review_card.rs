//! ReviewCardHandler - Command handler for grading a flashcard.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::foundation::{CardId, DomainError, ErrorCode, ReviewRating, UserId};
use crate::domain::scheduler::{review, RandomSource, ReviewOutcome, SchedulerConfig};
use crate::ports::{CardStore, Clock};

/// Command to grade one flashcard recall attempt.
#[derive(Debug, Clone)]
pub struct ReviewCardCommand {
    pub user_id: UserId,
    pub card_id: CardId,
    /// Rating on the 1-4 scale; validated before scheduling.
    pub rating: u8,
}

/// Result of grading a card.
#[derive(Debug, Clone)]
pub struct ReviewCardResult {
    pub outcome: ReviewOutcome,
}

/// Handler for grading flashcards.
///
/// Loads the card, advances its memory state through the scheduler, and
/// persists the new state. A card belonging to a different user is
/// reported as not found so card ids cannot be probed across accounts.
pub struct ReviewCardHandler {
    card_store: Arc<dyn CardStore>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl ReviewCardHandler {
    pub fn new(
        card_store: Arc<dyn CardStore>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            card_store,
            clock,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub async fn handle(&self, command: ReviewCardCommand) -> Result<ReviewCardResult, DomainError> {
        let rating = ReviewRating::try_from_u8(command.rating)?;

        let card = self
            .card_store
            .get(&command.card_id)
            .await?
            .filter(|card| card.user_id == command.user_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CardNotFound, "Card not found")
                    .with_detail("card_id", command.card_id.to_string())
            })?;

        let now = self.clock.now();
        let (next, outcome) = {
            let mut rng = self.rng.lock().await;
            review(&card.memory, rating, &self.config, now, rng.as_mut())
        };

        self.card_store
            .update_memory_state(&command.card_id, next)
            .await?;

        debug!(
            card_id = %command.card_id,
            rating = %rating,
            state = ?outcome.new_state,
            interval_days = outcome.interval_days,
            "card reviewed"
        );

        Ok(ReviewCardResult { outcome })
    }
}
