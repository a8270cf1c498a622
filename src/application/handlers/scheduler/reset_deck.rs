//! ResetDeckHandler - Command handler for wiping a deck's progress.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DeckId, DomainError, ErrorCode, UserId};
use crate::domain::scheduler::CardMemoryState;
use crate::ports::{CardStore, Clock};

/// Command to reset every card in a deck to the never-reviewed state.
#[derive(Debug, Clone)]
pub struct ResetDeckCommand {
    pub user_id: UserId,
    pub deck_id: DeckId,
}

/// Result of a deck reset.
#[derive(Debug, Clone)]
pub struct ResetDeckResult {
    pub cards_reset: usize,
}

/// Handler for restarting a deck from scratch.
///
/// Used when a student re-takes a course unit. Each card goes back to
/// the New state with its scheduling history cleared.
pub struct ResetDeckHandler {
    card_store: Arc<dyn CardStore>,
    clock: Arc<dyn Clock>,
}

impl ResetDeckHandler {
    pub fn new(card_store: Arc<dyn CardStore>, clock: Arc<dyn Clock>) -> Self {
        Self { card_store, clock }
    }

    pub async fn handle(&self, command: ResetDeckCommand) -> Result<ResetDeckResult, DomainError> {
        let cards = self.card_store.list_by_deck(&command.deck_id).await?;

        if cards.iter().any(|c| c.user_id != command.user_id) {
            return Err(DomainError::new(
                ErrorCode::AccessDenied,
                "Deck belongs to another user",
            )
            .with_detail("deck_id", command.deck_id.to_string()));
        }

        let now = self.clock.now();
        let cards_reset = cards.len();
        for card in cards {
            self.card_store
                .update_memory_state(&card.id, CardMemoryState::new_card(now))
                .await?;
        }

        info!(deck_id = %command.deck_id, cards_reset, "deck reset");

        Ok(ResetDeckResult { cards_reset })
    }
}
