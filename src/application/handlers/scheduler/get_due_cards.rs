//! GetDueCardsHandler - Query handler for a deck's study queue.

use std::sync::Arc;

use crate::domain::foundation::{DeckId, DomainError, ErrorCode, UserId};
use crate::domain::scheduler::{select_due_cards, DueCard};
use crate::ports::{CardStore, Clock};

/// Default number of cards served when the query does not set a limit.
const DEFAULT_SESSION_LIMIT: usize = 20;

/// Query for the cards due in one deck, ordered by urgency.
#[derive(Debug, Clone)]
pub struct GetDueCardsQuery {
    pub user_id: UserId,
    pub deck_id: DeckId,
    /// Session size cap; defaults to 20 when None.
    pub limit: Option<usize>,
    /// Whether never-reviewed cards join the end of the queue.
    pub include_new: bool,
}

/// Result of a due-cards query.
#[derive(Debug, Clone)]
pub struct GetDueCardsResult {
    pub cards: Vec<DueCard>,
}

/// Handler for building a study session queue.
///
/// A deck with no cards and a deck where nothing is due both yield an
/// empty queue; a deck owned by someone else is an access error.
pub struct GetDueCardsHandler {
    card_store: Arc<dyn CardStore>,
    clock: Arc<dyn Clock>,
}

impl GetDueCardsHandler {
    pub fn new(card_store: Arc<dyn CardStore>, clock: Arc<dyn Clock>) -> Self {
        Self { card_store, clock }
    }

    pub async fn handle(&self, query: GetDueCardsQuery) -> Result<GetDueCardsResult, DomainError> {
        let cards = self.card_store.list_by_deck(&query.deck_id).await?;

        if cards.iter().any(|c| c.user_id != query.user_id) {
            return Err(DomainError::new(
                ErrorCode::AccessDenied,
                "Deck belongs to another user",
            )
            .with_detail("deck_id", query.deck_id.to_string()));
        }

        let limit = query.limit.unwrap_or(DEFAULT_SESSION_LIMIT);
        let due = select_due_cards(cards, self.clock.now(), limit, query.include_new);

        Ok(GetDueCardsResult { cards: due })
    }
}
