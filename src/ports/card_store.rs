//! CardStore port - Flashcard persistence.

use async_trait::async_trait;

use crate::domain::foundation::{CardId, DeckId, DomainError, ErrorCode};
use crate::domain::scheduler::{CardMemoryState, CardRecord};

/// Port for flashcard persistence.
///
/// Implementations must keep the read-modify-write cycle for a single
/// card effectively atomic per card id; no cross-card coordination is
/// required.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Fetches a card by id, None if it does not exist.
    async fn get(&self, card_id: &CardId) -> Result<Option<CardRecord>, CardStoreError>;

    /// Persists a card's new memory state.
    async fn update_memory_state(
        &self,
        card_id: &CardId,
        memory: CardMemoryState,
    ) -> Result<(), CardStoreError>;

    /// Lists all cards in a deck. Empty vec if the deck has no cards.
    async fn list_by_deck(&self, deck_id: &DeckId) -> Result<Vec<CardRecord>, CardStoreError>;
}

/// Errors from the card store.
#[derive(Debug, thiserror::Error)]
pub enum CardStoreError {
    /// Card to update does not exist.
    #[error("card not found: {0}")]
    CardNotFound(String),

    /// Backend read/write failure.
    #[error("card store unavailable: {0}")]
    Unavailable(String),
}

impl From<CardStoreError> for DomainError {
    fn from(err: CardStoreError) -> Self {
        match err {
            CardStoreError::CardNotFound(id) => {
                DomainError::new(ErrorCode::CardNotFound, "Card not found")
                    .with_detail("card_id", id)
            }
            CardStoreError::Unavailable(msg) => DomainError::new(ErrorCode::StoreError, msg),
        }
    }
}
