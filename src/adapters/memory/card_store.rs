//! In-memory card store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CardId, DeckId};
use crate::domain::scheduler::{CardMemoryState, CardRecord};
use crate::ports::{CardStore, CardStoreError};

/// Card store backed by a map guarded by a single lock.
///
/// The lock makes each read-modify-write atomic per call, which
/// satisfies the per-card consistency requirement on one node.
#[derive(Debug, Default)]
pub struct InMemoryCardStore {
    cards: Arc<RwLock<HashMap<CardId, CardRecord>>>,
}

impl InMemoryCardStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with cards.
    pub fn with_cards(cards: Vec<CardRecord>) -> Self {
        let map = cards.into_iter().map(|c| (c.id, c)).collect();
        Self {
            cards: Arc::new(RwLock::new(map)),
        }
    }

    /// Inserts or replaces a card.
    pub async fn insert(&self, card: CardRecord) {
        self.cards.write().await.insert(card.id, card);
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn get(&self, card_id: &CardId) -> Result<Option<CardRecord>, CardStoreError> {
        Ok(self.cards.read().await.get(card_id).cloned())
    }

    async fn update_memory_state(
        &self,
        card_id: &CardId,
        memory: CardMemoryState,
    ) -> Result<(), CardStoreError> {
        let mut cards = self.cards.write().await;
        let card = cards
            .get_mut(card_id)
            .ok_or_else(|| CardStoreError::CardNotFound(card_id.to_string()))?;
        card.memory = memory;
        Ok(())
    }

    async fn list_by_deck(&self, deck_id: &DeckId) -> Result<Vec<CardRecord>, CardStoreError> {
        let cards = self.cards.read().await;
        let mut in_deck: Vec<CardRecord> = cards
            .values()
            .filter(|c| &c.deck_id == deck_id)
            .cloned()
            .collect();
        in_deck.sort_by_key(|c| c.position);
        Ok(in_deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};

    fn card(deck_id: DeckId, position: u32) -> CardRecord {
        CardRecord {
            id: CardId::new(),
            deck_id,
            user_id: UserId::new("student-1").unwrap(),
            position,
            front: "q".to_string(),
            back: "a".to_string(),
            memory: CardMemoryState::new_card(Timestamp::from_unix_secs(1_700_000_000)),
        }
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_card() {
        let store = InMemoryCardStore::new();
        assert!(store.get(&CardId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_memory_state_persists() {
        let deck = DeckId::new();
        let c = card(deck, 0);
        let id = c.id;
        let store = InMemoryCardStore::with_cards(vec![c]);

        let mut memory = store.get(&id).await.unwrap().unwrap().memory;
        memory.reps = 5;
        store.update_memory_state(&id, memory).await.unwrap();

        assert_eq!(store.get(&id).await.unwrap().unwrap().memory.reps, 5);
    }

    #[tokio::test]
    async fn update_missing_card_errors() {
        let store = InMemoryCardStore::new();
        let memory = CardMemoryState::new_card(Timestamp::from_unix_secs(1_700_000_000));
        let err = store.update_memory_state(&CardId::new(), memory).await;
        assert!(matches!(err, Err(CardStoreError::CardNotFound(_))));
    }

    #[tokio::test]
    async fn list_by_deck_filters_and_orders() {
        let deck = DeckId::new();
        let other = DeckId::new();
        let store = InMemoryCardStore::with_cards(vec![
            card(deck, 2),
            card(other, 0),
            card(deck, 1),
        ]);

        let listed = store.list_by_deck(&deck).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].position, 1);
        assert_eq!(listed[1].position, 2);
    }
}
