//! Flashcard record as seen by the scheduler.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardId, DeckId, UserId};

use super::CardMemoryState;

/// A flashcard with its scheduling state.
///
/// Content fields carry the prompt and answer verbatim; the scheduler
/// only reads `position` (display order for New cards) and `memory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub deck_id: DeckId,
    /// Owner of the deck this card belongs to.
    pub user_id: UserId,
    /// Display-order position within the deck.
    pub position: u32,
    /// Question side shown to the student.
    pub front: String,
    /// Answer side.
    pub back: String,
    /// Scheduler memory model.
    pub memory: CardMemoryState,
}
