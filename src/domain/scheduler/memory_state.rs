//! Per-card memory model state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardState, Timestamp};

/// The scheduler's memory model for a single flashcard.
///
/// The scheduler does not own persistence: it receives a state,
/// computes a new one, and hands it back to the caller for storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardMemoryState {
    /// When the card should next be shown.
    pub due: Timestamp,
    /// Estimated days until retrievability decays to the target threshold.
    pub stability: f64,
    /// Intrinsic difficulty estimate, bounded to [1, 10].
    pub difficulty: f64,
    /// Count of successful reviews.
    pub reps: u32,
    /// Count of Again-rated (forgotten) reviews.
    pub lapses: u32,
    /// Phase in the scheduling state machine.
    pub state: CardState,
    /// When the card was last reviewed, if ever.
    pub last_review: Option<Timestamp>,
}

impl CardMemoryState {
    /// State for a card that has never been reviewed.
    ///
    /// `due` is set to the creation instant so the card is immediately
    /// available once New cards are requested.
    pub fn new_card(created_at: Timestamp) -> Self {
        Self {
            due: created_at,
            stability: 0.0,
            difficulty: 0.0,
            reps: 0,
            lapses: 0,
            state: CardState::New,
            last_review: None,
        }
    }

    /// Elapsed fractional days since the last review, zero if never
    /// reviewed or if the clock reads earlier than the last review.
    pub fn elapsed_days(&self, now: Timestamp) -> f64 {
        match self.last_review {
            Some(last) => now.days_since(&last).max(0.0),
            None => 0.0,
        }
    }

    /// Returns true if the card is due at the given instant.
    ///
    /// New cards are not "due" in the scheduling sense; they enter a
    /// session only when explicitly requested.
    pub fn is_due(&self, now: Timestamp) -> bool {
        !self.state.is_new() && self.due <= now
    }

    /// Returns true if the card is more than 24 hours past due.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.is_due(now) && now.days_since(&self.due) > 1.0
    }
}
