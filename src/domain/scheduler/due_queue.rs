//! Due-card selection and urgency ordering for a study session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardState, Timestamp};

use super::card::CardRecord;

/// A card selected for a study session, with its urgency flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueCard {
    pub card: CardRecord,
    /// Due more than 24 hours in the past.
    pub overdue: bool,
}

/// Urgency buckets, ascending = served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    /// Review/Relearning cards more than a day past due.
    Overdue,
    /// Learning-phase cards due but not yet overdue.
    LearningDue,
    /// Review cards due today.
    DueToday,
    /// Never-reviewed cards, only when requested.
    New,
}

/// Selects and orders the cards due for review in a deck.
///
/// Ordering: overdue cards first (most overdue leading), then
/// learning-phase cards, then review cards due today by ascending
/// stability, then New cards in display order. Truncated to `limit`.
/// An empty or all-future deck yields an empty list.
pub fn select_due_cards(
    cards: Vec<CardRecord>,
    now: Timestamp,
    limit: usize,
    include_new: bool,
) -> Vec<DueCard> {
    let mut keyed: Vec<(Bucket, f64, DueCard)> = cards
        .into_iter()
        .filter_map(|card| {
            let memory = card.memory;
            if memory.state.is_new() {
                if !include_new {
                    return None;
                }
                let due = DueCard { card, overdue: false };
                return Some((Bucket::New, due.card.position as f64, due));
            }
            if !memory.is_due(now) {
                return None;
            }
            let overdue = memory.is_overdue(now);
            let (bucket, key) = if overdue && !matches!(memory.state, CardState::Learning) {
                // More days overdue sorts earlier.
                (Bucket::Overdue, -now.days_since(&memory.due))
            } else if memory.state.is_learning_phase() {
                (Bucket::LearningDue, memory.due.as_unix_secs() as f64)
            } else {
                (Bucket::DueToday, memory.stability)
            };
            Some((bucket, key, DueCard { card, overdue }))
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    keyed.into_iter().take(limit).map(|(_, _, due)| due).collect()
}
