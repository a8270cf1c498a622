//! Review scheduler - FSRS-based spaced-repetition scheduling.
//!
//! Maintains a per-card memory model (stability, difficulty, due date,
//! state) advanced by review ratings, and orders a deck's cards by
//! urgency for a study session. All functions are pure: the clock and
//! the random source used for interval fuzz are injected.

mod card;
mod config;
mod due_queue;
mod fsrs;
mod fuzz;
mod memory_state;
mod review;

pub use card::CardRecord;
pub use config::{EducationTier, SchedulerConfig};
pub use due_queue::{select_due_cards, DueCard};
pub use fsrs::{interval_for_retention, retrievability};
pub use fuzz::{MidpointSource, RandomSource};
pub use memory_state::CardMemoryState;
pub use review::{preview, review, ReviewOutcome, SchedulingPreview};
