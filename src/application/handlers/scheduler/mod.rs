//! Scheduler handlers.
//!
//! Command and query handlers for the review scheduler:
//!
//! ## Commands
//! - Grading a flashcard recall attempt
//! - Resetting a deck's scheduling history
//!
//! ## Queries
//! - Building a study session queue
//! - Previewing scheduling outcomes per rating

mod get_due_cards;
mod preview_scheduling;
mod reset_deck;
mod review_card;

// Commands
pub use reset_deck::{ResetDeckCommand, ResetDeckHandler, ResetDeckResult};
pub use review_card::{ReviewCardCommand, ReviewCardHandler, ReviewCardResult};

// Queries
pub use get_due_cards::{GetDueCardsHandler, GetDueCardsQuery, GetDueCardsResult};
pub use preview_scheduling::{
    PreviewSchedulingHandler, PreviewSchedulingQuery, PreviewSchedulingResult,
};
