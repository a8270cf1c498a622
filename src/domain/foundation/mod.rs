//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Study Coach domain.

mod card_state;
mod errors;
mod ids;
mod plan_tier;
mod review_rating;
mod timestamp;

pub use card_state::CardState;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CardId, DeckId, UserId};
pub use plan_tier::PlanTier;
pub use review_rating::ReviewRating;
pub use timestamp::Timestamp;
