//! Quota handlers.
//!
//! Command and query handlers for the token and deck-generation quotas:
//!
//! ## Commands
//! - Recording token consumption after an AI call
//! - Recording a completed deck generation
//!
//! ## Queries
//! - Checking the token quota before an AI call
//! - Checking the deck-generation quota

mod check_deck_quota;
mod check_quota;
mod increment_deck_usage;
mod increment_token_usage;

// Commands
pub use increment_deck_usage::{
    IncrementDeckUsageCommand, IncrementDeckUsageHandler, IncrementDeckUsageResult,
};
pub use increment_token_usage::{
    IncrementTokenUsageCommand, IncrementTokenUsageHandler, IncrementTokenUsageResult,
};

// Queries
pub use check_deck_quota::{CheckDeckQuotaHandler, CheckDeckQuotaQuery, CheckDeckQuotaResult};
pub use check_quota::{CheckQuotaHandler, CheckQuotaQuery, CheckQuotaResult};
