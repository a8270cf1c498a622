//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Scheduler handlers
    GetDueCardsHandler, GetDueCardsQuery, GetDueCardsResult,
    PreviewSchedulingHandler, PreviewSchedulingQuery, PreviewSchedulingResult,
    ResetDeckCommand, ResetDeckHandler, ResetDeckResult,
    ReviewCardCommand, ReviewCardHandler, ReviewCardResult,
    // Quota handlers
    CheckDeckQuotaHandler, CheckDeckQuotaQuery, CheckDeckQuotaResult,
    CheckQuotaHandler, CheckQuotaQuery, CheckQuotaResult,
    IncrementDeckUsageCommand, IncrementDeckUsageHandler, IncrementDeckUsageResult,
    IncrementTokenUsageCommand, IncrementTokenUsageHandler, IncrementTokenUsageResult,
};
