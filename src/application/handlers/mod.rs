//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod quota;
pub mod scheduler;

pub use quota::{
    CheckDeckQuotaHandler, CheckDeckQuotaQuery, CheckDeckQuotaResult,
    CheckQuotaHandler, CheckQuotaQuery, CheckQuotaResult,
    IncrementDeckUsageCommand, IncrementDeckUsageHandler, IncrementDeckUsageResult,
    IncrementTokenUsageCommand, IncrementTokenUsageHandler, IncrementTokenUsageResult,
};
pub use scheduler::{
    GetDueCardsHandler, GetDueCardsQuery, GetDueCardsResult,
    PreviewSchedulingHandler, PreviewSchedulingQuery, PreviewSchedulingResult,
    ResetDeckCommand, ResetDeckHandler, ResetDeckResult,
    ReviewCardCommand, ReviewCardHandler, ReviewCardResult,
};
