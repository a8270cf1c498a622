//! Quota manager - token and deck-generation quotas per user.
//!
//! Tracks consumption across a short rolling window and a daily cap,
//! derives a graduated usage mode, and applies timezone-anchored
//! resets. Pure state-advancing logic; persistence is injected through
//! the quota store port.

mod decision;
mod limits;
mod reset;
mod state;
mod usage_mode;

pub use decision::{
    evaluate_decks, evaluate_tokens, BindingLimit, DeckQuotaDecision, DeckUsage, HorizonUsage,
    QuotaDecision,
};
pub use limits::PlanLimits;
pub use reset::ResetPolicy;
pub use state::{AppliedResets, QuotaState};
pub use usage_mode::UsageMode;
