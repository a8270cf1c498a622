//! Quota decision records and their evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::limits::PlanLimits;
use super::reset::ResetPolicy;
use super::state::QuotaState;
use super::usage_mode::UsageMode;

/// Which time horizon produced the governing usage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingLimit {
    Window,
    Daily,
}

/// Usage figures for one time horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonUsage {
    pub used: u64,
    pub limit: u64,
    pub remaining: u64,
    /// Fraction of the limit consumed; may exceed 1.0.
    pub percent: f64,
}

impl HorizonUsage {
    fn from_counts(used: u64, limit: u64) -> Self {
        let percent = if limit == 0 {
            1.0
        } else {
            used as f64 / limit as f64
        };
        Self {
            used,
            limit,
            remaining: limit.saturating_sub(used),
            percent,
        }
    }
}

/// Decision returned by a token quota check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaDecision {
    pub allowed: bool,
    pub mode: UsageMode,
    pub window: HorizonUsage,
    pub daily: HorizonUsage,
    /// The horizon whose percentage governed the mode.
    pub binding_limit: BindingLimit,
    /// Human-readable time until the rolling window refreshes.
    pub window_resets_in: String,
    /// Human-readable time until the daily anchor reset.
    pub daily_resets_in: String,
    /// Delay the caller should insert before responding, if throttled.
    pub throttle_delay_ms: Option<u64>,
    /// User-facing message for elevated modes.
    pub message: Option<String>,
}

/// Deck-generation usage for one horizon (discrete events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckUsage {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

impl DeckUsage {
    fn from_counts(used: u32, limit: u32) -> Self {
        Self {
            used,
            limit,
            remaining: limit.saturating_sub(used),
        }
    }
}

/// Decision returned by a deck quota check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckQuotaDecision {
    pub allowed: bool,
    pub daily: DeckUsage,
    pub monthly: DeckUsage,
    pub message: Option<String>,
}

/// Evaluates the token quota decision for a state with resets applied.
pub fn evaluate_tokens(
    state: &QuotaState,
    limits: &PlanLimits,
    policy: &ResetPolicy,
    now: Timestamp,
) -> QuotaDecision {
    let window = HorizonUsage::from_counts(state.window_tokens_used, limits.window_token_limit);
    let daily = HorizonUsage::from_counts(state.tokens_used_today, limits.daily_token_limit);

    let binding_limit = if window.percent >= daily.percent {
        BindingLimit::Window
    } else {
        BindingLimit::Daily
    };
    let governing = window.percent.max(daily.percent);
    let mode = UsageMode::from_percent(governing);
    let allowed = window.remaining.min(daily.remaining) > 0;

    let window_refresh = state
        .window_start_at
        .plus_hours(limits.window_duration_hours as i64);

    QuotaDecision {
        allowed,
        mode,
        window,
        daily,
        binding_limit,
        window_resets_in: humanize_until(now, window_refresh),
        daily_resets_in: humanize_until(now, policy.next_daily_anchor(now)),
        throttle_delay_ms: mode.throttle_delay_ms(),
        message: mode.message().map(str::to_string),
    }
}

/// Evaluates the deck-generation quota decision.
///
/// Free-tier callers are expected to be filtered out upstream; a state
/// without deck entitlement is denied with an explanatory message.
pub fn evaluate_decks(state: &QuotaState, limits: &PlanLimits) -> DeckQuotaDecision {
    let (Some(daily_limit), Some(monthly_limit)) =
        (limits.daily_deck_limit, limits.monthly_deck_limit)
    else {
        return DeckQuotaDecision {
            allowed: false,
            daily: DeckUsage::from_counts(state.decks_generated_today, 0),
            monthly: DeckUsage::from_counts(state.decks_generated_this_month, 0),
            message: Some("Deck generation requires a premium plan.".to_string()),
        };
    };

    let daily = DeckUsage::from_counts(state.decks_generated_today, daily_limit);
    let monthly = DeckUsage::from_counts(state.decks_generated_this_month, monthly_limit);
    let allowed = daily.remaining > 0 && monthly.remaining > 0;

    DeckQuotaDecision {
        allowed,
        daily,
        monthly,
        message: (!allowed)
            .then(|| "You've reached your deck generation limit for now.".to_string()),
    }
}

/// Formats the time remaining until `until` as a short human string.
fn humanize_until(now: Timestamp, until: Timestamp) -> String {
    let secs = until.duration_since(&now).num_seconds();
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3_600;
    let minutes = (secs % 3_600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    }
}
