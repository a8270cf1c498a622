//! Graduated usage modes derived from quota consumption.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Artificial delay the caller inserts while throttled.
const THROTTLE_DELAY_MS: u64 = 2_000;

/// Soft-limit mode derived from the governing usage percentage.
///
/// Thresholds apply to the more restrictive of window and daily usage:
/// below 70% is Normal; 70% Warning; 85% Throttle; at or past the
/// limit, Blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMode {
    /// No restriction.
    Normal,
    /// Display-only warning banner.
    Warning,
    /// Caller inserts an artificial delay before responding; a UX
    /// smoothing device, not a hard block.
    Throttle,
    /// Request denied until a reset frees capacity.
    Blocked,
}

impl UsageMode {
    /// Derives the mode from a usage fraction (1.0 = at the limit).
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 1.0 {
            UsageMode::Blocked
        } else if percent >= 0.85 {
            UsageMode::Throttle
        } else if percent >= 0.70 {
            UsageMode::Warning
        } else {
            UsageMode::Normal
        }
    }

    /// Delay in milliseconds the caller should honor, if any.
    ///
    /// The quota manager signals the delay; it never sleeps itself.
    pub fn throttle_delay_ms(&self) -> Option<u64> {
        match self {
            UsageMode::Throttle => Some(THROTTLE_DELAY_MS),
            _ => None,
        }
    }

    /// User-facing message for elevated modes.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            UsageMode::Normal => None,
            UsageMode::Warning => Some("You're approaching your usage limit."),
            UsageMode::Throttle => {
                Some("You're close to your usage limit; responses may be slower.")
            }
            UsageMode::Blocked => {
                Some("You've reached your usage limit. It will refresh automatically.")
            }
        }
    }

    /// Returns true if requests should be denied.
    pub fn is_blocked(&self) -> bool {
        matches!(self, UsageMode::Blocked)
    }
}

impl fmt::Display for UsageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UsageMode::Normal => "normal",
            UsageMode::Warning => "warning",
            UsageMode::Throttle => "throttle",
            UsageMode::Blocked => "blocked",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_thresholds_match_design() {
        assert_eq!(UsageMode::from_percent(0.0), UsageMode::Normal);
        assert_eq!(UsageMode::from_percent(0.69), UsageMode::Normal);
        assert_eq!(UsageMode::from_percent(0.70), UsageMode::Warning);
        assert_eq!(UsageMode::from_percent(0.84), UsageMode::Warning);
        assert_eq!(UsageMode::from_percent(0.85), UsageMode::Throttle);
        assert_eq!(UsageMode::from_percent(0.99), UsageMode::Throttle);
        assert_eq!(UsageMode::from_percent(1.0), UsageMode::Blocked);
        assert_eq!(UsageMode::from_percent(1.5), UsageMode::Blocked);
    }

    #[test]
    fn only_throttle_signals_a_delay() {
        assert_eq!(UsageMode::Throttle.throttle_delay_ms(), Some(2_000));
        assert_eq!(UsageMode::Normal.throttle_delay_ms(), None);
        assert_eq!(UsageMode::Warning.throttle_delay_ms(), None);
        assert_eq!(UsageMode::Blocked.throttle_delay_ms(), None);
    }

    #[test]
    fn normal_mode_has_no_message() {
        assert!(UsageMode::Normal.message().is_none());
        assert!(UsageMode::Warning.message().is_some());
        assert!(UsageMode::Blocked.message().is_some());
    }

    #[test]
    fn only_blocked_denies_requests() {
        assert!(UsageMode::Blocked.is_blocked());
        assert!(!UsageMode::Throttle.is_blocked());
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UsageMode::Throttle).unwrap(), "\"throttle\"");
    }
}
