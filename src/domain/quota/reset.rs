//! Timezone-anchored reset instants.
//!
//! Daily quota resets are anchored to a fixed local hour (the school
//! day start), weekly resets to Monday 00:00 local, monthly resets to
//! the 1st of the local month. All anchor arithmetic lives here as
//! pure helpers so the quota logic itself never touches timezones.

use chrono::{Datelike, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Reset anchoring policy: a fixed UTC offset and a daily anchor hour.
///
/// The offset is stored in minutes so half-hour timezones work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPolicy {
    utc_offset_minutes: i32,
    daily_anchor_hour: u32,
}

impl ResetPolicy {
    /// Creates a policy, validating the offset and anchor hour.
    pub fn new(utc_offset_minutes: i32, daily_anchor_hour: u32) -> Result<Self, ValidationError> {
        if utc_offset_minutes.abs() > 14 * 60 {
            return Err(ValidationError::out_of_range(
                "utc_offset_minutes",
                -840,
                840,
                utc_offset_minutes as i64,
            ));
        }
        if daily_anchor_hour > 23 {
            return Err(ValidationError::out_of_range(
                "daily_anchor_hour",
                0,
                23,
                daily_anchor_hour as i64,
            ));
        }
        Ok(Self {
            utc_offset_minutes,
            daily_anchor_hour,
        })
    }

    /// Converts a UTC instant to the policy's local wall-clock time.
    fn to_local(&self, ts: Timestamp) -> NaiveDateTime {
        ts.as_datetime().naive_utc() + Duration::minutes(self.utc_offset_minutes as i64)
    }

    /// Converts a local wall-clock time back to a UTC instant.
    fn to_utc(&self, local: NaiveDateTime) -> Timestamp {
        let utc = local - Duration::minutes(self.utc_offset_minutes as i64);
        Timestamp::from_datetime(utc.and_utc())
    }

    /// Most recent occurrence of the daily anchor hour at or before `now`.
    pub fn most_recent_daily_anchor(&self, now: Timestamp) -> Timestamp {
        let local = self.to_local(now);
        let anchor_today = local
            .date()
            .and_hms_opt(self.daily_anchor_hour, 0, 0)
            .unwrap_or(local);
        let anchor = if anchor_today > local {
            anchor_today - Duration::days(1)
        } else {
            anchor_today
        };
        self.to_utc(anchor)
    }

    /// Most recent Monday 00:00 local at or before `now`.
    pub fn most_recent_week_start(&self, now: Timestamp) -> Timestamp {
        let local = self.to_local(now);
        let days_back = local.weekday().num_days_from_monday() as i64;
        let monday = (local.date() - Duration::days(days_back))
            .and_hms_opt(0, 0, 0)
            .unwrap_or(local);
        self.to_utc(monday)
    }

    /// Most recent 1st-of-month 00:00 local at or before `now`.
    pub fn most_recent_month_start(&self, now: Timestamp) -> Timestamp {
        let local = self.to_local(now);
        let first = local
            .date()
            .with_day(1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(local);
        self.to_utc(first)
    }

    /// Next daily anchor strictly after `now`.
    pub fn next_daily_anchor(&self, now: Timestamp) -> Timestamp {
        let previous = self.most_recent_daily_anchor(now);
        Timestamp::from_datetime(*previous.as_datetime() + Duration::days(1))
    }
}

impl Default for ResetPolicy {
    /// US Eastern standard offset with a 10:00 anchor, matching the
    /// platform's school-day start.
    fn default() -> Self {
        Self {
            utc_offset_minutes: -300,
            daily_anchor_hour: 10,
        }
    }
}
