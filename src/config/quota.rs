//! Quota configuration

use serde::Deserialize;

use crate::domain::quota::ResetPolicy;

use super::error::ValidationError;

/// Quota configuration
///
/// Plan limits are fixed per tier in the domain layer; this section
/// only carries the deployment's reset anchoring (the product timezone
/// and the hour at which the daily counters clear).
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaSettings {
    /// Product timezone as a fixed offset from UTC, in minutes.
    /// Negative is west of Greenwich; the default is US Eastern (-300).
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Local hour at which daily counters reset (0-23).
    #[serde(default = "default_daily_anchor_hour")]
    pub daily_anchor_hour: u32,
}

impl QuotaSettings {
    /// Builds the reset policy these settings describe.
    pub fn reset_policy(&self) -> Result<ResetPolicy, ValidationError> {
        self.validate()?;
        ResetPolicy::new(self.utc_offset_minutes, self.daily_anchor_hour)
            .map_err(|_| ValidationError::InvalidUtcOffset)
    }

    /// Validate quota configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(ValidationError::InvalidUtcOffset);
        }
        if self.daily_anchor_hour > 23 {
            return Err(ValidationError::InvalidAnchorHour);
        }
        Ok(())
    }
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            daily_anchor_hour: default_daily_anchor_hour(),
        }
    }
}

fn default_utc_offset_minutes() -> i32 {
    -300
}

fn default_daily_anchor_hour() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_describe_us_eastern_ten_am() {
        let settings = QuotaSettings::default();
        assert_eq!(settings.utc_offset_minutes, -300);
        assert_eq!(settings.daily_anchor_hour, 10);
        assert!(settings.reset_policy().is_ok());
    }

    #[test]
    fn offset_beyond_fourteen_hours_is_rejected() {
        let settings = QuotaSettings {
            utc_offset_minutes: 15 * 60,
            ..QuotaSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidUtcOffset)
        ));
    }

    #[test]
    fn anchor_hour_past_midnight_is_rejected() {
        let settings = QuotaSettings {
            daily_anchor_hour: 24,
            ..QuotaSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidAnchorHour)
        ));
    }
}
