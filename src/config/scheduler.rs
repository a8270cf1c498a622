//! Scheduler configuration

use serde::Deserialize;

use crate::domain::scheduler::{EducationTier, SchedulerConfig};

use super::error::ValidationError;

/// Scheduler configuration
///
/// Tier presets carry the scheduling parameters; this section holds the
/// deployment-wide knobs and optional overrides on top of the presets.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// Tier applied to accounts that have not selected one.
    #[serde(default)]
    pub default_tier: EducationTier,

    /// Override the preset target retention for every tier.
    #[serde(default)]
    pub target_retention: Option<f64>,

    /// Override the preset maximum interval for every tier.
    #[serde(default)]
    pub maximum_interval_days: Option<u32>,

    /// Interval fuzz; disable only for reproducibility experiments.
    #[serde(default = "default_true")]
    pub enable_fuzz: bool,

    /// Sub-day learning steps.
    #[serde(default = "default_true")]
    pub enable_short_term: bool,
}

impl SchedulerSettings {
    /// Resolves the effective scheduling parameters for a tier.
    pub fn config_for_tier(&self, tier: EducationTier) -> SchedulerConfig {
        let preset = SchedulerConfig::for_tier(tier);
        SchedulerConfig {
            target_retention: self.target_retention.unwrap_or(preset.target_retention),
            maximum_interval_days: self
                .maximum_interval_days
                .unwrap_or(preset.maximum_interval_days),
            enable_fuzz: self.enable_fuzz,
            enable_short_term: self.enable_short_term,
        }
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(retention) = self.target_retention {
            if !(0.5..1.0).contains(&retention) {
                return Err(ValidationError::InvalidRetention);
            }
        }
        if self.maximum_interval_days == Some(0) {
            return Err(ValidationError::InvalidMaximumInterval);
        }
        Ok(())
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            default_tier: EducationTier::default(),
            target_retention: None,
            maximum_interval_days: None,
            enable_fuzz: true,
            enable_short_term: true,
        }
    }
}

fn default_true() -> bool {
    true
}
