//! Per-tier scheduling configuration.
//!
//! The product adapts review pressure to student age: younger learners
//! get shorter maximum intervals to force more frequent consolidation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Education tier a student account belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationTier {
    Elementary,
    MiddleSchool,
    #[default]
    HighSchool,
    Adult,
}

impl EducationTier {
    /// Parses a tier from its snake_case string form.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "elementary" => Ok(EducationTier::Elementary),
            "middle_school" => Ok(EducationTier::MiddleSchool),
            "high_school" => Ok(EducationTier::HighSchool),
            "adult" => Ok(EducationTier::Adult),
            other => Err(ValidationError::invalid_format(
                "education_tier",
                format!("unknown education tier '{}'", other),
            )),
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationTier::Elementary => "elementary",
            EducationTier::MiddleSchool => "middle_school",
            EducationTier::HighSchool => "high_school",
            EducationTier::Adult => "adult",
        }
    }
}

/// Scheduling parameters for one education tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Desired recall probability when a card comes due (e.g. 0.9).
    pub target_retention: f64,
    /// Cap on how far out a review can be scheduled.
    pub maximum_interval_days: u32,
    /// Perturb intervals by a small bounded amount to desynchronize
    /// review clusters.
    pub enable_fuzz: bool,
    /// Allow sub-day steps for newly learned and lapsed cards.
    pub enable_short_term: bool,
}

impl SchedulerConfig {
    /// Default parameters for a tier.
    ///
    /// | Tier | Retention | Max interval | Fuzz | Short-term |
    /// |------|-----------|--------------|------|------------|
    /// | Elementary | 0.92 | 30 | yes | yes |
    /// | MiddleSchool | 0.90 | 90 | yes | yes |
    /// | HighSchool | 0.90 | 180 | yes | yes |
    /// | Adult | 0.90 | 365 | yes | yes |
    pub fn for_tier(tier: EducationTier) -> Self {
        match tier {
            EducationTier::Elementary => Self {
                target_retention: 0.92,
                maximum_interval_days: 30,
                enable_fuzz: true,
                enable_short_term: true,
            },
            EducationTier::MiddleSchool => Self {
                target_retention: 0.90,
                maximum_interval_days: 90,
                enable_fuzz: true,
                enable_short_term: true,
            },
            EducationTier::HighSchool => Self {
                target_retention: 0.90,
                maximum_interval_days: 180,
                enable_fuzz: true,
                enable_short_term: true,
            },
            EducationTier::Adult => Self {
                target_retention: 0.90,
                maximum_interval_days: 365,
                enable_fuzz: true,
                enable_short_term: true,
            },
        }
    }

    /// Validates parameter ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.5..1.0).contains(&self.target_retention) {
            return Err(ValidationError::invalid_format(
                "target_retention",
                format!("must be in [0.5, 1.0), got {}", self.target_retention),
            ));
        }
        if self.maximum_interval_days == 0 {
            return Err(ValidationError::out_of_range(
                "maximum_interval_days",
                1,
                36500,
                0,
            ));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::for_tier(EducationTier::default())
    }
}
