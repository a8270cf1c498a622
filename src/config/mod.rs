//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STUDY_COACH_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use study_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod quota;
mod scheduler;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use quota::QuotaSettings;
pub use scheduler::SchedulerSettings;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the study coach backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Review scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerSettings,

    /// Quota reset anchoring
    #[serde(default)]
    pub quota: QuotaSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STUDY_COACH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STUDY_COACH__DATABASE__URL=...` -> `database.url = ...`
    /// - `STUDY_COACH__QUOTA__DAILY_ANCHOR_HOUR=10` -> `quota.daily_anchor_hour = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STUDY_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.scheduler.validate()?;
        self.quota.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "STUDY_COACH__DATABASE__URL",
            "postgresql://test@localhost/study_coach_test",
        );
    }

    fn clear_env() {
        env::remove_var("STUDY_COACH__DATABASE__URL");
        env::remove_var("STUDY_COACH__QUOTA__UTC_OFFSET_MINUTES");
        env::remove_var("STUDY_COACH__QUOTA__DAILY_ANCHOR_HOUR");
        env::remove_var("STUDY_COACH__SCHEDULER__TARGET_RETENTION");
    }

    #[test]
    fn loads_from_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.database.url,
            "postgresql://test@localhost/study_coach_test"
        );
        assert_eq!(config.quota.daily_anchor_hour, 10);
        assert!(config.scheduler.enable_fuzz);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn quota_section_overrides_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("STUDY_COACH__QUOTA__UTC_OFFSET_MINUTES", "60");
        env::set_var("STUDY_COACH__QUOTA__DAILY_ANCHOR_HOUR", "4");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.quota.utc_offset_minutes, 60);
        assert_eq!(config.quota.daily_anchor_hour, 4);
    }
}
