//! Application configuration
//!
//! Loaded from TOML. Every section and field has a default, so an empty
//! file is a valid configuration.
//!
//! ```toml
//! [catalog]
//! first_activity_id = 1
//!
//! [notifications]
//! enabled = true
//! sender = "inquiries@hindeburg.ac.nz"
//! subject_prefix = "Course Removed"
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use timetabler_common::error::{CommonError, CommonResult};
use timetabler_common::observability::LoggingConfig;
use timetabler_common::validation::{EmailValidator, Validator};
use timetabler_domain::constants::{
    DEFAULT_NOTIFICATION_SENDER, DEFAULT_REMOVAL_SUBJECT_PREFIX, FIRST_ACTIVITY_ID,
};

/// Environment variable that overrides `logging.level`
pub const LOG_LEVEL_ENV: &str = "TIMETABLER_LOG_LEVEL";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetablerConfig {
    pub catalog: CatalogConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Id given to the first activity ever added
    pub first_activity_id: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { first_activity_id: FIRST_ACTIVITY_ID }
    }
}

/// Emails sent when a course is removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub sender: String,
    pub subject_prefix: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sender: DEFAULT_NOTIFICATION_SENDER.to_string(),
            subject_prefix: DEFAULT_REMOVAL_SUBJECT_PREFIX.to_string(),
        }
    }
}

impl TimetablerConfig {
    /// Parse and validate a TOML document. Environment is not consulted.
    pub fn from_toml_str(input: &str) -> CommonResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> CommonResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| {
            CommonError::persistence_op("read_config", format!("{}: {e}", path.display()))
        })?;

        let mut config = Self::from_toml_str(&input)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `TIMETABLER_LOG_LEVEL` when set and non-blank
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.logging.level = level.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> CommonResult<()> {
        if self.catalog.first_activity_id == 0 {
            return Err(CommonError::config_field(
                "catalog.first_activity_id",
                "must be greater than zero",
            ));
        }

        if self.notifications.enabled {
            let mut validator = Validator::new();
            validator.validate_field(
                "notifications.sender",
                self.notifications.sender.as_str(),
                &EmailValidator::new(),
            );
            validator.validate_not_empty(
                "notifications.subject_prefix",
                &self.notifications.subject_prefix,
            );
            validator
                .finalize()
                .map_err(|e| CommonError::config_field("notifications", e.to_string()))?;
        }

        Ok(())
    }
}
