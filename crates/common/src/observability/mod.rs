//! Observability primitives - tracing bootstrap and the audit trail
//!
//! - `init_tracing` installs the global `tracing` subscriber (text or JSON)
//! - `traits` defines the `AuditLogger` seam and its stock implementations

pub mod traits;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{CommonError, CommonResult};

// Re-export trait abstractions
pub use traits::{AuditLogEntry, AuditLogger, AuditSeverity, NoOpAuditLogger, TracingAuditLogger};

/// Default filter directive when neither `RUST_LOG` nor a config value is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging section of the application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `timetabler_core=debug,info`
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}

impl LoggingConfig {
    /// Build the filter, preferring `RUST_LOG` over the configured level
    pub fn env_filter(&self) -> CommonResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| {
            CommonError::validation_with_value("logging.level", e.to_string(), self.level.clone())
        })
    }
}

/// Install the global tracing subscriber
///
/// Fails if the level directive cannot be parsed or if a global subscriber
/// is already installed.
pub fn init_tracing(config: &LoggingConfig) -> CommonResult<()> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };

    installed.map_err(|e| CommonError::config_field("logging", format!("subscriber not installed: {e}")))
}
