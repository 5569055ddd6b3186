//! Trait abstractions for observability components
//!
//! This module defines the audit trail seam so that components can record
//! user actions without depending on a specific sink.

use std::collections::HashMap;
use std::fmt::{self, Debug};

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metadata key holding the operation inputs of an audit entry
pub const INPUTS_KEY: &str = "inputs";

/// Metadata key holding the outcome of an audit entry
pub const STATUS_KEY: &str = "status";

// ============================================================================
// Audit Logging Traits
// ============================================================================

/// Trait for audit logging implementations
///
/// Allows components to record user actions without depending on a specific
/// audit logging implementation. Implementations must not block for long;
/// callers may hold application locks while logging.
pub trait AuditLogger: Send + Sync + Debug {
    /// Log an audit event
    fn log(&self, event: AuditLogEntry);

    /// Check if audit logging is enabled
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Generic audit log entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AuditLogEntry {
    /// Event type/action
    pub event_type: String,

    /// Event severity
    pub severity: AuditSeverity,

    /// Acting user (optional)
    pub user_id: Option<String>,

    /// Additional metadata
    pub metadata: HashMap<String, String>,

    /// Timestamp captured at creation
    pub timestamp: DateTime<Utc>,
}

impl Default for AuditLogEntry {
    fn default() -> Self {
        Self {
            event_type: String::new(),
            severity: AuditSeverity::default(),
            user_id: None,
            metadata: HashMap::new(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl AuditLogEntry {
    /// Create an entry stamped with the current time
    pub fn new(event_type: impl Into<String>, severity: AuditSeverity) -> Self {
        Self { event_type: event_type.into(), severity, timestamp: Utc::now(), ..Self::default() }
    }

    /// Attach the acting user
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach a metadata pair
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach the operation inputs
    #[must_use]
    pub fn with_inputs(self, inputs: impl Into<String>) -> Self {
        self.with_metadata(INPUTS_KEY, inputs)
    }

    /// Attach the outcome, e.g. `SUCCESS` or `FAILURE (reason)`
    #[must_use]
    pub fn with_status(self, status: impl Into<String>) -> Self {
        self.with_metadata(STATUS_KEY, status)
    }

    /// Recorded inputs, empty when absent
    pub fn inputs(&self) -> &str {
        self.metadata.get(INPUTS_KEY).map_or("", String::as_str)
    }

    /// Recorded outcome, empty when absent
    pub fn status(&self) -> &str {
        self.metadata.get(STATUS_KEY).map_or("", String::as_str)
    }
}

/// Single-line rendering: `timestamp, user, action, inputs, status`
impl fmt::Display for AuditLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.timestamp.to_rfc3339(),
            self.user_id.as_deref().unwrap_or("-"),
            self.event_type,
            self.inputs(),
            self.status()
        )
    }
}

/// Audit event severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[non_exhaustive]
pub enum AuditSeverity {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

// ============================================================================
// Implementations
// ============================================================================

/// No-op audit logger for testing or when audit logging is disabled
#[derive(Debug, Clone, Default)]
pub struct NoOpAuditLogger;

impl AuditLogger for NoOpAuditLogger {
    fn log(&self, _event: AuditLogEntry) {
        // No-op
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Audit logger that forwards entries to the `tracing` pipeline
///
/// Entries land under the `audit` target so they can be filtered or routed
/// separately, e.g. `RUST_LOG=audit=info`.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditLogger;

impl AuditLogger for TracingAuditLogger {
    fn log(&self, event: AuditLogEntry) {
        let user = event.user_id.as_deref().unwrap_or("-");
        match event.severity {
            AuditSeverity::Debug => tracing::debug!(
                target: "audit",
                action = %event.event_type,
                user,
                inputs = event.inputs(),
                status = event.status(),
                "audit"
            ),
            AuditSeverity::Info => tracing::info!(
                target: "audit",
                action = %event.event_type,
                user,
                inputs = event.inputs(),
                status = event.status(),
                "audit"
            ),
            AuditSeverity::Warning => tracing::warn!(
                target: "audit",
                action = %event.event_type,
                user,
                inputs = event.inputs(),
                status = event.status(),
                "audit"
            ),
            AuditSeverity::Error | AuditSeverity::Critical => tracing::error!(
                target: "audit",
                action = %event.event_type,
                user,
                inputs = event.inputs(),
                status = event.status(),
                severity = ?event.severity,
                "audit"
            ),
        }
    }
}
