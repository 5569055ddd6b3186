//! Error types shared by every Timetabler crate
//!
//! [`CommonError`] covers the ambient layer: configuration files, logging
//! setup and outbound notifications. Domain crates define their own enums and
//! implement [`ErrorClassification`] so the service can grade a failure
//! without matching on every variant.
//!
//! | Severity | Used for |
//! |----------|----------|
//! | `Info` | Lookups of unknown courses or activities |
//! | `Warning` | Requests refused by a timetable rule |
//! | `Error` | Invalid input or configuration |

use std::fmt;

use thiserror::Error;

/// Result alias for the ambient layer
pub type CommonResult<T> = Result<T, CommonError>;

/// Failures outside the catalog rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    #[error("Configuration error in field '{field}': {message}")]
    Config { field: String, message: String },

    #[error("Serialization error ({format}): {message}")]
    Serialization { format: String, message: String },

    /// File reads and outbound deliveries
    #[error("Persistence error during '{operation}': {message}")]
    Persistence { operation: String, message: String },

    #[error("Validation error for field '{field}' (value: '{value}'): {message}")]
    Validation { field: String, message: String, value: String },
}

impl CommonError {
    pub fn config_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config { field: field.into(), message: message.into() }
    }

    pub fn serialization_format(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization { format: format.into(), message: message.into() }
    }

    pub fn persistence_op(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence { operation: operation.into(), message: message.into() }
    }

    pub fn validation_with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Validation { field: field.into(), message: message.into(), value: value.into() }
    }
}

impl ErrorClassification for CommonError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    fn is_retryable(&self) -> bool {
        // A mailbox or file may come back; a bad config will not.
        matches!(self, Self::Persistence { .. })
    }
}

impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

/// Grading shared by every error enum in the workspace
pub trait ErrorClassification {
    /// How loudly a failure is logged and audited
    fn severity(&self) -> ErrorSeverity;

    /// Whether repeating the same request could succeed
    fn is_retryable(&self) -> bool;
}

/// Error severity levels for logging and the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(label)
    }
}
