//! Modular common utilities shared across Timetabler crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: errors, validation
//! - `observability`: tracing bootstrap and the audit trail (not included by
//!   default)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;
#[cfg(feature = "foundation")]
pub mod validation;

// Observability tier
// --------------------------------------------------------------
#[cfg(feature = "observability")]
pub mod observability;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
#[cfg(feature = "observability")]
pub use observability::{
    init_tracing, AuditLogEntry, AuditLogger, AuditSeverity, LoggingConfig, NoOpAuditLogger,
    TracingAuditLogger,
};
#[cfg(feature = "foundation")]
pub use validation::{
    EmailValidator, FieldError, FieldValidator, ValidationError, ValidationResult, Validator,
};
