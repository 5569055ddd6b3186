//! # Timetabler Domain
//!
//! Business domain types and models for the course catalog and the
//! per-student timetables built from it.
//!
//! This crate contains:
//! - Catalog data types (Activity, Course, TimeSlot, Timetable, etc.)
//! - Domain error types and Result definitions
//! - Outcome and warning types returned by catalog operations
//! - Domain constants
//!
//! ## Architecture
//! - Depends only on `timetabler-common` (foundation tier)
//! - No I/O, no logging
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
