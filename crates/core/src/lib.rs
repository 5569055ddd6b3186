//! # Timetabler Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The [`Catalog`] engine: course registry and the timetable conflict rules
//! - Text views over the catalog
//! - Port interfaces (traits) for outbound notifications
//! - The [`CatalogService`] facade that serialises access to one catalog
//! - Configuration loading
//!
//! ## Architecture Principles
//! - Depends on `timetabler-domain` and `timetabler-common`
//! - No network or platform code
//! - All external collaborators via traits
//! - Pure, testable business logic

pub mod catalog;
pub mod config;
pub mod ports;
pub mod service;
pub mod view;

// Re-export specific items to avoid ambiguity
pub use catalog::Catalog;
pub use config::{CatalogConfig, NotificationConfig, TimetablerConfig};
pub use ports::{NoOpNotificationSender, NotificationSender};
pub use service::CatalogService;
