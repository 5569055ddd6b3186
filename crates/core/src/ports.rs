//! Port interfaces for outbound notifications
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use timetabler_common::error::CommonResult;

/// Trait for delivering email notifications
pub trait NotificationSender: Send + Sync {
    /// Send one email
    fn send_email(&self, from: &str, to: &str, subject: &str, body: &str) -> CommonResult<()>;
}

/// Sender that drops every message
#[derive(Debug, Clone, Default)]
pub struct NoOpNotificationSender;

impl NotificationSender for NoOpNotificationSender {
    fn send_email(&self, _from: &str, _to: &str, _subject: &str, _body: &str) -> CommonResult<()> {
        Ok(())
    }
}
