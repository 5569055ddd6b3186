//! In-memory mocks for the core ports

use parking_lot::Mutex;
use timetabler_common::error::{CommonError, CommonResult};
use timetabler_common::observability::{AuditLogEntry, AuditLogger};
use timetabler_core::NotificationSender;

/// One email captured by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Notification sender that keeps every message in memory.
///
/// Addresses listed in `failing` are rejected with a persistence error.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentEmail>>,
    failing: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every message addressed to `address`
    pub fn failing_for(mut self, address: impl Into<String>) -> Self {
        self.failing.push(address.into());
        self
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent.lock().iter().map(|email| email.to.clone()).collect()
    }
}

impl NotificationSender for RecordingNotifier {
    fn send_email(&self, from: &str, to: &str, subject: &str, body: &str) -> CommonResult<()> {
        if self.failing.iter().any(|address| address == to) {
            return Err(CommonError::persistence_op("send_email", format!("mailbox {to} unavailable")));
        }
        self.sent.lock().push(SentEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Audit logger that keeps every entry in memory
#[derive(Debug, Default)]
pub struct RecordingAuditLogger {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl RecordingAuditLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().clone()
    }

    pub fn last(&self) -> Option<AuditLogEntry> {
        self.entries.lock().last().cloned()
    }
}

impl AuditLogger for RecordingAuditLogger {
    fn log(&self, event: AuditLogEntry) {
        self.entries.lock().push(event);
    }
}
