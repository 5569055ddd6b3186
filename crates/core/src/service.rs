//! Catalog service - the single-writer facade over [`Catalog`]
//!
//! Every operation holds the catalog lock from its first read to its last
//! write. Audit entries and notifications are dispatched after the lock is
//! released.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use timetabler_common::error::{ErrorClassification, ErrorSeverity};
use timetabler_common::observability::{AuditLogEntry, AuditLogger, AuditSeverity, NoOpAuditLogger};
use timetabler_domain::{
    ActivityId, ActivitySpec, CatalogError, ChoiceReport, Course, CourseDetails, EnrolmentReport,
    Result, Timetable, Warning,
};
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::config::{NotificationConfig, TimetablerConfig};
use crate::ports::NotificationSender;

pub const STATUS_SUCCESS: &str = "SUCCESS";
const IDS_EXHAUSTED: &str = "No activity ids left";

/// Thread-safe entry point to one process-wide catalog
pub struct CatalogService {
    catalog: Mutex<Catalog>,
    audit: Arc<dyn AuditLogger>,
    notifier: Arc<dyn NotificationSender>,
    notifications: NotificationConfig,
}

impl CatalogService {
    /// Create a service over an empty catalog with default settings
    pub fn new(notifier: Arc<dyn NotificationSender>) -> Self {
        Self {
            catalog: Mutex::new(Catalog::new()),
            audit: Arc::new(NoOpAuditLogger),
            notifier,
            notifications: NotificationConfig::default(),
        }
    }

    /// Create a service configured from `config`
    pub fn from_config(config: &TimetablerConfig, notifier: Arc<dyn NotificationSender>) -> Self {
        Self {
            catalog: Mutex::new(Catalog::with_first_activity_id(config.catalog.first_activity_id)),
            audit: Arc::new(NoOpAuditLogger),
            notifier,
            notifications: config.notifications.clone(),
        }
    }

    /// Record every operation through `audit`
    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_notifications(mut self, notifications: NotificationConfig) -> Self {
        self.notifications = notifications;
        self
    }

    // Registry -----------------------------------------------------------

    /// Register a new course on behalf of `actor`
    pub fn add_course(&self, actor: &str, details: CourseDetails) -> Result<()> {
        let inputs = details.summary();
        let code = details.code.clone();
        let outcome = self.catalog.lock().add_course(details);

        match &outcome {
            Ok(()) => info!(actor, course = %code, "course added"),
            Err(err) => log_rejection("add_course", actor, &code, err),
        }
        self.record(actor, "addCourse", inputs, status_of(&outcome, &[]), &outcome);
        outcome
    }

    /// Whether `code` has the course-code format
    pub fn check_course_code(&self, code: &str) -> bool {
        Catalog::check_course_code(code)
    }

    pub fn has_course(&self, code: &str) -> bool {
        self.catalog.lock().has_course(code)
    }

    /// Copy of a registered course
    pub fn course(&self, code: &str) -> Option<Course> {
        self.catalog.lock().course(code).cloned()
    }

    /// Add an activity to a course. Unknown courses are ignored, and so is
    /// every add once the id space is used up.
    pub fn add_activity_to_course(
        &self,
        actor: &str,
        code: &str,
        spec: ActivitySpec,
    ) -> Option<ActivityId> {
        let inputs = format!("{code}, {}, {}, {:?}", spec.time, spec.location, spec.kind);
        let (added, known) = {
            let mut catalog = self.catalog.lock();
            let added = catalog.add_activity_to_course(code, spec);
            (added, catalog.has_course(code))
        };

        let status = match added {
            Some(id) => {
                info!(actor, course = code, activity_id = %id, "activity added");
                STATUS_SUCCESS.to_string()
            }
            None if known => {
                warn!(actor, course = code, "activity not added, ids exhausted");
                failure(IDS_EXHAUSTED)
            }
            None => {
                warn!(actor, course = code, "activity not added, course does not exist");
                failure(CatalogError::CourseNotFound(code.to_string()).reason())
            }
        };
        let severity = if added.is_some() { AuditSeverity::Info } else { AuditSeverity::Warning };
        self.audit(actor, "addActivityToCourse", inputs, status, severity);
        added
    }

    /// Delete a course and email everyone affected.
    ///
    /// Returns the notified addresses. A failed send is logged and does not
    /// undo the removal.
    pub fn remove_course(&self, actor: &str, code: &str) -> Result<Vec<String>> {
        let outcome = self.catalog.lock().remove_course(code);

        match &outcome {
            Ok(recipients) => {
                info!(actor, course = code, recipients = recipients.len(), "course removed");
                self.notify_removal(code, recipients);
            }
            Err(err) => log_rejection("remove_course", actor, code, err),
        }
        self.record(actor, "removeCourse", code.to_string(), status_of(&outcome, &[]), &outcome);
        outcome
    }

    // Timetables ---------------------------------------------------------

    pub fn add_course_to_student_timetable(
        &self,
        student: &str,
        code: &str,
    ) -> Result<EnrolmentReport> {
        let outcome = self.catalog.lock().add_course_to_student_timetable(student, code);

        let warnings = outcome.as_ref().map(|r| r.warnings.as_slice()).unwrap_or_default();
        match &outcome {
            Ok(report) => info!(
                student,
                course = code,
                inserted = report.inserted.len(),
                skipped = report.skipped.len(),
                warnings = report.warnings.len(),
                "course added to timetable"
            ),
            Err(err) => log_rejection("add_course_to_timetable", student, code, err),
        }
        self.record(
            student,
            "addCourseToTimetable",
            format!("{student}, {code}"),
            status_of(&outcome, warnings),
            &outcome,
        );
        outcome
    }

    pub fn choose_activity_for_course(
        &self,
        student: &str,
        code: &str,
        activity_id: ActivityId,
    ) -> Result<ChoiceReport> {
        let outcome = self.catalog.lock().choose_activity_for_course(student, code, activity_id);

        let warnings = outcome.as_ref().map(|r| r.warnings.as_slice()).unwrap_or_default();
        match &outcome {
            Ok(report) => info!(
                student,
                course = code,
                activity_id = %activity_id,
                warnings = report.warnings.len(),
                "activity chosen"
            ),
            Err(err) => log_rejection("choose_activity", student, code, err),
        }
        self.record(
            student,
            "chooseActivityForCourse",
            format!("{student}, {code}, {activity_id}"),
            status_of(&outcome, warnings),
            &outcome,
        );
        outcome
    }

    pub fn remove_course_from_student_timetable(&self, student: &str, code: &str) -> Result<usize> {
        let outcome = self.catalog.lock().remove_course_from_student_timetable(student, code);

        match &outcome {
            Ok(removed) => info!(student, course = code, removed, "course removed from timetable"),
            Err(err) => log_rejection("remove_course_from_timetable", student, code, err),
        }
        self.record(
            student,
            "removeCourseFromTimetable",
            format!("{student}, {code}"),
            status_of(&outcome, &[]),
            &outcome,
        );
        outcome
    }

    /// Copy of a student's timetable, created empty on first access
    pub fn timetable(&self, student: &str) -> Timetable {
        self.catalog.lock().timetable(student).clone()
    }

    // Views --------------------------------------------------------------

    pub fn view_courses(&self) -> String {
        self.catalog.lock().view_courses()
    }

    pub fn view_course(&self, code: &str) -> String {
        self.catalog.lock().view_course(code)
    }

    pub fn view_timetable(&self, student: &str, today: NaiveDate) -> String {
        self.catalog.lock().view_timetable(student, today)
    }

    // Internals ----------------------------------------------------------

    fn notify_removal(&self, code: &str, recipients: &[String]) {
        if !self.notifications.enabled {
            return;
        }

        let subject = format!("{}: {code}", self.notifications.subject_prefix);
        let body = format!(
            "The course {code} has been removed from the system. All associated timetable \
             entries have been cleared."
        );
        for recipient in recipients {
            if let Err(err) =
                self.notifier.send_email(&self.notifications.sender, recipient, &subject, &body)
            {
                error!(
                    course = code,
                    recipient = %recipient,
                    error = %err,
                    retryable = err.is_retryable(),
                    "removal notice not sent"
                );
            }
        }
    }

    fn record<T>(
        &self,
        actor: &str,
        action: &str,
        inputs: String,
        status: String,
        outcome: &Result<T>,
    ) {
        let severity = match outcome {
            Ok(_) if status == STATUS_SUCCESS => AuditSeverity::Info,
            Ok(_) => AuditSeverity::Warning,
            Err(err) => audit_severity(err.severity()),
        };
        self.audit(actor, action, inputs, status, severity);
    }

    fn audit(
        &self,
        actor: &str,
        action: &str,
        inputs: String,
        status: String,
        severity: AuditSeverity,
    ) {
        if !self.audit.is_enabled() {
            return;
        }
        self.audit.log(
            AuditLogEntry::new(action, severity)
                .with_user(actor)
                .with_inputs(inputs)
                .with_status(status),
        );
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("audit", &self.audit)
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}

fn failure(reason: &str) -> String {
    format!("FAILURE ({reason})")
}

/// `SUCCESS`, `WARNING (reasons)` or `FAILURE (reason)`
fn status_of<T>(outcome: &Result<T>, warnings: &[Warning]) -> String {
    match outcome {
        Err(err) => failure(err.reason()),
        Ok(_) if warnings.is_empty() => STATUS_SUCCESS.to_string(),
        Ok(_) => {
            let mut reasons: Vec<&str> = warnings.iter().map(Warning::reason).collect();
            reasons.dedup();
            format!("WARNING ({})", reasons.join(", "))
        }
    }
}

const fn audit_severity(severity: ErrorSeverity) -> AuditSeverity {
    match severity {
        ErrorSeverity::Info => AuditSeverity::Info,
        ErrorSeverity::Warning => AuditSeverity::Warning,
        ErrorSeverity::Error => AuditSeverity::Error,
    }
}

fn log_rejection(operation: &str, actor: &str, course: &str, err: &CatalogError) {
    warn!(operation, actor, course, severity = %err.severity(), error = %err, "operation rejected");
}
