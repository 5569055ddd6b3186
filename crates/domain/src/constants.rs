//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Catalog rules
pub const COURSE_CODE_PATTERN: &str = r"^[A-Z]{2,}[0-9]{3,}$";
pub const FIRST_ACTIVITY_ID: u64 = 1;

// Activity labels shown to users
pub const LABEL_RECORDED_LECTURE: &str = "Recorded Lecture";
pub const LABEL_UNRECORDED_LECTURE: &str = "Unrecorded Lecture";
pub const LABEL_TUTORIAL: &str = "Tutorial";
pub const LABEL_LAB: &str = "Lab";
pub const LABEL_UNKNOWN_ACTIVITY: &str = "Unknown";

// Rendering
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Course removal notices
pub const DEFAULT_NOTIFICATION_SENDER: &str = "inquiries@hindeburg.ac.nz";
pub const DEFAULT_REMOVAL_SUBJECT_PREFIX: &str = "Course Removed";
