//! Error types used throughout the catalog

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use timetabler_common::error::{ErrorClassification, ErrorSeverity};
use timetabler_common::validation::ValidationError;

use crate::types::{ActivityId, Clash};

/// Rule that fired when an operation was rejected for a timetable clash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictRule {
    /// An unrecorded lecture of the course being added overlaps a chosen slot
    NewUnrecordedLecture,
    /// An activity of the course being added overlaps a chosen unrecorded
    /// lecture already in the timetable
    ExistingUnrecordedLecture,
    /// The activity being chosen overlaps a chosen slot that is not a
    /// recorded lecture
    ChosenSlot,
}

impl fmt::Display for ConflictRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NewUnrecordedLecture => "clash with an unrecorded lecture",
            Self::ExistingUnrecordedLecture => "clash with an existing unrecorded lecture",
            Self::ChosenSlot => "clash with an activity already chosen",
        };
        f.write_str(text)
    }
}

/// Main error type for catalog operations
///
/// Every variant is an expected business condition. A call that returns one
/// of these has left the catalog untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum CatalogError {
    #[error("{message}")]
    Validation { message: String, fields: Vec<String> },

    #[error("Course with code {0} already exists")]
    DuplicateCourse(String),

    #[error("Course {0} is already in the timetable")]
    CourseAlreadyInTimetable(String),

    #[error("Course does not exist: {0}")]
    CourseNotFound(String),

    #[error("Activity {activity_id} does not belong to course {course}")]
    ActivityNotFound { course: String, activity_id: ActivityId },

    #[error("Course {0} is not in the timetable")]
    CourseNotInTimetable(String),

    #[error("Activity {activity_id} of course {course} has no slot in the timetable")]
    SlotNotFound { course: String, activity_id: ActivityId },

    #[error("Activity {activity_id} of course {course} is a lecture; lectures are selected automatically")]
    LectureNotChoosable { course: String, activity_id: ActivityId },

    #[error("Rejected, {rule}: {}", join_clashes(.conflicts))]
    HardConflict { rule: ConflictRule, conflicts: Vec<Clash> },
}

fn join_clashes(clashes: &[Clash]) -> String {
    clashes.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl CatalogError {
    /// Short reason used in audit trails, e.g. `FAILURE (Course not found)`
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Invalid course info",
            Self::DuplicateCourse(_) => "Course with that code already exists",
            Self::CourseAlreadyInTimetable(_) => "Course already in timetable",
            Self::CourseNotFound(_) => "Course does not exist",
            Self::ActivityNotFound { .. } => "Invalid activity ID",
            Self::CourseNotInTimetable(_) => "Course not in timetable",
            Self::SlotNotFound { .. } => "Activity not found",
            Self::LectureNotChoosable { .. } => "Cannot manually choose lectures",
            Self::HardConflict { rule: ConflictRule::NewUnrecordedLecture, .. } => {
                "Unrecorded lecture conflict"
            }
            Self::HardConflict { rule: ConflictRule::ExistingUnrecordedLecture, .. } => {
                "Conflict with existing unrecorded lecture"
            }
            Self::HardConflict { rule: ConflictRule::ChosenSlot, .. } => {
                "Conflicts with chosen activities"
            }
        }
    }
}

impl ErrorClassification for CatalogError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation { .. } => ErrorSeverity::Error,
            Self::CourseNotFound(_)
            | Self::ActivityNotFound { .. }
            | Self::CourseNotInTimetable(_)
            | Self::SlotNotFound { .. } => ErrorSeverity::Info,
            Self::DuplicateCourse(_)
            | Self::CourseAlreadyInTimetable(_)
            | Self::LectureNotChoosable { .. }
            | Self::HardConflict { .. } => ErrorSeverity::Warning,
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            message: err.to_string(),
            fields: err.fields().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
