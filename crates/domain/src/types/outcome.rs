//! Reports and advisory warnings returned by catalog operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::activity::{Activity, ActivityId, ActivityType, TimeRange};

/// Point-in-time rendering of one timetable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDescription {
    pub course_code: String,
    pub activity_id: ActivityId,
    pub label: String,
    pub time: TimeRange,
}

impl SlotDescription {
    /// Describe an activity that is not, or not yet, in a timetable
    pub fn of_activity(course_code: &str, activity: &Activity) -> Self {
        Self {
            course_code: course_code.to_string(),
            activity_id: activity.id(),
            label: activity.kind().label().to_string(),
            time: *activity.time(),
        }
    }
}

/// `CS101 - Unrecorded Lecture - 09:00-10:30 (Activity ID: 1)`
impl fmt::Display for SlotDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} (Activity ID: {})",
            self.course_code,
            self.label,
            self.time.time_label(),
            self.activity_id
        )
    }
}

/// A candidate activity and the timetable entry it collides with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clash {
    pub candidate: SlotDescription,
    pub existing: SlotDescription,
}

impl fmt::Display for Clash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {}", self.candidate, self.existing)
    }
}

/// Advisory outcome that never changes whether an operation succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    TutorialsRequired {
        course: String,
        required: u32,
    },
    LabsRequired {
        course: String,
        required: u32,
    },
    /// An activity that starts out chosen was left out because it clashes
    /// with chosen slots
    ActivitySkipped {
        activity: SlotDescription,
        conflicts: Vec<SlotDescription>,
    },
    /// A newly added recorded lecture overlaps other chosen slots
    RecordedLectureOverlap {
        activity: SlotDescription,
        conflicts: Vec<SlotDescription>,
    },
    /// A newly chosen activity overlaps chosen recorded lectures
    OverlapsRecordedLecture {
        activity: SlotDescription,
        conflicts: Vec<SlotDescription>,
    },
    QuotaShortfall {
        course: String,
        activity_type: ActivityType,
        required: u32,
        chosen: usize,
    },
}

impl Warning {
    /// Short label used in audit trails, e.g. `WARNING (Activity conflicts)`
    pub fn reason(&self) -> &'static str {
        match self {
            Self::TutorialsRequired { .. } => "Required tutorials not chosen",
            Self::LabsRequired { .. } => "Required labs not chosen",
            Self::ActivitySkipped { .. } => "Activity conflicts",
            Self::RecordedLectureOverlap { .. } => "Recorded lecture conflicts",
            Self::OverlapsRecordedLecture { .. } => "Overlaps recorded lecture",
            Self::QuotaShortfall { .. } => "Required activities not chosen",
        }
    }
}

fn join(slots: &[SlotDescription]) -> String {
    slots.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TutorialsRequired { course, required } => {
                write!(f, "You have to choose {required} tutorials for course {course}")
            }
            Self::LabsRequired { course, required } => {
                write!(f, "You have to choose {required} labs for course {course}")
            }
            Self::ActivitySkipped { activity, conflicts } => {
                write!(f, "{activity} was not added, it clashes with: {}", join(conflicts))
            }
            Self::RecordedLectureOverlap { activity, conflicts } => {
                let joined = join(conflicts);
                write!(f, "Recorded lecture {activity} has potential conflicts: {joined}")
            }
            Self::OverlapsRecordedLecture { activity, conflicts } => {
                write!(f, "{activity} overlaps recorded lectures: {}", join(conflicts))
            }
            Self::QuotaShortfall { course, activity_type, required, chosen } => write!(
                f,
                "Course {course} requires {required} {}, but only {chosen} chosen",
                activity_type.plural()
            ),
        }
    }
}

/// Result of adding a course to a student's timetable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolmentReport {
    pub course: String,
    /// Activities that now have a slot, in course order
    pub inserted: Vec<ActivityId>,
    /// Activities left out because of a clash
    pub skipped: Vec<ActivityId>,
    pub warnings: Vec<Warning>,
}

impl EnrolmentReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result of choosing a tutorial or lab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceReport {
    pub course: String,
    pub activity: ActivityId,
    pub warnings: Vec<Warning>,
}

impl ChoiceReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
