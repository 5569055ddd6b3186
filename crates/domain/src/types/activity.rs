//! Activities: the scheduled occurrences a course is made of

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DATE_FORMAT, LABEL_LAB, LABEL_RECORDED_LECTURE, LABEL_TUTORIAL, LABEL_UNRECORDED_LECTURE,
    TIME_FORMAT,
};
use crate::impl_domain_status_conversions;

/// Catalog-wide activity identifier
///
/// Minted by the catalog from a single monotonic counter; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(u64);

impl ActivityId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ActivityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper-case weekday name, e.g. `MONDAY`
pub const fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Weekly recurrence of an activity between two dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub day: Weekday,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

impl TimeRange {
    pub const fn new(
        day: Weekday,
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
    ) -> Self {
        Self { day, start_date, start_time, end_date, end_time }
    }

    /// Same weekday and intersecting time of day. Dates are not compared.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }

    /// Whether the activity still runs on `date` (its end date is not earlier)
    pub fn runs_on_or_after(&self, date: NaiveDate) -> bool {
        self.end_date >= date
    }

    /// `09:00-10:30`
    pub fn time_label(&self) -> String {
        format!("{}-{}", self.start_time.format(TIME_FORMAT), self.end_time.format(TIME_FORMAT))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} to {})",
            weekday_label(self.day),
            self.time_label(),
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )
    }
}

/// Kind of activity without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Lecture,
    Tutorial,
    Lab,
}

impl_domain_status_conversions!(ActivityType {
    Lecture => "lecture",
    Tutorial => "tutorial",
    Lab => "lab",
});

impl ActivityType {
    /// Lower-case plural used in user-facing messages
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Lecture => "lectures",
            Self::Tutorial => "tutorials",
            Self::Lab => "labs",
        }
    }
}

/// Kind-specific payload of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    Lecture { recorded: bool },
    Tutorial { capacity: u32 },
    Lab { capacity: u32 },
}

impl ActivityKind {
    pub const fn activity_type(self) -> ActivityType {
        match self {
            Self::Lecture { .. } => ActivityType::Lecture,
            Self::Tutorial { .. } => ActivityType::Tutorial,
            Self::Lab { .. } => ActivityType::Lab,
        }
    }

    pub const fn is_lecture(self) -> bool {
        matches!(self, Self::Lecture { .. })
    }

    pub const fn is_recorded_lecture(self) -> bool {
        matches!(self, Self::Lecture { recorded: true })
    }

    pub const fn is_unrecorded_lecture(self) -> bool {
        matches!(self, Self::Lecture { recorded: false })
    }

    /// Stored capacity of a tutorial or lab. Never enforced.
    pub const fn capacity(self) -> Option<u32> {
        match self {
            Self::Lecture { .. } => None,
            Self::Tutorial { capacity } | Self::Lab { capacity } => Some(capacity),
        }
    }

    /// Label shown on timetable entries
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lecture { recorded: true } => LABEL_RECORDED_LECTURE,
            Self::Lecture { recorded: false } => LABEL_UNRECORDED_LECTURE,
            Self::Tutorial { .. } => LABEL_TUTORIAL,
            Self::Lab { .. } => LABEL_LAB,
        }
    }
}

/// Input for a new activity; the catalog assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySpec {
    pub time: TimeRange,
    pub location: String,
    pub kind: ActivityKind,
}

impl ActivitySpec {
    pub fn new(time: TimeRange, location: impl Into<String>, kind: ActivityKind) -> Self {
        Self { time, location: location.into(), kind }
    }
}

/// A scheduled occurrence belonging to one course. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    time: TimeRange,
    location: String,
    kind: ActivityKind,
}

impl Activity {
    pub fn new(id: ActivityId, spec: ActivitySpec) -> Self {
        Self { id, time: spec.time, location: spec.location, kind: spec.kind }
    }

    pub fn id(&self) -> ActivityId {
        self.id
    }

    pub fn time(&self) -> &TimeRange {
        &self.time
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind.activity_type() {
            ActivityType::Lecture => "Lecture",
            ActivityType::Tutorial => "Tutorial",
            ActivityType::Lab => "Lab",
        };
        write!(f, "{}: {} at {} (ID: {})", name, self.time, self.location, self.id)?;
        match self.kind {
            ActivityKind::Lecture { recorded: true } => write!(f, " - Recorded"),
            ActivityKind::Lecture { recorded: false } => write!(f, " - Not Recorded"),
            ActivityKind::Tutorial { capacity } | ActivityKind::Lab { capacity } => {
                write!(f, " - Capacity: {}", capacity)
            }
        }
    }
}
