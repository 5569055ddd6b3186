//! Domain types and models
//!
//! - `activity`: scheduled occurrences and their time ranges
//! - `course`: catalog entries and registration input
//! - `timetable`: per-student slots and the queries over them
//! - `lookup`: read access to the catalog's courses
//! - `outcome`: reports and warnings returned by catalog operations

pub mod activity;
pub mod course;
pub mod lookup;
pub mod outcome;
pub mod timetable;

pub use activity::{
    weekday_label, Activity, ActivityId, ActivityKind, ActivitySpec, ActivityType, TimeRange,
};
pub use course::{is_valid_course_code, Course, CourseDetails, StaffContact};
pub use lookup::CourseLookup;
pub use outcome::{ChoiceReport, Clash, EnrolmentReport, SlotDescription, Warning};
pub use timetable::{SlotStatus, TimeSlot, Timetable};
