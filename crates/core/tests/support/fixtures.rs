//! Course and activity builders

use chrono::{NaiveDate, NaiveTime, Weekday};
use timetabler_core::Catalog;
use timetabler_domain::{
    ActivityId, ActivityKind, ActivitySpec, CourseDetails, StaffContact, TimeRange,
};

pub const ORGANISER_EMAIL: &str = "organiser@hindeburg.ac.nz";
pub const SECRETARY_EMAIL: &str = "secretary@hindeburg.ac.nz";

pub const RECORDED_LECTURE: ActivityKind = ActivityKind::Lecture { recorded: true };
pub const LIVE_LECTURE: ActivityKind = ActivityKind::Lecture { recorded: false };
pub const TUTORIAL: ActivityKind = ActivityKind::Tutorial { capacity: 25 };
pub const LAB: ActivityKind = ActivityKind::Lab { capacity: 12 };

/// Complete registration input for `code`
pub fn course_details(code: &str) -> CourseDetails {
    CourseDetails {
        code: code.to_string(),
        name: format!("{code} Fundamentals"),
        description: "Lectures, tutorials and labs".to_string(),
        requires_computers: false,
        organiser: StaffContact::new("Olive Organiser", ORGANISER_EMAIL),
        secretary: StaffContact::new("Sam Secretary", SECRETARY_EMAIL),
        required_tutorials: 0,
        required_labs: 0,
    }
}

/// Weekly range over the spring term, `(hour, minute)` start and end
pub fn weekly(day: Weekday, start: (u32, u32), end: (u32, u32)) -> TimeRange {
    TimeRange::new(
        day,
        date(2025, 1, 6),
        time(start),
        date(2025, 4, 30),
        time(end),
    )
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

fn time((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid fixture time")
}

/// Fluent builder that registers a course and its activities
pub struct CourseBuilder {
    details: CourseDetails,
    activities: Vec<ActivitySpec>,
}

impl CourseBuilder {
    pub fn new(code: &str) -> Self {
        Self { details: course_details(code), activities: Vec::new() }
    }

    pub fn tutorials(mut self, required: u32) -> Self {
        self.details.required_tutorials = required;
        self
    }

    pub fn labs(mut self, required: u32) -> Self {
        self.details.required_labs = required;
        self
    }

    pub fn organiser(mut self, name: &str, email: &str) -> Self {
        self.details.organiser = StaffContact::new(name, email);
        self
    }

    pub fn activity(mut self, kind: ActivityKind, time: TimeRange) -> Self {
        self.activities.push(ActivitySpec::new(time, "Appleton Tower", kind));
        self
    }

    pub fn details(&self) -> &CourseDetails {
        &self.details
    }

    /// Register in `catalog`, returning the minted activity ids in order
    pub fn register(self, catalog: &mut Catalog) -> Vec<ActivityId> {
        let code = self.details.code.clone();
        catalog.add_course(self.details).expect("fixture course registers");
        self.activities
            .into_iter()
            .map(|spec| catalog.add_activity_to_course(&code, spec).expect("course exists"))
            .collect()
    }
}
