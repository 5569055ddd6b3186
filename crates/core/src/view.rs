//! Plain-text renderings of the catalog for terminal front ends
//!
//! Views are the only date-aware code: they place weekly slots on concrete
//! days of the coming working week. Conflict checks never look at dates.

use std::fmt::Write;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use timetabler_domain::constants::DATE_FORMAT;
use timetabler_domain::{weekday_label, ActivityType, CourseLookup, TimeSlot, Timetable};

use crate::catalog::Catalog;

pub const NO_COURSES: &str = "No courses available.";
pub const COURSE_NOT_FOUND: &str = "Course not found.";
pub const EMPTY_TIMETABLE: &str = "No courses in your timetable. Please add courses first.";

const WORKING_DAYS: [Weekday; 5] =
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

impl Catalog {
    /// Every course with its activities, in code order
    pub fn view_courses(&self) -> String {
        if self.courses().is_empty() {
            return NO_COURSES.to_string();
        }

        let mut out = String::new();
        for course in self.courses().values() {
            let _ = writeln!(out, "{course}");
        }
        out
    }

    /// Detailed card for one course
    pub fn view_course(&self, code: &str) -> String {
        let Some(course) = self.course(code) else {
            return COURSE_NOT_FOUND.to_string();
        };

        let mut out = String::from("Course Details:\n-------------------------\n");
        let _ = writeln!(out, "Code: {}", course.code());
        let _ = writeln!(out, "Name: {}", course.name());
        let _ = writeln!(out, "Description: {}", course.description());
        let _ = writeln!(
            out,
            "Requires Computers: {}",
            if course.requires_computers() { "Yes" } else { "No" }
        );
        let _ = writeln!(out, "Course Organiser: {}", course.organiser());
        let _ = writeln!(out, "Course Secretary: {}", course.secretary());
        let _ = writeln!(out, "Required Tutorials: {}", course.required_tutorials());
        let _ = writeln!(out, "Required Labs: {}", course.required_labs());
        out.push_str("\nActivities:\n");
        for activity in course.activities() {
            let _ = writeln!(out, "{activity}");
        }
        out
    }

    /// A student's coming working week, the tutorials and labs still open
    /// to choose, and any unmet requirements.
    ///
    /// The week starts on `today` if it is a Monday, otherwise on the next
    /// Monday.
    pub fn view_timetable(&self, student_email: &str, today: NaiveDate) -> String {
        match self.find_timetable(student_email) {
            Some(timetable) if !timetable.is_empty() => {
                render_timetable(timetable, self.lookup(), today)
            }
            _ => EMPTY_TIMETABLE.to_string(),
        }
    }
}

/// First Monday on or after `today`
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let offset = (7 - today.weekday().num_days_from_monday()) % 7;
    shift(today, offset)
}

fn shift(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days))).unwrap_or(date)
}

fn render_timetable(timetable: &Timetable, lookup: &dyn CourseLookup, today: NaiveDate) -> String {
    let monday = week_start(today);
    let friday = shift(monday, 4);

    let mut out = String::new();
    let _ = writeln!(out, "Timetable for {}", timetable.student_email());
    let _ = writeln!(
        out,
        "Week from {} to {}",
        monday.format(DATE_FORMAT),
        friday.format(DATE_FORMAT)
    );

    for day in WORKING_DAYS {
        let date = shift(monday, day.num_days_from_monday());
        render_day(&mut out, timetable, lookup, day, date);
    }

    out.push_str("\nAvailable Activities to Choose:\n");
    let open: Vec<&TimeSlot> = timetable
        .slots()
        .iter()
        .filter(|slot| !slot.is_chosen())
        .filter(|slot| {
            slot.kind(lookup).is_some_and(|kind| kind.activity_type() != ActivityType::Lecture)
        })
        .collect();
    if open.is_empty() {
        out.push_str("None\n");
    }
    for slot in open {
        let _ = writeln!(
            out,
            "{} - {} (ID: {}) - {}",
            slot.course_code(),
            slot.label(lookup),
            slot.activity_id(),
            slot.time().time_label()
        );
    }

    let issues = timetable.check_timetable_issues(lookup);
    if !issues.is_empty() {
        out.push_str("\nTimetable Issues:\n");
        for issue in issues {
            let _ = writeln!(out, "- {issue}");
        }
    }
    out
}

fn render_day(
    out: &mut String,
    timetable: &Timetable,
    lookup: &dyn CourseLookup,
    day: Weekday,
    date: NaiveDate,
) {
    let mut slots: Vec<&TimeSlot> = timetable
        .slots()
        .iter()
        .filter(|slot| slot.time().day == day && slot.time().runs_on_or_after(date))
        .collect();

    let heading = format!("{} ({})", weekday_label(day), date.format(DATE_FORMAT));
    if slots.is_empty() {
        let _ = writeln!(out, "{heading}: No scheduled activities");
        return;
    }
    let _ = writeln!(out, "{heading}:");

    slots.sort_by_key(|slot| slot.time().start_time);
    let mut courses: Vec<&str> = Vec::new();
    for slot in &slots {
        if !courses.contains(&slot.course_code()) {
            courses.push(slot.course_code());
        }
    }

    for code in courses {
        let _ = writeln!(out, "  Course: {code}");
        for slot in slots.iter().filter(|slot| slot.course_code() == code) {
            let _ = writeln!(
                out,
                "    {} (ID: {}) - {} [{}]",
                slot.label(lookup),
                slot.activity_id(),
                slot.time().time_label(),
                slot.status().as_str().to_ascii_uppercase()
            );
        }
    }
}
