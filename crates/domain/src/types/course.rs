//! Courses: catalog entries and the input used to register them

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use timetabler_common::validation::{ValidationResult, Validator};

use super::activity::{Activity, ActivityId};
use crate::constants::COURSE_CODE_PATTERN;

/// Compiled course-code pattern
#[allow(clippy::expect_used)]
static COURSE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(COURSE_CODE_PATTERN).expect("COURSE_CODE_PATTERN is a valid regex")
});

/// Two or more upper-case ASCII letters followed by three or more digits
pub fn is_valid_course_code(code: &str) -> bool {
    COURSE_CODE_REGEX.is_match(code)
}

/// Name and email of a member of staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffContact {
    pub name: String,
    pub email: String,
}

impl StaffContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into() }
    }
}

impl fmt::Display for StaffContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}

/// Registration input for a new course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub code: String,
    pub name: String,
    pub description: String,
    pub requires_computers: bool,
    pub organiser: StaffContact,
    pub secretary: StaffContact,
    pub required_tutorials: u32,
    pub required_labs: u32,
}

impl CourseDetails {
    /// Reject blank fields and a malformed code.
    ///
    /// Every blank field is reported. The code pattern is only checked once
    /// the code itself is present.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.validate_not_empty("code", &self.code);
        validator.validate_not_empty("name", &self.name);
        validator.validate_not_empty("description", &self.description);
        validator.validate_nested("organiser", |v| {
            v.validate_not_empty("name", &self.organiser.name);
            v.validate_not_empty("email", &self.organiser.email);
        });
        validator.validate_nested("secretary", |v| {
            v.validate_not_empty("name", &self.secretary.name);
            v.validate_not_empty("email", &self.secretary.email);
        });

        if !self.code.trim().is_empty() {
            validator.validate_pattern("code", &self.code, &COURSE_CODE_REGEX);
        }

        validator.finalize()
    }

    /// One-line summary used in audit trails
    pub fn summary(&self) -> String {
        format!(
            "Code: {}, Name: {}, Requires Computers: {}, CO: {}, CS: {}, Tutorials: {}, Labs: {}",
            self.code,
            self.name,
            self.requires_computers,
            self.organiser,
            self.secretary,
            self.required_tutorials,
            self.required_labs
        )
    }
}

/// A catalog entry. Only its activity list changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    details: CourseDetails,
    activities: Vec<Activity>,
}

impl Course {
    /// Create a course with no activities. Input is assumed validated.
    pub fn new(details: CourseDetails) -> Self {
        Self { details, activities: Vec::new() }
    }

    pub fn code(&self) -> &str {
        &self.details.code
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn description(&self) -> &str {
        &self.details.description
    }

    pub fn requires_computers(&self) -> bool {
        self.details.requires_computers
    }

    pub fn organiser(&self) -> &StaffContact {
        &self.details.organiser
    }

    pub fn secretary(&self) -> &StaffContact {
        &self.details.secretary
    }

    pub fn required_tutorials(&self) -> u32 {
        self.details.required_tutorials
    }

    pub fn required_labs(&self) -> u32 {
        self.details.required_labs
    }

    pub fn details(&self) -> &CourseDetails {
        &self.details
    }

    /// Activities in insertion order
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id() == id)
    }

    pub fn has_activity(&self, id: ActivityId) -> bool {
        self.activity(id).is_some()
    }

    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn clear_activities(&mut self) {
        self.activities.clear();
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course: {} - {}", self.code(), self.name())?;
        writeln!(f, "Description: {}", self.description())?;
        let computers = if self.requires_computers() { "Yes" } else { "No" };
        writeln!(f, "Requires Computers: {computers}")?;
        writeln!(f, "Course Organiser: {}", self.organiser())?;
        writeln!(f, "Course Secretary: {}", self.secretary())?;
        writeln!(f, "Required Tutorials: {}", self.required_tutorials())?;
        writeln!(f, "Required Labs: {}", self.required_labs())?;
        writeln!(f, "Activities:")?;
        for (index, activity) in self.activities.iter().enumerate() {
            writeln!(f, "{}: {}", index, activity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Weekday};

    use super::*;
    use crate::types::activity::{ActivityKind, ActivitySpec, TimeRange};

    fn details(code: &str) -> CourseDetails {
        CourseDetails {
            code: code.to_string(),
            name: "Informatics 1".to_string(),
            description: "Introductory programming".to_string(),
            requires_computers: true,
            organiser: StaffContact::new("Ada", "ada@hindeburg.ac.nz"),
            secretary: StaffContact::new("Bob", "bob@hindeburg.ac.nz"),
            required_tutorials: 1,
            required_labs: 0,
        }
    }

    #[test]
    fn test_course_code_format() {
        assert!(is_valid_course_code("CS101"));
        assert!(is_valid_course_code("CSC1000"));
        assert!(!is_valid_course_code("cs101"));
        assert!(!is_valid_course_code("C1"));
        assert!(!is_valid_course_code("C101"));
        assert!(!is_valid_course_code("CS10"));
        assert!(!is_valid_course_code("CS101X"));
        assert!(!is_valid_course_code(""));
    }

    #[test]
    fn test_validate_accepts_complete_details() {
        assert!(details("CS101").validate().is_ok());
    }

    #[test]
    fn test_validate_reports_blank_fields_and_bad_code() {
        let mut input = details("cs1");
        input.name = "  ".to_string();
        input.secretary.email.clear();

        let err = input.validate().unwrap_err();
        assert_eq!(err.fields(), vec!["name", "secretary.email", "code"]);
    }

    #[test]
    fn test_blank_code_is_reported_once() {
        let err = details("").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["code"]);
        assert_eq!(err.errors[0].message, "cannot be empty");
    }

    #[test]
    fn test_activities_keep_insertion_order() {
        let mut course = Course::new(details("CS101"));
        let time = TimeRange::new(
            Weekday::Mon,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 4).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        for (id, kind) in [
            (5, ActivityKind::Lecture { recorded: true }),
            (2, ActivityKind::Tutorial { capacity: 20 }),
        ] {
            course.add_activity(Activity::new(
                ActivityId::new(id),
                ActivitySpec::new(time, "Room", kind),
            ));
        }

        let ids: Vec<u64> = course.activities().iter().map(|a| a.id().get()).collect();
        assert_eq!(ids, vec![5, 2]);
        assert!(course.has_activity(ActivityId::new(2)));
        assert!(!course.has_activity(ActivityId::new(3)));

        course.clear_activities();
        assert!(course.activities().is_empty());
    }

    #[test]
    fn test_display_lists_contacts() {
        let rendered = Course::new(details("CS101")).to_string();
        assert!(rendered.starts_with("Course: CS101 - Informatics 1\n"));
        assert!(rendered.contains("Course Organiser: Ada (ada@hindeburg.ac.nz)\n"));
        assert!(rendered.contains("Requires Computers: Yes\n"));
        assert!(rendered.ends_with("Activities:\n"));
    }
}
