//! Course registration, activities and course removal

use timetabler_domain::{
    is_valid_course_code, Activity, ActivityId, ActivitySpec, CatalogError, Course, CourseDetails,
    Result, Timetable,
};
use tracing::{debug, warn};

use super::Catalog;

impl Catalog {
    /// Register a course with an empty activity list.
    ///
    /// Blank fields and a malformed code are rejected before the duplicate
    /// check; nothing is stored on failure.
    pub fn add_course(&mut self, details: CourseDetails) -> Result<()> {
        details.validate()?;

        if self.courses.contains_key(&details.code) {
            return Err(CatalogError::DuplicateCourse(details.code));
        }

        debug!(course = %details.code, "course registered");
        self.courses.insert(details.code.clone(), Course::new(details));
        Ok(())
    }

    /// Whether `code` has the course-code format, registered or not
    pub fn check_course_code(code: &str) -> bool {
        is_valid_course_code(code)
    }

    pub fn has_course(&self, code: &str) -> bool {
        self.courses.contains_key(code)
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Delete a course and every timetable slot that refers to it.
    ///
    /// Returns the addresses to notify: each student who had slots for the
    /// course (ordered by email), then the organiser, then the secretary.
    /// Duplicates are kept.
    pub fn remove_course(&mut self, code: &str) -> Result<Vec<String>> {
        let Some(course) = self.courses.get_mut(code) else {
            return Err(CatalogError::CourseNotFound(code.to_string()));
        };
        course.clear_activities();

        let mut recipients: Vec<String> = self
            .timetables
            .values_mut()
            .filter_map(|timetable| {
                (timetable.remove_slots_for_course(code) > 0)
                    .then(|| timetable.student_email().to_string())
            })
            .collect();

        if let Some(course) = self.courses.remove(code) {
            recipients.push(course.organiser().email.clone());
            recipients.push(course.secretary().email.clone());
        }

        debug!(course = code, recipients = recipients.len(), "course removed");
        Ok(recipients)
    }

    /// Append an activity to a course, minting a fresh id.
    ///
    /// Returns `None`, without consuming an id, when the course is unknown.
    /// Also returns `None` once the id space is used up.
    pub fn add_activity_to_course(&mut self, code: &str, spec: ActivitySpec) -> Option<ActivityId> {
        if !self.courses.contains_key(code) {
            debug!(course = code, "activity ignored for unknown course");
            return None;
        }

        let Some(id) = self.mint_activity_id() else {
            warn!(course = code, "activity ids exhausted");
            return None;
        };
        let course = self.courses.get_mut(code)?;
        course.add_activity(Activity::new(id, spec));

        debug!(course = code, activity_id = %id, "activity added");
        Some(id)
    }

    /// Timetable of a student, created empty on first access
    pub fn timetable(&mut self, student_email: &str) -> &Timetable {
        self.timetables
            .entry(student_email.to_string())
            .or_insert_with(|| Timetable::new(student_email))
    }
}
