//! The catalog engine
//!
//! [`Catalog`] owns every course and every student timetable of the process.
//! All mutations take `&mut self`, so a single owner (or the lock inside
//! [`crate::CatalogService`]) is the only writer.
//!
//! - `registry`: course registration, activities, course removal
//! - `enrolment`: adding courses to timetables and choosing activities

mod enrolment;
mod registry;

use std::collections::BTreeMap;

use timetabler_domain::constants::FIRST_ACTIVITY_ID;
use timetabler_domain::{ActivityId, Course, CourseLookup, Timetable};

/// Course registry plus the per-student timetables built from it
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: BTreeMap<String, Course>,
    timetables: BTreeMap<String, Timetable>,
    /// `None` once every id up to `u64::MAX` has been handed out
    next_activity_id: Option<u64>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Empty catalog whose first activity gets id 1
    pub fn new() -> Self {
        Self::with_first_activity_id(FIRST_ACTIVITY_ID)
    }

    /// Empty catalog minting activity ids from `first`
    pub fn with_first_activity_id(first: u64) -> Self {
        Self {
            courses: BTreeMap::new(),
            timetables: BTreeMap::new(),
            next_activity_id: Some(first),
        }
    }

    /// Registered courses, keyed by code
    pub fn courses(&self) -> &BTreeMap<String, Course> {
        &self.courses
    }

    /// Lookup over the registered courses
    pub fn lookup(&self) -> &dyn CourseLookup {
        &self.courses
    }

    /// Existing timetable of a student, without creating one
    pub fn find_timetable(&self, student_email: &str) -> Option<&Timetable> {
        self.timetables.get(student_email)
    }

    /// Emails of every student that has a timetable
    pub fn students(&self) -> impl Iterator<Item = &str> {
        self.timetables.keys().map(String::as_str)
    }

    /// Id the next added activity will receive, if any are left
    pub fn next_activity_id(&self) -> Option<ActivityId> {
        self.next_activity_id.map(ActivityId::new)
    }

    fn mint_activity_id(&mut self) -> Option<ActivityId> {
        let current = self.next_activity_id?;
        self.next_activity_id = current.checked_add(1);
        Some(ActivityId::new(current))
    }
}
