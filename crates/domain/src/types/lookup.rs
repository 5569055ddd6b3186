//! Read access to catalog courses for timetable queries

use std::collections::{BTreeMap, HashMap};

use super::activity::{Activity, ActivityId, ActivityKind};
use super::course::Course;

/// Resolves courses and activities by key.
///
/// Timetable slots only hold `(course code, activity id)`; everything else
/// about an activity is looked up through this trait when needed.
pub trait CourseLookup {
    fn course(&self, code: &str) -> Option<&Course>;

    fn activity(&self, code: &str, id: ActivityId) -> Option<&Activity> {
        self.course(code)?.activity(id)
    }

    fn activity_kind(&self, code: &str, id: ActivityId) -> Option<ActivityKind> {
        self.activity(code, id).map(Activity::kind)
    }
}

impl CourseLookup for BTreeMap<String, Course> {
    fn course(&self, code: &str) -> Option<&Course> {
        self.get(code)
    }
}

impl CourseLookup for HashMap<String, Course> {
    fn course(&self, code: &str) -> Option<&Course> {
        self.get(code)
    }
}
