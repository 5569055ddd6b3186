//! Per-student timetables and the overlap queries over them

use serde::{Deserialize, Serialize};

use super::activity::{Activity, ActivityId, ActivityKind, ActivityType, TimeRange};
use super::course::Course;
use super::lookup::CourseLookup;
use super::outcome::{Clash, SlotDescription, Warning};
use crate::constants::LABEL_UNKNOWN_ACTIVITY;
use crate::errors::{CatalogError, ConflictRule, Result};
use crate::impl_domain_status_conversions;

/// Selection state of a timetable slot. `Chosen` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotStatus {
    Unchosen,
    Chosen,
}

impl_domain_status_conversions!(SlotStatus {
    Unchosen => "unchosen",
    Chosen => "chosen",
});

/// One activity projected onto one student's timetable
///
/// The slot copies the activity's time range at insertion. The activity's
/// kind is not copied; it is resolved through a [`CourseLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    course_code: String,
    activity_id: ActivityId,
    time: TimeRange,
    status: SlotStatus,
}

impl TimeSlot {
    pub fn new(
        course_code: impl Into<String>,
        activity_id: ActivityId,
        time: TimeRange,
        status: SlotStatus,
    ) -> Self {
        Self { course_code: course_code.into(), activity_id, time, status }
    }

    pub fn for_activity(course_code: &str, activity: &Activity, status: SlotStatus) -> Self {
        Self::new(course_code, activity.id(), *activity.time(), status)
    }

    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    pub fn activity_id(&self) -> ActivityId {
        self.activity_id
    }

    pub fn time(&self) -> &TimeRange {
        &self.time
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn is_chosen(&self) -> bool {
        self.status == SlotStatus::Chosen
    }

    pub fn is_for(&self, course_code: &str, activity_id: ActivityId) -> bool {
        self.activity_id == activity_id && self.course_code == course_code
    }

    pub fn kind(&self, lookup: &dyn CourseLookup) -> Option<ActivityKind> {
        lookup.activity_kind(&self.course_code, self.activity_id)
    }

    pub fn is_recorded_lecture(&self, lookup: &dyn CourseLookup) -> bool {
        self.kind(lookup).is_some_and(ActivityKind::is_recorded_lecture)
    }

    pub fn is_unrecorded_lecture(&self, lookup: &dyn CourseLookup) -> bool {
        self.kind(lookup).is_some_and(ActivityKind::is_unrecorded_lecture)
    }

    pub fn label(&self, lookup: &dyn CourseLookup) -> &'static str {
        self.kind(lookup).map_or(LABEL_UNKNOWN_ACTIVITY, ActivityKind::label)
    }

    pub fn describe(&self, lookup: &dyn CourseLookup) -> SlotDescription {
        SlotDescription {
            course_code: self.course_code.clone(),
            activity_id: self.activity_id,
            label: self.label(lookup).to_string(),
            time: self.time,
        }
    }
}

/// One student's personal schedule
///
/// Holds at most one slot per `(course code, activity id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    student_email: String,
    slots: Vec<TimeSlot>,
}

impl Timetable {
    pub fn new(student_email: impl Into<String>) -> Self {
        Self { student_email: student_email.into(), slots: Vec::new() }
    }

    pub fn student_email(&self) -> &str {
        &self.student_email
    }

    /// Slots in insertion order
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_chosen_slots(&self) -> bool {
        self.slots.iter().any(TimeSlot::is_chosen)
    }

    pub fn has_slots_for_course(&self, course_code: &str) -> bool {
        self.slots.iter().any(|s| s.course_code == course_code)
    }

    pub fn slot(&self, course_code: &str, activity_id: ActivityId) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.is_for(course_code, activity_id))
    }

    pub fn num_chosen_activities(&self, course_code: &str) -> usize {
        self.slots.iter().filter(|s| s.course_code == course_code && s.is_chosen()).count()
    }

    /// Chosen slots of `course_code` whose activity is of `activity_type`.
    ///
    /// Returns 0 when no lookup is available or the course is unknown to it.
    pub fn count_chosen_activities_of_type(
        &self,
        course_code: &str,
        activity_type: ActivityType,
        lookup: Option<&dyn CourseLookup>,
    ) -> usize {
        let Some(course) = lookup.and_then(|l| l.course(course_code)) else {
            return 0;
        };
        self.count_chosen_in(course, activity_type)
    }

    fn count_chosen_in(&self, course: &Course, activity_type: ActivityType) -> usize {
        self.slots
            .iter()
            .filter(|s| s.course_code == course.code() && s.is_chosen())
            .filter(|s| {
                course
                    .activity(s.activity_id)
                    .is_some_and(|a| a.kind().activity_type() == activity_type)
            })
            .count()
    }

    /// Chosen slots overlapping `time`, optionally leaving out one slot.
    pub fn chosen_overlapping(
        &self,
        time: &TimeRange,
        exclude: Option<(&str, ActivityId)>,
    ) -> Vec<&TimeSlot> {
        self.slots
            .iter()
            .filter(|s| s.is_chosen() && s.time.overlaps(time))
            .filter(|s| exclude.map_or(true, |(code, id)| !s.is_for(code, id)))
            .collect()
    }

    /// Every chosen slot overlapping `time`, recorded lectures included.
    pub fn check_conflicts(
        &self,
        time: &TimeRange,
        lookup: &dyn CourseLookup,
    ) -> Vec<SlotDescription> {
        self.chosen_overlapping(time, None).into_iter().map(|s| s.describe(lookup)).collect()
    }

    /// Chosen slots overlapping `time` that are not recorded lectures.
    ///
    /// These are the clashes that block a slot from becoming chosen.
    pub fn blocking_conflicts(
        &self,
        time: &TimeRange,
        exclude: Option<(&str, ActivityId)>,
        lookup: &dyn CourseLookup,
    ) -> Vec<SlotDescription> {
        self.chosen_overlapping(time, exclude)
            .into_iter()
            .filter(|s| !s.is_recorded_lecture(lookup))
            .map(|s| s.describe(lookup))
            .collect()
    }

    /// Chosen recorded lectures overlapping `time`.
    pub fn recorded_lecture_conflicts(
        &self,
        time: &TimeRange,
        exclude: Option<(&str, ActivityId)>,
        lookup: &dyn CourseLookup,
    ) -> Vec<SlotDescription> {
        self.chosen_overlapping(time, exclude)
            .into_iter()
            .filter(|s| s.is_recorded_lecture(lookup))
            .map(|s| s.describe(lookup))
            .collect()
    }

    /// Chosen slots whose activity is an unrecorded lecture.
    pub fn unrecorded_lecture_slots(&self, lookup: &dyn CourseLookup) -> Vec<&TimeSlot> {
        self.slots.iter().filter(|s| s.is_chosen() && s.is_unrecorded_lecture(lookup)).collect()
    }

    /// Tutorial and lab shortfalls of one course against its requirements.
    pub fn quota_shortfalls(&self, course: &Course) -> Vec<Warning> {
        [
            (ActivityType::Tutorial, course.required_tutorials()),
            (ActivityType::Lab, course.required_labs()),
        ]
        .into_iter()
        .filter_map(|(activity_type, required)| {
            let chosen = self.count_chosen_in(course, activity_type);
            (chosen < required as usize).then(|| Warning::QuotaShortfall {
                course: course.code().to_string(),
                activity_type,
                required,
                chosen,
            })
        })
        .collect()
    }

    /// Shortfalls for every course that has at least one chosen slot, in
    /// the order the courses first appear.
    pub fn check_timetable_issues(&self, lookup: &dyn CourseLookup) -> Vec<Warning> {
        let mut codes: Vec<&str> = Vec::new();
        for slot in self.slots.iter().filter(|s| s.is_chosen()) {
            if !codes.contains(&slot.course_code.as_str()) {
                codes.push(&slot.course_code);
            }
        }

        codes
            .into_iter()
            .filter_map(|code| lookup.course(code))
            .flat_map(|course| self.quota_shortfalls(course))
            .collect()
    }

    /// Append a slot. Returns `false`, leaving the timetable unchanged, if a
    /// slot for the same course and activity already exists.
    pub fn insert_slot(&mut self, slot: TimeSlot) -> bool {
        if self.slot(&slot.course_code, slot.activity_id).is_some() {
            return false;
        }
        self.slots.push(slot);
        true
    }

    /// Mark an existing slot as chosen.
    ///
    /// Rejected when the slot is missing or overlaps a chosen slot that is not
    /// a recorded lecture. A slot that is already chosen stays chosen.
    pub fn choose_activity(
        &mut self,
        course_code: &str,
        activity_id: ActivityId,
        lookup: &dyn CourseLookup,
    ) -> Result<()> {
        let index = self.slots.iter().position(|s| s.is_for(course_code, activity_id)).ok_or_else(
            || CatalogError::SlotNotFound { course: course_code.to_string(), activity_id },
        )?;

        let target = &self.slots[index];
        if target.is_chosen() {
            return Ok(());
        }

        let blocking =
            self.blocking_conflicts(target.time(), Some((course_code, activity_id)), lookup);
        if !blocking.is_empty() {
            let candidate = target.describe(lookup);
            return Err(CatalogError::HardConflict {
                rule: ConflictRule::ChosenSlot,
                conflicts: blocking
                    .into_iter()
                    .map(|existing| Clash { candidate: candidate.clone(), existing })
                    .collect(),
            });
        }

        self.slots[index].status = SlotStatus::Chosen;
        Ok(())
    }

    /// Drop every slot of a course, returning how many were removed.
    pub fn remove_slots_for_course(&mut self, course_code: &str) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| s.course_code != course_code);
        before - self.slots.len()
    }
}
