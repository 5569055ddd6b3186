//! Timetable mutations: adding courses and choosing activities
//!
//! Conflict rules, in the order they are applied when a course is added:
//! 1. an unrecorded lecture of the new course may not overlap a chosen slot
//!    that is not a recorded lecture (aborts the add)
//! 2. no activity of the new course may overlap a chosen unrecorded lecture
//!    already in the timetable (aborts the add)
//! 3. a chosen slot that still clashes while being inserted is skipped
//! 4. overlaps involving recorded lectures only produce warnings

use timetabler_domain::{
    Activity, ActivityId, CatalogError, ChoiceReport, Clash, ConflictRule, Course, CourseLookup,
    EnrolmentReport, Result, SlotDescription, SlotStatus, TimeSlot, Timetable, Warning,
};
use tracing::debug;

use super::Catalog;

impl Catalog {
    /// Put every activity of a course into a student's timetable.
    ///
    /// Lectures start out chosen, tutorials and labs unchosen. The whole add
    /// is rejected on an unrecorded-lecture clash; a single chosen slot that
    /// clashes is skipped and reported instead.
    pub fn add_course_to_student_timetable(
        &mut self,
        student_email: &str,
        code: &str,
    ) -> Result<EnrolmentReport> {
        let course =
            self.courses.get(code).ok_or_else(|| CatalogError::CourseNotFound(code.to_string()))?;
        let lookup: &dyn CourseLookup = &self.courses;

        if let Some(existing) = self.timetables.get(student_email) {
            if existing.has_slots_for_course(code) {
                return Err(CatalogError::CourseAlreadyInTimetable(code.to_string()));
            }
            check_new_unrecorded_lectures(existing, course, lookup)?;
            check_existing_unrecorded_lectures(existing, course, lookup)?;
        }

        let timetable = self
            .timetables
            .entry(student_email.to_string())
            .or_insert_with(|| Timetable::new(student_email));

        let mut report = EnrolmentReport { course: code.to_string(), ..EnrolmentReport::default() };
        let mut recorded: Vec<&Activity> = Vec::new();

        for activity in course.activities() {
            let kind = activity.kind();
            let status = if kind.is_lecture() { SlotStatus::Chosen } else { SlotStatus::Unchosen };

            if kind.is_unrecorded_lecture() {
                let conflicts = timetable.blocking_conflicts(activity.time(), None, lookup);
                if !conflicts.is_empty() {
                    debug!(
                        student = student_email,
                        course = code,
                        activity_id = %activity.id(),
                        "activity skipped on clash"
                    );
                    report.skipped.push(activity.id());
                    report.warnings.push(Warning::ActivitySkipped {
                        activity: SlotDescription::of_activity(code, activity),
                        conflicts,
                    });
                    continue;
                }
            }

            if timetable.insert_slot(TimeSlot::for_activity(code, activity, status)) {
                report.inserted.push(activity.id());
                if kind.is_recorded_lecture() {
                    recorded.push(activity);
                }
            }
        }

        for activity in recorded {
            let conflicts: Vec<SlotDescription> = timetable
                .chosen_overlapping(activity.time(), Some((code, activity.id())))
                .into_iter()
                .map(|slot| slot.describe(lookup))
                .collect();
            if !conflicts.is_empty() {
                report.warnings.push(Warning::RecordedLectureOverlap {
                    activity: SlotDescription::of_activity(code, activity),
                    conflicts,
                });
            }
        }

        if course.required_tutorials() > 0 {
            report.warnings.push(Warning::TutorialsRequired {
                course: code.to_string(),
                required: course.required_tutorials(),
            });
        }
        if course.required_labs() > 0 {
            report.warnings.push(Warning::LabsRequired {
                course: code.to_string(),
                required: course.required_labs(),
            });
        }

        debug!(
            student = student_email,
            course = code,
            inserted = report.inserted.len(),
            skipped = report.skipped.len(),
            "course added to timetable"
        );
        Ok(report)
    }

    /// Mark a tutorial or lab of a course as chosen.
    ///
    /// Rejected when the slot overlaps any chosen slot that is not a recorded
    /// lecture. Overlaps with recorded lectures and unmet tutorial or lab
    /// requirements come back as warnings.
    pub fn choose_activity_for_course(
        &mut self,
        student_email: &str,
        code: &str,
        activity_id: ActivityId,
    ) -> Result<ChoiceReport> {
        let course =
            self.courses.get(code).ok_or_else(|| CatalogError::CourseNotFound(code.to_string()))?;
        let activity = course.activity(activity_id).ok_or_else(|| CatalogError::ActivityNotFound {
            course: code.to_string(),
            activity_id,
        })?;
        let timetable = self
            .timetables
            .get_mut(student_email)
            .filter(|t| t.has_slots_for_course(code))
            .ok_or_else(|| CatalogError::CourseNotInTimetable(code.to_string()))?;
        if activity.kind().is_lecture() {
            return Err(CatalogError::LectureNotChoosable { course: code.to_string(), activity_id });
        }

        let lookup: &dyn CourseLookup = &self.courses;
        timetable.choose_activity(code, activity_id, lookup)?;

        let mut warnings = Vec::new();
        let recorded = timetable.recorded_lecture_conflicts(
            activity.time(),
            Some((code, activity_id)),
            lookup,
        );
        if !recorded.is_empty() {
            warnings.push(Warning::OverlapsRecordedLecture {
                activity: SlotDescription::of_activity(code, activity),
                conflicts: recorded,
            });
        }
        warnings.extend(timetable.quota_shortfalls(course));

        debug!(
            student = student_email,
            course = code,
            activity_id = %activity_id,
            "activity chosen"
        );
        Ok(ChoiceReport { course: code.to_string(), activity: activity_id, warnings })
    }

    /// Drop every slot of a course from a student's timetable.
    ///
    /// Returns the number of slots removed.
    pub fn remove_course_from_student_timetable(
        &mut self,
        student_email: &str,
        code: &str,
    ) -> Result<usize> {
        if !self.courses.contains_key(code) {
            return Err(CatalogError::CourseNotFound(code.to_string()));
        }
        let timetable = self
            .timetables
            .get_mut(student_email)
            .filter(|t| t.has_slots_for_course(code))
            .ok_or_else(|| CatalogError::CourseNotInTimetable(code.to_string()))?;

        let removed = timetable.remove_slots_for_course(code);
        debug!(student = student_email, course = code, removed, "course removed from timetable");
        Ok(removed)
    }
}

fn clashes_of(candidate: &SlotDescription, existing: Vec<SlotDescription>) -> Vec<Clash> {
    existing.into_iter().map(|existing| Clash { candidate: candidate.clone(), existing }).collect()
}

/// Unrecorded lectures of `course` against chosen slots that are not
/// recorded lectures
fn check_new_unrecorded_lectures(
    timetable: &Timetable,
    course: &Course,
    lookup: &dyn CourseLookup,
) -> Result<()> {
    let mut conflicts = Vec::new();
    for activity in course.activities().iter().filter(|a| a.kind().is_unrecorded_lecture()) {
        let candidate = SlotDescription::of_activity(course.code(), activity);
        let blocking = timetable.blocking_conflicts(activity.time(), None, lookup);
        conflicts.extend(clashes_of(&candidate, blocking));
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::HardConflict { rule: ConflictRule::NewUnrecordedLecture, conflicts })
    }
}

/// Every activity of `course` against chosen unrecorded lectures
fn check_existing_unrecorded_lectures(
    timetable: &Timetable,
    course: &Course,
    lookup: &dyn CourseLookup,
) -> Result<()> {
    let lectures = timetable.unrecorded_lecture_slots(lookup);
    if lectures.is_empty() {
        return Ok(());
    }

    let mut conflicts = Vec::new();
    for activity in course.activities() {
        let candidate = SlotDescription::of_activity(course.code(), activity);
        let overlapping = lectures
            .iter()
            .filter(|slot| slot.time().overlaps(activity.time()))
            .map(|slot| slot.describe(lookup))
            .collect();
        conflicts.extend(clashes_of(&candidate, overlapping));
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::HardConflict { rule: ConflictRule::ExistingUnrecordedLecture, conflicts })
    }
}
