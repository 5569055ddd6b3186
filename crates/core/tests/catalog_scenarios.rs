//! End-to-end behaviour of the catalog engine

mod support;

use chrono::Weekday;
use support::fixtures::{
    weekly, CourseBuilder, LAB, LIVE_LECTURE, ORGANISER_EMAIL, RECORDED_LECTURE, SECRETARY_EMAIL,
    TUTORIAL,
};
use timetabler_core::Catalog;
use timetabler_domain::{
    ActivityType, CatalogError, ConflictRule, CourseLookup, SlotStatus, Timetable, Warning,
};

const ALICE: &str = "alice@hindeburg.ac.nz";
const BOB: &str = "bob@hindeburg.ac.nz";

/// No two overlapping chosen slots unless one of them is a recorded lecture
fn assert_conflict_free(timetable: &Timetable, lookup: &dyn CourseLookup) {
    let chosen: Vec<_> = timetable.slots().iter().filter(|s| s.is_chosen()).collect();
    for (i, a) in chosen.iter().enumerate() {
        for b in &chosen[i + 1..] {
            if a.time().overlaps(b.time()) {
                assert!(
                    a.is_recorded_lecture(lookup) || b.is_recorded_lecture(lookup),
                    "chosen slots clash: {:?} / {:?}",
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn recorded_lecture_is_chosen_and_tutorial_waits() {
    let mut catalog = Catalog::new();
    let ids = CourseBuilder::new("CS101")
        .tutorials(1)
        .activity(RECORDED_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 30)))
        .activity(TUTORIAL, weekly(Weekday::Wed, (14, 0), (15, 0)))
        .register(&mut catalog);

    let report = catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();

    assert_eq!(report.inserted, ids);
    assert_eq!(
        report.warnings,
        vec![Warning::TutorialsRequired { course: "CS101".to_string(), required: 1 }]
    );
    let timetable = catalog.find_timetable(ALICE).unwrap();
    assert_eq!(timetable.slot("CS101", ids[0]).unwrap().status(), SlotStatus::Chosen);
    assert_eq!(timetable.slot("CS101", ids[1]).unwrap().status(), SlotStatus::Unchosen);
    assert_eq!(timetable.num_chosen_activities("CS101"), 1);
}

#[test]
fn clashing_unrecorded_lectures_reject_the_whole_course() {
    let mut catalog = Catalog::new();
    CourseBuilder::new("CS101")
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 30)))
        .register(&mut catalog);
    CourseBuilder::new("MA201")
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 30)))
        .activity(TUTORIAL, weekly(Weekday::Fri, (9, 0), (10, 0)))
        .register(&mut catalog);

    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();
    let err = catalog.add_course_to_student_timetable(ALICE, "MA201").unwrap_err();

    match &err {
        CatalogError::HardConflict { rule, conflicts } => {
            assert_eq!(*rule, ConflictRule::NewUnrecordedLecture);
            assert_eq!(conflicts.len(), 1);
            assert_eq!(
                conflicts[0].to_string(),
                "MA201 - Unrecorded Lecture - 09:00-10:30 (Activity ID: 2) with CS101 - \
                 Unrecorded Lecture - 09:00-10:30 (Activity ID: 1)"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!catalog.find_timetable(ALICE).unwrap().has_slots_for_course("MA201"));
}

#[test]
fn recorded_lecture_or_lab_over_a_chosen_live_lecture_is_rejected() {
    let mut catalog = Catalog::new();
    CourseBuilder::new("CS101")
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 30)))
        .register(&mut catalog);
    CourseBuilder::new("MA201")
        .activity(RECORDED_LECTURE, weekly(Weekday::Mon, (10, 0), (11, 0)))
        .register(&mut catalog);
    CourseBuilder::new("PH301")
        .activity(LAB, weekly(Weekday::Mon, (8, 0), (9, 30)))
        .activity(TUTORIAL, weekly(Weekday::Thu, (9, 0), (10, 0)))
        .register(&mut catalog);

    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();

    for code in ["MA201", "PH301"] {
        let err = catalog.add_course_to_student_timetable(ALICE, code).unwrap_err();
        match &err {
            CatalogError::HardConflict { rule, conflicts } => {
                assert_eq!(*rule, ConflictRule::ExistingUnrecordedLecture);
                assert_eq!(conflicts.len(), 1);
            }
            other => panic!("unexpected error for {code}: {other:?}"),
        }
        assert!(!catalog.find_timetable(ALICE).unwrap().has_slots_for_course(code));
    }
}

#[test]
fn live_lecture_over_a_chosen_tutorial_is_rejected() {
    let mut catalog = Catalog::new();
    let cs = CourseBuilder::new("CS101")
        .activity(TUTORIAL, weekly(Weekday::Tue, (11, 0), (12, 0)))
        .register(&mut catalog);
    CourseBuilder::new("MA201")
        .activity(LIVE_LECTURE, weekly(Weekday::Tue, (11, 30), (12, 30)))
        .activity(LAB, weekly(Weekday::Fri, (14, 0), (16, 0)))
        .register(&mut catalog);

    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();
    catalog.choose_activity_for_course(ALICE, "CS101", cs[0]).unwrap();

    let err = catalog.add_course_to_student_timetable(ALICE, "MA201").unwrap_err();
    assert!(matches!(
        err,
        CatalogError::HardConflict { rule: ConflictRule::NewUnrecordedLecture, .. }
    ));

    let timetable = catalog.find_timetable(ALICE).unwrap();
    assert!(!timetable.has_slots_for_course("MA201"));
    assert_eq!(timetable.slots().len(), 1);
}

#[test]
fn second_clashing_tutorial_stays_unchosen() {
    let mut catalog = Catalog::new();
    let cs = CourseBuilder::new("CS101")
        .activity(TUTORIAL, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .register(&mut catalog);
    let ma = CourseBuilder::new("MA201")
        .activity(TUTORIAL, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .register(&mut catalog);

    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();
    catalog.add_course_to_student_timetable(ALICE, "MA201").unwrap();
    catalog.choose_activity_for_course(ALICE, "CS101", cs[0]).unwrap();

    let err = catalog.choose_activity_for_course(ALICE, "MA201", ma[0]).unwrap_err();
    assert!(matches!(err, CatalogError::HardConflict { rule: ConflictRule::ChosenSlot, .. }));

    let timetable = catalog.find_timetable(ALICE).unwrap();
    assert!(!timetable.slot("MA201", ma[0]).unwrap().is_chosen());
    assert_conflict_free(timetable, catalog.lookup());
}

#[test]
fn removing_a_course_clears_every_timetable() {
    let mut catalog = Catalog::new();
    CourseBuilder::new("CS101")
        .activity(RECORDED_LECTURE, weekly(Weekday::Tue, (11, 0), (12, 0)))
        .activity(LAB, weekly(Weekday::Thu, (14, 0), (16, 0)))
        .register(&mut catalog);
    CourseBuilder::new("MA201")
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .register(&mut catalog);

    for student in [ALICE, BOB] {
        catalog.add_course_to_student_timetable(student, "CS101").unwrap();
    }
    catalog.add_course_to_student_timetable(BOB, "MA201").unwrap();

    let mut recipients = catalog.remove_course("CS101").unwrap();
    recipients.sort();
    let mut expected = vec![ALICE, BOB, ORGANISER_EMAIL, SECRETARY_EMAIL];
    expected.sort_unstable();
    assert_eq!(recipients, expected);

    assert!(!catalog.has_course("CS101"));
    assert!(!catalog.find_timetable(ALICE).unwrap().has_slots_for_course("CS101"));
    let bob = catalog.find_timetable(BOB).unwrap();
    assert!(!bob.has_slots_for_course("CS101"));
    assert!(bob.has_slots_for_course("MA201"));
}

#[test]
fn duplicate_staff_addresses_are_kept() {
    let mut catalog = Catalog::new();
    CourseBuilder::new("CS101")
        .organiser("Alice Organiser", ALICE)
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .register(&mut catalog);
    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();

    let recipients = catalog.remove_course("CS101").unwrap();
    assert_eq!(recipients, vec![ALICE, ALICE, SECRETARY_EMAIL]);
}

#[test]
fn re_adding_a_course_leaves_the_timetable_unchanged() {
    let mut catalog = Catalog::new();
    let ids = CourseBuilder::new("CS101")
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .activity(TUTORIAL, weekly(Weekday::Tue, (9, 0), (10, 0)))
        .register(&mut catalog);
    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();
    catalog.choose_activity_for_course(ALICE, "CS101", ids[1]).unwrap();
    let before = catalog.find_timetable(ALICE).unwrap().clone();

    let err = catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap_err();

    assert_eq!(err, CatalogError::CourseAlreadyInTimetable("CS101".to_string()));
    assert_eq!(catalog.find_timetable(ALICE).unwrap(), &before);
}

#[test]
fn failed_add_does_not_create_a_timetable() {
    let mut catalog = Catalog::new();
    assert!(catalog.add_course_to_student_timetable(ALICE, "CS101").is_err());
    assert!(catalog.find_timetable(ALICE).is_none());

    // get-or-create still works afterwards
    assert_eq!(catalog.timetable(ALICE).student_email(), ALICE);
}

#[test]
fn activity_ids_increase_across_courses_and_removals() {
    let mut catalog = Catalog::new();
    let first = CourseBuilder::new("CS101")
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .activity(TUTORIAL, weekly(Weekday::Tue, (9, 0), (10, 0)))
        .register(&mut catalog);
    let second = CourseBuilder::new("MA201")
        .activity(LAB, weekly(Weekday::Wed, (9, 0), (10, 0)))
        .register(&mut catalog);
    catalog.remove_course("CS101").unwrap();
    let third = CourseBuilder::new("CS101")
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .register(&mut catalog);

    let all: Vec<u64> = first.iter().chain(&second).chain(&third).map(|id| id.get()).collect();
    assert_eq!(all, vec![1, 2, 3, 4]);
}

#[test]
fn course_code_format() {
    for (code, valid) in [
        ("CS101", true),
        ("cs101", false),
        ("C1", false),
        ("CSC1000", true),
        ("INF2SEPP", false),
        ("CS 101", false),
    ] {
        assert_eq!(Catalog::check_course_code(code), valid, "{code}");
    }
}

#[test]
fn recorded_lectures_never_block_choices() {
    let mut catalog = Catalog::new();
    CourseBuilder::new("CS101")
        .activity(RECORDED_LECTURE, weekly(Weekday::Mon, (9, 0), (11, 0)))
        .register(&mut catalog);
    let ma = CourseBuilder::new("MA201")
        .tutorials(1)
        .activity(TUTORIAL, weekly(Weekday::Mon, (10, 0), (11, 0)))
        .activity(TUTORIAL, weekly(Weekday::Mon, (10, 30), (11, 30)))
        .register(&mut catalog);

    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();
    catalog.add_course_to_student_timetable(ALICE, "MA201").unwrap();

    let report = catalog.choose_activity_for_course(ALICE, "MA201", ma[0]).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], Warning::OverlapsRecordedLecture { .. }));

    // Choosing again is accepted and changes nothing
    catalog.choose_activity_for_course(ALICE, "MA201", ma[0]).unwrap();

    let err = catalog.choose_activity_for_course(ALICE, "MA201", ma[1]).unwrap_err();
    assert_eq!(err.reason(), "Conflicts with chosen activities");

    let timetable = catalog.find_timetable(ALICE).unwrap();
    assert_eq!(
        timetable.count_chosen_activities_of_type(
            "MA201",
            ActivityType::Tutorial,
            Some(catalog.lookup())
        ),
        1
    );
    assert!(timetable.check_timetable_issues(catalog.lookup()).is_empty());
    assert_conflict_free(timetable, catalog.lookup());
}

#[test]
fn invariant_holds_after_mixed_operations() {
    let mut catalog = Catalog::new();
    let cs = CourseBuilder::new("CS101")
        .tutorials(1)
        .labs(1)
        .activity(LIVE_LECTURE, weekly(Weekday::Mon, (9, 0), (10, 0)))
        .activity(RECORDED_LECTURE, weekly(Weekday::Tue, (9, 0), (10, 0)))
        .activity(TUTORIAL, weekly(Weekday::Tue, (9, 30), (10, 30)))
        .activity(TUTORIAL, weekly(Weekday::Wed, (9, 0), (10, 0)))
        .activity(LAB, weekly(Weekday::Wed, (9, 30), (11, 0)))
        .register(&mut catalog);
    let ma = CourseBuilder::new("MA201")
        .activity(RECORDED_LECTURE, weekly(Weekday::Tue, (9, 0), (10, 0)))
        .activity(TUTORIAL, weekly(Weekday::Wed, (10, 0), (11, 0)))
        .register(&mut catalog);

    catalog.add_course_to_student_timetable(ALICE, "CS101").unwrap();
    catalog.add_course_to_student_timetable(ALICE, "MA201").unwrap();

    let attempts =
        [("CS101", cs[2]), ("CS101", cs[3]), ("CS101", cs[4]), ("MA201", ma[1]), ("CS101", cs[0])];
    for (code, id) in attempts {
        let _ = catalog.choose_activity_for_course(ALICE, code, id);
        assert_conflict_free(catalog.find_timetable(ALICE).unwrap(), catalog.lookup());
    }

    let timetable = catalog.find_timetable(ALICE).unwrap();
    assert!(timetable.slot("CS101", cs[2]).unwrap().is_chosen());
    assert!(timetable.slot("CS101", cs[3]).unwrap().is_chosen());
    assert!(!timetable.slot("CS101", cs[4]).unwrap().is_chosen());
}
