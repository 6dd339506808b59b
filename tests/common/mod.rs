#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use registrar::models::{Day, TimeSlot};
use registrar::services::{Clock, EnrollmentEngine};

/// Advances one second on every call, so later requests get later timestamps.
pub struct StepClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let n = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.base + Duration::seconds(n)
    }
}

pub fn slot(day: Day, start: u16, end: u16) -> TimeSlot {
    TimeSlot::new(day, start, end).expect("valid slot")
}

pub fn engine() -> EnrollmentEngine {
    EnrollmentEngine::with_clock(Arc::new(StepClock::new()))
}

/// Students S001..S003 plus CS101 (cap 2, MON/WED 09:00-10:15) and
/// MATH201 (cap 1, TUE/THU 11:00-12:15).
pub fn seeded_engine() -> EnrollmentEngine {
    let mut engine = engine();
    engine.add_student("S001", "Alice");
    engine.add_student("S002", "Bob");
    engine.add_student("S003", "Hamza");

    engine
        .add_course(
            "CS101",
            "Intro to CS",
            2,
            [slot(Day::Mon, 9 * 60, 10 * 60 + 15), slot(Day::Wed, 9 * 60, 10 * 60 + 15)],
        )
        .expect("valid course");
    engine
        .add_course(
            "MATH201",
            "Discrete Math",
            1,
            [slot(Day::Tue, 11 * 60, 12 * 60 + 15), slot(Day::Thu, 11 * 60, 12 * 60 + 15)],
        )
        .expect("valid course");
    engine
}

/// Checks capacity and that every schedule is exactly the union of its courses' slots.
pub fn assert_consistent(engine: &EnrollmentEngine) {
    for course in engine.courses() {
        assert!(
            course.enrolled_count() <= course.capacity() as usize,
            "{} over capacity",
            course.code()
        );
        for id in course.enrolled_student_ids() {
            let student = engine.student(id).expect("enrolled student exists");
            assert!(student.enrolled_courses().contains(course.code()));
        }
    }

    for student in engine.students() {
        let mut expected = std::collections::BTreeSet::new();
        for code in student.enrolled_courses() {
            let course = engine.course(code).expect("enrolled course exists");
            assert!(course.is_enrolled(student.id()));
            expected.extend(course.meeting_times().iter().copied());
        }
        let actual: std::collections::BTreeSet<TimeSlot> =
            student.schedule().iter().copied().collect();
        assert_eq!(actual, expected, "schedule drift for {}", student.id());
    }
}
