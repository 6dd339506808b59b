use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{Course, Student, TimeSlot, WaitlistEntry};
use crate::services::clock::{Clock, SystemClock};

/// Terminal result of a single enrollment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollOutcome {
    Enrolled,
    AddedToWaitlist,
    Conflict,
    AlreadyEnrolled,
    NoSuchStudent,
    NoSuchCourse,
}

impl fmt::Display for EnrollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnrollOutcome::Enrolled => "ENROLLED",
            EnrollOutcome::AddedToWaitlist => "ADDED_TO_WAITLIST",
            EnrollOutcome::Conflict => "CONFLICT",
            EnrollOutcome::AlreadyEnrolled => "ALREADY_ENROLLED",
            EnrollOutcome::NoSuchStudent => "NO_SUCH_STUDENT",
            EnrollOutcome::NoSuchCourse => "NO_SUCH_COURSE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub name: Option<String>,
}

/// Read projection of one course, rendered as text by `Display`.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub code: String,
    pub title: String,
    pub capacity: u32,
    pub meeting_times: Vec<TimeSlot>,
    pub enrolled: Vec<RosterEntry>,
    pub waitlist_size: usize,
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} - {} (cap {}, enrolled {})",
            self.code,
            self.title,
            self.capacity,
            self.enrolled.len()
        )?;
        let times: Vec<String> = self.meeting_times.iter().map(ToString::to_string).collect();
        writeln!(f, "Meeting Times: [{}]", times.join(", "))?;
        writeln!(f, "Enrolled:")?;
        for entry in &self.enrolled {
            match &entry.name {
                Some(name) => writeln!(f, " - {} - {}", entry.student_id, name)?,
                None => writeln!(f, " - {}", entry.student_id)?,
            }
        }
        writeln!(f, "Waitlist size: {}", self.waitlist_size)
    }
}

/// In-memory registrar: the student and course tables plus every rule
/// that ties them together.
///
/// A student's course set and schedule are only changed through `seat`
/// and `unseat`, so both always move together with the course's enrolled set.
pub struct EnrollmentEngine {
    students: BTreeMap<String, Student>,
    courses: BTreeMap<String, Course>,
    clock: Arc<dyn Clock>,
    next_sequence: u64,
}

impl Default for EnrollmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrollmentEngine {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            students: BTreeMap::new(),
            courses: BTreeMap::new(),
            clock,
            next_sequence: 0,
        }
    }

    pub fn add_student(&mut self, id: &str, name: &str) -> bool {
        if self.students.contains_key(id) {
            return false;
        }
        self.students.insert(id.to_string(), Student::new(id, name));
        info!("registered student {}", id);
        true
    }

    /// `Ok(false)` when the code is taken; `Err` when the course itself is invalid.
    pub fn add_course(
        &mut self,
        code: &str,
        title: &str,
        capacity: u32,
        meeting_times: impl IntoIterator<Item = TimeSlot>,
    ) -> Result<bool, AppError> {
        if self.courses.contains_key(code) {
            return Ok(false);
        }
        let course = Course::new(code, title, capacity, meeting_times)?;
        self.courses.insert(code.to_string(), course);
        info!("created course {} (capacity {})", code, capacity);
        Ok(true)
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn enroll(&mut self, student_id: &str, course_code: &str, priority: u8) -> EnrollOutcome {
        let Some(student) = self.students.get_mut(student_id) else {
            return EnrollOutcome::NoSuchStudent;
        };
        let Some(course) = self.courses.get_mut(course_code) else {
            return EnrollOutcome::NoSuchCourse;
        };
        if course.is_enrolled(student_id) {
            return EnrollOutcome::AlreadyEnrolled;
        }
        if student.has_conflict(course.meeting_times()) {
            debug!("{} conflicts with schedule of {}", course_code, student_id);
            return EnrollOutcome::Conflict;
        }
        if seat(student, course) {
            info!("enrolled {} in {}", student_id, course_code);
            return EnrollOutcome::Enrolled;
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        course.add_to_waitlist(WaitlistEntry::new(
            student_id,
            priority,
            self.clock.now(),
            sequence,
        ));
        info!(
            "waitlisted {} for {} (priority {}, {} waiting)",
            student_id,
            course_code,
            priority,
            course.waitlist_size()
        );
        EnrollOutcome::AddedToWaitlist
    }

    pub fn drop(&mut self, student_id: &str, course_code: &str) -> bool {
        self.drop_with_promotions(student_id, course_code).is_some()
    }

    /// Like `drop`, but reports which waitlisted students took the freed seats.
    /// `None` means nothing changed.
    pub fn drop_with_promotions(
        &mut self,
        student_id: &str,
        course_code: &str,
    ) -> Option<Vec<String>> {
        let student = self.students.get_mut(student_id)?;
        let course = self.courses.get_mut(course_code)?;
        if !unseat(student, course) {
            return None;
        }
        info!("dropped {} from {}", student_id, course_code);
        Some(self.promote(course_code))
    }

    /// Fills free seats from the waitlist. Stale, duplicate and conflicting
    /// entries are discarded for good.
    pub fn promote(&mut self, course_code: &str) -> Vec<String> {
        let mut promoted = Vec::new();
        let Some(course) = self.courses.get_mut(course_code) else {
            return promoted;
        };

        while course.seats_remaining() > 0 {
            let Some(entry) = course.poll_waitlist() else {
                break;
            };
            let Some(candidate) = self.students.get_mut(entry.student_id()) else {
                debug!("discarding stale waitlist entry for {}", entry.student_id());
                continue;
            };
            if course.is_enrolled(candidate.id()) {
                debug!("{} already holds a seat in {}", candidate.id(), course_code);
                continue;
            }
            if candidate.has_conflict(course.meeting_times()) {
                info!(
                    "skipping waitlisted {} for {}: schedule conflict",
                    candidate.id(),
                    course_code
                );
                continue;
            }
            if seat(candidate, course) {
                info!("promoted {} into {}", candidate.id(), course_code);
                promoted.push(candidate.id().to_string());
            }
        }

        promoted
    }

    pub fn roster(&self, course_code: &str) -> Option<Roster> {
        let course = self.courses.get(course_code)?;
        let enrolled = course
            .enrolled_student_ids()
            .into_iter()
            .map(|id| RosterEntry {
                student_id: id.to_string(),
                name: self.students.get(id).map(|s| s.name().to_string()),
            })
            .collect();

        Some(Roster {
            code: course.code().to_string(),
            title: course.title().to_string(),
            capacity: course.capacity(),
            meeting_times: course.meeting_times().iter().copied().collect(),
            enrolled,
            waitlist_size: course.waitlist_size(),
        })
    }

    pub fn get_roster(&self, course_code: &str) -> Option<String> {
        self.roster(course_code).map(|r| r.to_string())
    }
}

fn seat(student: &mut Student, course: &mut Course) -> bool {
    if !course.enroll(student.id()) {
        return false;
    }
    student.take_course(course.code(), course.meeting_times());
    true
}

fn unseat(student: &mut Student, course: &mut Course) -> bool {
    if !course.drop(student.id()) {
        return false;
    }
    student.release_course(course.code(), course.meeting_times());
    true
}
