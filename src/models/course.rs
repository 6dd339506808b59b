use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{MeetingTimeRequest, TimeSlot, Waitlist, WaitlistEntry};

/// A course with a fixed seat count and a priority waitlist.
///
/// `enroll` never lets the enrolled set grow past `capacity`. Scheduling
/// conflicts are the caller's concern.
#[derive(Debug, Clone)]
pub struct Course {
    code: String,
    title: String,
    capacity: u32,
    meeting_times: BTreeSet<TimeSlot>,
    enrolled: HashSet<String>,
    waitlist: Waitlist,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        capacity: u32,
        meeting_times: impl IntoIterator<Item = TimeSlot>,
    ) -> Result<Self, AppError> {
        if capacity == 0 {
            return Err(AppError::InvalidArgument(
                "capacity must be > 0".to_string(),
            ));
        }
        Ok(Self {
            code: code.into(),
            title: title.into(),
            capacity,
            meeting_times: meeting_times.into_iter().collect(),
            enrolled: HashSet::new(),
            waitlist: Waitlist::default(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn meeting_times(&self) -> &BTreeSet<TimeSlot> {
        &self.meeting_times
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled.len()
    }

    /// Enrolled ids in ascending order.
    pub fn enrolled_student_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.enrolled.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn seats_remaining(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.enrolled.len())
    }

    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.enrolled.contains(student_id)
    }

    pub fn enroll(&mut self, student_id: &str) -> bool {
        if self.enrolled.len() >= self.capacity as usize {
            return false;
        }
        self.enrolled.insert(student_id.to_string())
    }

    pub fn drop(&mut self, student_id: &str) -> bool {
        self.enrolled.remove(student_id)
    }

    pub fn add_to_waitlist(&mut self, entry: WaitlistEntry) {
        self.waitlist.push(entry);
    }

    pub fn poll_waitlist(&mut self) -> Option<WaitlistEntry> {
        self.waitlist.pop()
    }

    pub fn waitlist_size(&self) -> usize {
        self.waitlist.len()
    }

    pub fn waitlist(&self) -> &Waitlist {
        &self.waitlist
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (cap {}, enrolled {})",
            self.code,
            self.title,
            self.capacity,
            self.enrolled.len()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub code: String,
    pub title: String,
    pub capacity: u32,
    #[serde(default)]
    pub meeting_times: Vec<MeetingTimeRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    pub code: String,
    pub title: String,
    pub capacity: u32,
    pub enrolled: usize,
    pub seats_remaining: usize,
    pub waitlist_size: usize,
    pub meeting_times: Vec<TimeSlot>,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            title: course.title.clone(),
            capacity: course.capacity,
            enrolled: course.enrolled_count(),
            seats_remaining: course.seats_remaining(),
            waitlist_size: course.waitlist_size(),
            meeting_times: course.meeting_times.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub summary: CourseSummary,
    pub enrolled_student_ids: Vec<String>,
    pub waitlist: Vec<WaitlistEntry>,
}

impl From<&Course> for CourseDetail {
    fn from(course: &Course) -> Self {
        Self {
            summary: CourseSummary::from(course),
            enrolled_student_ids: course
                .enrolled_student_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
            waitlist: course.waitlist.iter().cloned().collect(),
        }
    }
}
