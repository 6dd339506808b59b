pub mod course;
pub mod student;
pub mod time_slot;
pub mod waitlist;

pub use course::{Course, CourseDetail, CourseSummary, NewCourseRequest};
pub use student::{ScheduleIndex, Student};
pub use time_slot::{Day, MeetingTimeRequest, MinuteOfDay, TimeSlot};
pub use waitlist::{Waitlist, WaitlistEntry};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudentRequest {
    pub id: String,
    pub name: String,
}
