use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::models::TimeSlot;

/// Ordered set of the slots a student currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScheduleIndex {
    slots: BTreeSet<TimeSlot>,
}

impl ScheduleIndex {
    /// True if any candidate overlaps a held slot. Only slots on the
    /// candidate's day are visited.
    pub fn conflicts_with<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a TimeSlot>,
    {
        candidates.into_iter().any(|candidate| {
            let (lo, hi) = TimeSlot::day_bounds(candidate.day());
            self.slots
                .range(lo..=hi)
                .take_while(|held| held.start_minute() < candidate.end_minute())
                .any(|held| held.conflicts_with(candidate))
        })
    }

    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.slots.contains(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter()
    }

    pub(crate) fn insert_all<'a, I>(&mut self, slots: I)
    where
        I: IntoIterator<Item = &'a TimeSlot>,
    {
        self.slots.extend(slots.into_iter().copied());
    }

    pub(crate) fn remove_all<'a, I>(&mut self, slots: I)
    where
        I: IntoIterator<Item = &'a TimeSlot>,
    {
        for slot in slots {
            self.slots.remove(slot);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Student {
    id: String,
    name: String,
    enrolled_courses: BTreeSet<String>,
    schedule: ScheduleIndex,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enrolled_courses: BTreeSet::new(),
            schedule: ScheduleIndex::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enrolled_courses(&self) -> &BTreeSet<String> {
        &self.enrolled_courses
    }

    pub fn schedule(&self) -> &ScheduleIndex {
        &self.schedule
    }

    pub fn has_conflict<'a, I>(&self, meeting_times: I) -> bool
    where
        I: IntoIterator<Item = &'a TimeSlot>,
    {
        self.schedule.conflicts_with(meeting_times)
    }

    // Course set and schedule change together; the engine is the only caller.
    pub(crate) fn take_course(&mut self, course_code: &str, meeting_times: &BTreeSet<TimeSlot>) {
        self.enrolled_courses.insert(course_code.to_string());
        self.schedule.insert_all(meeting_times);
    }

    pub(crate) fn release_course(&mut self, course_code: &str, meeting_times: &BTreeSet<TimeSlot>) {
        self.enrolled_courses.remove(course_code);
        self.schedule.remove_all(meeting_times);
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}
