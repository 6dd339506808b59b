use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A pending enrollment request. Lower `priority` wins; ties go to the
/// earlier request, then to the lower insertion sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WaitlistEntry {
    priority: u8,
    requested_at: DateTime<Utc>,
    sequence: u64,
    student_id: String,
}

impl WaitlistEntry {
    pub fn new(
        student_id: impl Into<String>,
        priority: u8,
        requested_at: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        Self {
            priority,
            requested_at,
            sequence,
            student_id: student_id.into(),
        }
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Priority-ordered multiset of requests. Entries are unique by sequence,
/// so a plain ordered set holds duplicates of the same student.
#[derive(Debug, Clone, Default)]
pub struct Waitlist {
    entries: BTreeSet<WaitlistEntry>,
}

impl Waitlist {
    pub fn push(&mut self, entry: WaitlistEntry) {
        self.entries.insert(entry);
    }

    pub fn pop(&mut self) -> Option<WaitlistEntry> {
        self.entries.pop_first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaitlistEntry> {
        self.entries.iter()
    }
}
