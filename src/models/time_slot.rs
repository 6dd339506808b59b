use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Last representable minute of a day (23:59).
pub const LAST_MINUTE: u16 = 24 * 60 - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
            Day::Sat => "SAT",
            Day::Sun => "SUN",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Day::ALL
            .into_iter()
            .find(|d| d.as_str() == upper)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown day: {}", s)))
    }
}

/// A recurring weekly meeting window, e.g. `MON 09:00-10:15`.
///
/// Minutes are counted from midnight. Field order matters: the derived
/// `Ord` is lexicographic over (day, start, end), consistent with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeSlot {
    day: Day,
    start_minute: u16,
    end_minute: u16,
}

impl TimeSlot {
    pub fn new(day: Day, start_minute: u16, end_minute: u16) -> Result<Self, AppError> {
        if start_minute > LAST_MINUTE || end_minute > LAST_MINUTE {
            return Err(AppError::InvalidArgument(format!(
                "minutes must be within 0..={}",
                LAST_MINUTE
            )));
        }
        if end_minute <= start_minute {
            return Err(AppError::InvalidArgument(
                "end minute must be greater than start minute".to_string(),
            ));
        }
        Ok(Self {
            day,
            start_minute,
            end_minute,
        })
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }

    /// Half-open overlap on the same day.
    pub fn conflicts_with(&self, other: &TimeSlot) -> bool {
        if self.day != other.day {
            return false;
        }
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }

    /// Bounds that sort before/after every valid slot of `day`. Only used as range keys.
    pub(crate) fn day_bounds(day: Day) -> (TimeSlot, TimeSlot) {
        (
            TimeSlot { day, start_minute: 0, end_minute: 0 },
            TimeSlot { day, start_minute: u16::MAX, end_minute: u16::MAX },
        )
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            format_minute(self.start_minute),
            format_minute(self.end_minute)
        )
    }
}

pub fn format_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Parses `HH:MM` into minutes from midnight.
pub fn parse_minute(text: &str) -> Result<u16, AppError> {
    let invalid = || AppError::InvalidArgument(format!("invalid time of day: {}", text));
    let (h, m) = text.trim().split_once(':').ok_or_else(invalid)?;
    let h: u16 = h.parse().map_err(|_| invalid())?;
    let m: u16 = m.parse().map_err(|_| invalid())?;
    if h > 23 || m > 59 {
        return Err(invalid());
    }
    Ok(h * 60 + m)
}

/// Either `"09:30"` or `570`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinuteOfDay {
    Minutes(i64),
    Clock(String),
}

impl MinuteOfDay {
    pub fn to_minutes(&self) -> Result<u16, AppError> {
        match self {
            MinuteOfDay::Minutes(m) => u16::try_from(*m)
                .ok()
                .filter(|m| *m <= LAST_MINUTE)
                .ok_or_else(|| {
                    AppError::InvalidArgument(format!(
                        "minute {} is outside 0..={}",
                        m, LAST_MINUTE
                    ))
                }),
            MinuteOfDay::Clock(text) => parse_minute(text),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingTimeRequest {
    pub day: String,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl TryFrom<MeetingTimeRequest> for TimeSlot {
    type Error = AppError;

    fn try_from(req: MeetingTimeRequest) -> Result<Self, Self::Error> {
        let day = req.day.parse()?;
        TimeSlot::new(day, req.start.to_minutes()?, req.end.to_minutes()?)
    }
}
