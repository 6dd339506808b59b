mod common;

use chrono::{TimeZone, Utc};
use registrar::error::AppError;
use registrar::models::time_slot::{format_minute, parse_minute};
use registrar::models::{Day, MeetingTimeRequest, MinuteOfDay, TimeSlot, Waitlist, WaitlistEntry};

use common::slot;

#[test]
fn test_overlapping_slots_conflict() {
    let a = slot(Day::Mon, 540, 615);
    let b = slot(Day::Mon, 600, 660);
    assert!(a.conflicts_with(&b));
    assert!(b.conflicts_with(&a));
}

#[test]
fn test_touching_slots_do_not_conflict() {
    let a = slot(Day::Mon, 540, 600);
    let b = slot(Day::Mon, 600, 660);
    assert!(!a.conflicts_with(&b));
    assert!(!b.conflicts_with(&a));
}

#[test]
fn test_different_days_never_conflict() {
    let a = slot(Day::Mon, 540, 600);
    let b = slot(Day::Tue, 540, 600);
    assert!(!a.conflicts_with(&b));
}

#[test]
fn test_contained_slot_conflicts() {
    let outer = slot(Day::Fri, 480, 720);
    let inner = slot(Day::Fri, 600, 610);
    assert!(outer.conflicts_with(&inner));
    assert!(inner.conflicts_with(&outer));
}

#[test]
fn test_invalid_slots_are_rejected() {
    assert!(matches!(
        TimeSlot::new(Day::Mon, 600, 600),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(matches!(
        TimeSlot::new(Day::Mon, 660, 600),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(matches!(
        TimeSlot::new(Day::Mon, 600, 1440),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(TimeSlot::new(Day::Sun, 0, 1439).is_ok());
}

#[test]
fn test_ordering_is_day_then_start_then_end() {
    let mut slots = vec![
        slot(Day::Wed, 540, 600),
        slot(Day::Mon, 600, 660),
        slot(Day::Mon, 540, 700),
        slot(Day::Mon, 540, 600),
    ];
    slots.sort();
    assert_eq!(
        slots,
        vec![
            slot(Day::Mon, 540, 600),
            slot(Day::Mon, 540, 700),
            slot(Day::Mon, 600, 660),
            slot(Day::Wed, 540, 600),
        ]
    );
}

#[test]
fn test_display_and_parsing() {
    assert_eq!(slot(Day::Mon, 540, 615).to_string(), "MON 09:00-10:15");
    assert_eq!(format_minute(0), "00:00");
    assert_eq!(parse_minute("09:30").unwrap(), 570);
    assert!(parse_minute("24:00").is_err());
    assert!(parse_minute("nine").is_err());
    assert_eq!("thu".parse::<Day>().unwrap(), Day::Thu);
    assert!("Thursday".parse::<Day>().is_err());
}

#[test]
fn test_meeting_time_request_conversion() {
    let req = MeetingTimeRequest {
        day: "wed".to_string(),
        start: MinuteOfDay::Clock("13:00".to_string()),
        end: MinuteOfDay::Minutes(840),
    };
    assert_eq!(TimeSlot::try_from(req).unwrap(), slot(Day::Wed, 780, 840));

    let bad = MeetingTimeRequest {
        day: "wed".to_string(),
        start: MinuteOfDay::Clock("14:00".to_string()),
        end: MinuteOfDay::Clock("13:00".to_string()),
    };
    assert!(TimeSlot::try_from(bad).is_err());
}

#[test]
fn test_numeric_minutes_out_of_range_are_invalid() {
    assert_eq!(MinuteOfDay::Minutes(1439).to_minutes().unwrap(), 1439);
    for bad in [-5, 1440, 70000] {
        assert!(matches!(
            MinuteOfDay::Minutes(bad).to_minutes(),
            Err(AppError::InvalidArgument(_))
        ));
    }

    let req: MeetingTimeRequest =
        serde_json::from_str(r#"{"day": "MON", "start": -5, "end": 70000}"#).unwrap();
    assert!(TimeSlot::try_from(req).is_err());
}

#[test]
fn test_waitlist_orders_by_priority_time_then_sequence() {
    let early = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).unwrap();

    let mut waitlist = Waitlist::default();
    waitlist.push(WaitlistEntry::new("late-high", 0, late, 0));
    waitlist.push(WaitlistEntry::new("low", 2, early, 1));
    waitlist.push(WaitlistEntry::new("tie-second", 1, early, 3));
    waitlist.push(WaitlistEntry::new("tie-first", 1, early, 2));
    waitlist.push(WaitlistEntry::new("early-high", 0, early, 4));
    assert_eq!(waitlist.len(), 5);

    let order: Vec<String> = std::iter::from_fn(|| waitlist.pop())
        .map(|e| e.student_id().to_string())
        .collect();
    assert_eq!(
        order,
        vec!["early-high", "late-high", "tie-first", "tie-second", "low"]
    );
    assert!(waitlist.is_empty());
}

#[test]
fn test_waitlist_keeps_duplicate_requests() {
    let at = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
    let mut waitlist = Waitlist::default();
    waitlist.push(WaitlistEntry::new("S001", 1, at, 0));
    waitlist.push(WaitlistEntry::new("S001", 1, at, 1));
    assert_eq!(waitlist.len(), 2);
}
