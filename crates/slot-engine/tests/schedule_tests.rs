//! Tests for expanding a submission into dated availabilities.

use chrono::{NaiveDate, Weekday};
use slot_engine::form::Submission;
use slot_engine::schedule::{expand_availabilities, parse_weekday};
use slot_engine::{SlotDuration, SlotError, SlotValue, TimeOfDay};

fn t(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap()
}

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn submission(start: NaiveDate, end: NaiveDate, weekdays: Vec<Weekday>, slots: Vec<SlotValue>) -> Submission {
    Submission {
        start_date: start,
        end_date: end,
        weekdays,
        slot_duration: SlotDuration::from_minutes(60),
        slots,
    }
}

#[test]
fn one_slot_every_day_of_a_week() {
    // 2022-03-27 is a Sunday; the range covers exactly one week.
    let all_days = vec![
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];
    let sub = submission(
        d(2022, 3, 27),
        d(2022, 4, 2),
        all_days,
        vec![SlotValue { start: t(6, 0), end: t(7, 0) }],
    );

    let availabilities = expand_availabilities(&sub).unwrap();

    assert_eq!(availabilities.len(), 7);
    assert_eq!(
        availabilities[0].start,
        d(2022, 3, 27).and_hms_opt(6, 0, 0).unwrap()
    );
    assert_eq!(
        availabilities[6].end,
        d(2022, 4, 2).and_hms_opt(7, 0, 0).unwrap()
    );
}

#[test]
fn weekday_filter_skips_unchosen_days() {
    let sub = submission(
        d(2022, 3, 27),
        d(2022, 4, 9),
        vec![Weekday::Tue, Weekday::Thu],
        vec![SlotValue { start: t(9, 0), end: t(9, 30) }],
    );

    let dates: Vec<NaiveDate> = expand_availabilities(&sub)
        .unwrap()
        .into_iter()
        .map(|a| a.date)
        .collect();

    assert_eq!(
        dates,
        vec![d(2022, 3, 29), d(2022, 3, 31), d(2022, 4, 5), d(2022, 4, 7)]
    );
}

#[test]
fn empty_weekday_list_means_every_day() {
    let sub = submission(
        d(2022, 3, 1),
        d(2022, 3, 3),
        vec![],
        vec![SlotValue { start: t(9, 0), end: t(10, 0) }],
    );

    assert_eq!(expand_availabilities(&sub).unwrap().len(), 3);
}

#[test]
fn availabilities_ordered_by_date_then_slot_start() {
    let sub = submission(
        d(2022, 3, 1),
        d(2022, 3, 2),
        vec![],
        vec![
            SlotValue { start: t(10, 0), end: t(11, 0) },
            SlotValue { start: t(9, 0), end: t(10, 0) },
            SlotValue { start: t(9, 0), end: t(10, 0) },
        ],
    );

    let availabilities = expand_availabilities(&sub).unwrap();

    assert_eq!(availabilities.len(), 4, "duplicate slots collapse");
    let mut sorted = availabilities.clone();
    sorted.sort();
    assert_eq!(availabilities, sorted);
}

#[test]
fn inverted_date_range_is_an_error() {
    let sub = submission(d(2022, 4, 2), d(2022, 3, 27), vec![], vec![]);

    let err = expand_availabilities(&sub).unwrap_err();
    assert!(matches!(err, SlotError::InvalidDateRange { .. }));
}

#[test]
fn weekday_names_parse_long_and_short() {
    assert_eq!(parse_weekday("Sunday").unwrap(), Weekday::Sun);
    assert_eq!(parse_weekday("wed").unwrap(), Weekday::Wed);
    assert!(matches!(
        parse_weekday("Funday"),
        Err(SlotError::InvalidWeekday(_))
    ));
}

#[test]
fn submission_round_trips_through_json() {
    let json = r#"{
        "start_date": "2022-03-27",
        "end_date": "2022-04-02",
        "weekdays": ["Monday", "Friday"],
        "slot_duration": 45,
        "slots": [{"start": "9:00 AM", "end": "09:45"}]
    }"#;

    let sub: Submission = serde_json::from_str(json).unwrap();

    assert_eq!(sub.weekdays, vec![Weekday::Mon, Weekday::Fri]);
    assert_eq!(sub.slot_duration, SlotDuration::from_minutes(45));
    assert_eq!(sub.slots, vec![SlotValue { start: t(9, 0), end: t(9, 45) }]);
}
