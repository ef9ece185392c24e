//! Expand an accepted submission into concrete availabilities.
//!
//! Every selected slot is placed on every date of the submitted range whose
//! weekday was chosen. An empty weekday list means every day of the range.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::form::Submission;
use crate::slots::SlotValue;

/// A slot placed on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Availability {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parse an English weekday name, full (`"Sunday"`) or short (`"sun"`).
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    name.trim()
        .parse()
        .map_err(|_| SlotError::InvalidWeekday(name.to_string()))
}

/// Expand `submission` into availabilities ordered by date, then slot start.
///
/// # Errors
/// Returns `SlotError::InvalidDateRange` if the start date is after the end date.
pub fn expand_availabilities(submission: &Submission) -> Result<Vec<Availability>> {
    let (start_date, end_date) = (submission.start_date, submission.end_date);
    if start_date > end_date {
        return Err(SlotError::InvalidDateRange {
            start: start_date.to_string(),
            end: end_date.to_string(),
        });
    }

    let mut slots: Vec<SlotValue> = submission.slots.clone();
    slots.sort();
    slots.dedup();

    let availabilities: Vec<Availability> = start_date
        .iter_days()
        .take_while(|date| *date <= end_date)
        .filter(|date| day_selected(&submission.weekdays, date.weekday()))
        .flat_map(|date| {
            slots.iter().map(move |slot| Availability {
                date,
                start: date.and_time(slot.start.as_naive()),
                end: date.and_time(slot.end.as_naive()),
            })
        })
        .collect();

    tracing::debug!(
        %start_date,
        %end_date,
        slots = slots.len(),
        count = availabilities.len(),
        "expanded availabilities"
    );
    Ok(availabilities)
}

fn day_selected(weekdays: &[Weekday], day: Weekday) -> bool {
    weekdays.is_empty() || weekdays.contains(&day)
}
