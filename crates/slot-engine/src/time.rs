//! Wall-clock times and calendar dates as the form widgets produce them.
//!
//! The time-picker renders `"h:mm AM"` (12-hour, unpadded hour) and the
//! submission payload uses `"HH:mm"` (24-hour). Both are parsed into a
//! [`TimeOfDay`], which carries no date and is only compared within the same
//! nominal day.
//!
//! The lenient parsers ([`parse_time_of_day`], [`parse_date`]) return `None` for
//! anything missing or malformed, which the validators treat as "no value
//! parsed yet". The strict [`FromStr`] impl reports a [`SlotError`] instead.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

/// Minutes in one nominal day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

const FORMAT_12H: &str = "%I:%M %p";
const FORMAT_24H: &str = "%H:%M";
const FORMAT_DATE: &str = "%Y-%m-%d";

/// A wall-clock time with whole-minute precision and no date.
///
/// `Default` is midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build from an hour (0-23) and minute (0-59). `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Build from minutes since midnight. `None` at or past 24:00.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        Self::from_hm(minutes / 60, minutes % 60)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Signed number of minutes from `self` to `later` on the same day.
    pub fn minutes_until(&self, later: TimeOfDay) -> i64 {
        i64::from(later.minutes_since_midnight()) - i64::from(self.minutes_since_midnight())
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// Display form used by the picker and slot labels, e.g. `"9:05 AM"`.
    pub fn to_12h(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }

    /// Machine-readable form used in submissions, e.g. `"09:05"`.
    pub fn to_24h(&self) -> String {
        self.0.format(FORMAT_24H).to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_12h())
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Accepts the 12-hour picker form (`"h:mm AM"`) or the 24-hour form (`"HH:mm"`).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, FORMAT_12H)
            .or_else(|_| NaiveTime::parse_from_str(trimmed, FORMAT_24H))
            .map(Self)
            .map_err(|_| SlotError::InvalidTime(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_24h())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse the time-picker's `"h:mm AM|PM"` text.
///
/// Returns `None` when the field is absent, blank or not a valid 12-hour time.
/// `12:xx AM` is just after midnight and `12:xx PM` is just after noon.
pub fn parse_time_of_day(text: Option<&str>) -> Option<TimeOfDay> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(text, FORMAT_12H).ok().map(TimeOfDay)
}

/// Parse a date field in `YYYY-MM-DD` form. Blank or malformed input is `None`.
pub fn parse_date(text: Option<&str>) -> Option<NaiveDate> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, FORMAT_DATE).ok()
}

