//! Slot duration as entered through the hours and minutes fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Length of each generated slot, in whole minutes.
///
/// Zero is representable (the fields can both be `0`) but never valid for
/// slot generation; see [`crate::validate::validate_slot_duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotDuration(u32);

impl SlotDuration {
    pub const ZERO: SlotDuration = SlotDuration(0);

    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// `hours * 60 + minutes`, saturating instead of overflowing.
    pub fn from_hours_minutes(hours: u32, minutes: u32) -> Self {
        Self(hours.saturating_mul(60).saturating_add(minutes))
    }

    /// Parse the two duration fields.
    ///
    /// Each field must be a non-negative integer. Returns `None` when either
    /// field is missing, blank or unparsable.
    pub fn from_fields(hours: Option<&str>, minutes: Option<&str>) -> Option<Self> {
        let hours = parse_field(hours?)?;
        let minutes = parse_field(minutes?)?;
        Some(Self::from_hours_minutes(hours, minutes))
    }

    /// Strict variant of [`SlotDuration::from_fields`].
    pub fn parse_fields(hours: &str, minutes: &str) -> Result<Self> {
        Self::from_fields(Some(hours), Some(minutes)).ok_or_else(|| {
            SlotError::InvalidDuration(format!("hours={:?}, minutes={:?}", hours, minutes))
        })
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Human label in the style of the duration dropdown: `"45 minutes"`,
    /// `"1 hour"`, `"2 hours 30 minutes"`.
    pub fn label(&self) -> String {
        let hours = self.0 / 60;
        let minutes = self.0 % 60;
        match (hours, minutes) {
            (0, m) => plural(m, "minute"),
            (h, 0) => plural(h, "hour"),
            (h, m) => format!("{} {}", plural(h, "hour"), plural(m, "minute")),
        }
    }
}

impl fmt::Display for SlotDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn parse_field(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
