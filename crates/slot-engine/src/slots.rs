//! Partition a daily time window into bookable slots.
//!
//! The window `[start, end)` is cut into consecutive slots of a fixed length,
//! walking a cursor from `start`. When the remainder is shorter than the slot
//! length the final slot is clipped to `end`, so the slots always tile the
//! window exactly:
//!
//! - `slots[0].start == start`
//! - `slots[i].end == slots[i + 1].start`
//! - `slots.last().end == end`

use serde::{Deserialize, Serialize};

use crate::duration::SlotDuration;
use crate::time::TimeOfDay;
use crate::validate::{validate_slot_duration, validate_time_range};

/// A generated slot with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// 12-hour display label, e.g. `"9:00 AM - 9:30 AM"`.
    pub label: String,
}

impl Slot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end,
            label: format!("{} - {}", start.to_12h(), end.to_12h()),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }

    /// The machine-readable payload submitted alongside the label.
    pub fn value(&self) -> SlotValue {
        SlotValue {
            start: self.start,
            end: self.end,
        }
    }
}

/// Submission form of a slot. Serializes as `{"start":"HH:mm","end":"HH:mm"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotValue {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl From<&Slot> for SlotValue {
    fn from(slot: &Slot) -> Self {
        slot.value()
    }
}

/// Generate the ordered slots covering `[start, end)`.
///
/// Returns an empty vector, never a partial list, when the time range is
/// invalid (including `start == end`) or the duration is zero or longer than
/// the window.
pub fn generate_slots(start: TimeOfDay, end: TimeOfDay, duration: SlotDuration) -> Vec<Slot> {
    if !validate_time_range(Some(start), Some(end))
        || !validate_slot_duration(Some(start), Some(end), Some(duration))
    {
        tracing::trace!(%start, %end, minutes = duration.minutes(), "slot inputs invalid; no slots");
        return Vec::new();
    }

    let end_minutes = end.minutes_since_midnight();
    let step = duration.minutes();
    let mut slots = Vec::new();
    let mut cursor = start;

    while cursor < end {
        let tentative = cursor.minutes_since_midnight() + step;
        if tentative > end_minutes {
            // Remainder shorter than one slot: clip the last slot to the window.
            slots.push(Slot::new(cursor, end));
            break;
        }
        // `tentative <= end_minutes < MINUTES_PER_DAY`, so this always converts.
        let Some(next) = TimeOfDay::from_minutes(tentative) else {
            break;
        };
        slots.push(Slot::new(cursor, next));
        cursor = next;
    }

    tracing::debug!(
        %start,
        %end,
        minutes = step,
        count = slots.len(),
        "generated slots"
    );
    slots
}
