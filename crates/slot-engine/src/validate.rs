//! Pure validators for the availability form.
//!
//! Each rule has exactly one function here. A missing input (`None`) is a
//! failed check, never a panic. Showing or hiding the matching inline message
//! is the caller's job; see [`crate::form::FormController`].

use chrono::NaiveDate;

use crate::duration::SlotDuration;
use crate::time::TimeOfDay;

/// Time range is valid iff both ends are present and `start < end`.
///
/// Equal times are rejected: an empty working window has no slots.
pub fn validate_time_range(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> bool {
    matches!((start, end), (Some(start), Some(end)) if start < end)
}

/// Date range is valid iff both dates are present and `start <= end`.
///
/// Unlike the time range, a single-day range (`start == end`) is allowed.
pub fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    matches!((start, end), (Some(start), Some(end)) if start <= end)
}

/// Slot duration is valid iff the time range is valid and
/// `0 < duration <= end - start` (whole minutes).
pub fn validate_slot_duration(
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
    duration: Option<SlotDuration>,
) -> bool {
    let (Some(start_time), Some(end_time), Some(duration)) = (start, end, duration) else {
        return false;
    };
    if !validate_time_range(start, end) || duration.is_zero() {
        return false;
    }
    i64::from(duration.minutes()) <= start_time.minutes_until(end_time)
}

/// At least one generated slot must be chosen before submitting.
pub fn validate_selection<T>(selected: &[T]) -> bool {
    !selected.is_empty()
}
