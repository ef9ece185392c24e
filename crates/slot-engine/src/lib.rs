//! # slot-engine
//!
//! Validation and slot generation for appointment availability forms.
//!
//! A staff member picks a daily window (start and end time), a slot length
//! and a date range. The engine checks those inputs and partitions the window
//! into bookable slots, the last of which may be shorter when the window does
//! not divide evenly. Everything here is pure and synchronous: UI code feeds
//! field values in and reads validity flags and slot lists out.
//!
//! ```rust
//! use slot_engine::{generate_slots, SlotDuration, TimeOfDay};
//!
//! let start: TimeOfDay = "9:00 AM".parse().unwrap();
//! let end: TimeOfDay = "10:00 AM".parse().unwrap();
//! let slots = generate_slots(start, end, SlotDuration::from_minutes(45));
//!
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots[0].label, "9:00 AM - 9:45 AM");
//! assert_eq!(slots[1].label, "9:45 AM - 10:00 AM");
//! ```
//!
//! ## Modules
//!
//! - [`time`] -- `"h:mm AM"` / `"HH:mm"` parsing and formatting, date fields
//! - [`duration`] -- slot length from the hours and minutes fields
//! - [`validate`] -- one pure check per form rule
//! - [`slots`] -- window → ordered, contiguous slots
//! - [`form`] -- form state, submit guard, event-driven controller
//! - [`schedule`] -- accepted submission → dated availabilities
//! - [`config`] -- picker defaults and duration presets
//! - [`error`] -- Error types

pub mod config;
pub mod duration;
pub mod error;
pub mod form;
pub mod schedule;
pub mod slots;
pub mod time;
pub mod validate;

pub use config::FormConfig;
pub use duration::SlotDuration;
pub use error::SlotError;
pub use form::{can_submit, FormController, FormEvent, FormState, Indicators, SubmitOutcome};
pub use schedule::{expand_availabilities, Availability};
pub use slots::{generate_slots, Slot, SlotValue};
pub use time::{parse_date, parse_time_of_day, TimeOfDay};
pub use validate::{
    validate_date_range, validate_selection, validate_slot_duration, validate_time_range,
};
