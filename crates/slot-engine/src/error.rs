//! Error types for slot-engine operations.
//!
//! Form validation never produces these: a failed check is a `false` and a
//! visible indicator. `SlotError` is reserved for the strict parsing API, the
//! configuration loader and availability expansion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time of day: {0:?} (expected \"h:mm AM\" or \"HH:mm\")")]
    InvalidTime(String),

    #[error("Invalid slot duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid weekday: {0:?}")]
    InvalidWeekday(String),

    #[error("Unknown form field: {0:?}")]
    UnknownField(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
