//! Form state, the submit guard, and the event-driven controller that keeps
//! the inline error indicators and the generated slot list in sync with the
//! inputs.
//!
//! [`FormState`] is plain data: every widget-sourced field is an `Option`
//! meaning "no value parsed yet". The checks on it are pure. [`FormController`]
//! is the thin adapter a page binds to its widgets: it applies one
//! [`FormEvent`] at a time, re-runs the affected validators, toggles
//! [`Indicators`] and replaces the slot list.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::FormConfig;
use crate::duration::SlotDuration;
use crate::error::SlotError;
use crate::schedule::parse_weekday;
use crate::slots::{generate_slots, Slot, SlotValue};
use crate::time::{parse_date, parse_time_of_day, TimeOfDay};
use crate::validate::{
    validate_date_range, validate_selection, validate_slot_duration, validate_time_range,
};

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// An inline error message on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Date,
    Time,
    Slot,
    Selection,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Date,
        Indicator::Time,
        Indicator::Slot,
        Indicator::Selection,
    ];

    /// DOM id of the message element this indicator controls.
    pub fn element_id(&self) -> &'static str {
        match self {
            Indicator::Date => "date-error",
            Indicator::Time => "time-error",
            Indicator::Slot => "slot-error",
            Indicator::Selection => "selection-error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Indicator::Date => "The end date must not be before the start date.",
            Indicator::Time => "The end time must be after the start time.",
            Indicator::Slot => "The slot duration must be positive and fit between the start and end time.",
            Indicator::Selection => "Select at least one time slot.",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Visibility of each inline error message. `Default` hides all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    pub date: bool,
    pub time: bool,
    pub slot: bool,
    pub selection: bool,
}

impl Indicators {
    pub fn is_visible(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Date => self.date,
            Indicator::Time => self.time,
            Indicator::Slot => self.slot,
            Indicator::Selection => self.selection,
        }
    }

    pub fn set(&mut self, indicator: Indicator, visible: bool) {
        let flag = match indicator {
            Indicator::Date => &mut self.date,
            Indicator::Time => &mut self.time,
            Indicator::Slot => &mut self.slot,
            Indicator::Selection => &mut self.selection,
        };
        if *flag != visible {
            tracing::trace!(%indicator, visible, "indicator toggled");
        }
        *flag = visible;
    }

    pub fn any(&self) -> bool {
        Indicator::ALL.iter().any(|i| self.is_visible(*i))
    }

    pub fn visible(&self) -> Vec<Indicator> {
        Indicator::ALL
            .into_iter()
            .filter(|i| self.is_visible(*i))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

/// Everything the validators and the generator read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration: Option<SlotDuration>,
    #[serde(default)]
    pub selected_slots: Vec<SlotValue>,
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
    /// Whether the user must pick slots before submitting. When `false`, a
    /// submission carries every generated slot.
    #[serde(default = "default_true")]
    pub requires_selection: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            start_date: None,
            end_date: None,
            duration: None,
            selected_slots: Vec::new(),
            weekdays: Vec::new(),
            requires_selection: true,
        }
    }
}

impl FormState {
    /// Build state from raw field text, the way the page reads its widgets.
    pub fn from_fields(fields: &FormFields) -> Self {
        let weekdays = fields
            .weekdays
            .iter()
            .filter_map(|name| match parse_weekday(name) {
                Ok(day) => Some(day),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring weekday");
                    None
                }
            })
            .collect();

        Self {
            start_time: parse_time_of_day(fields.start_time.as_deref()),
            end_time: parse_time_of_day(fields.end_time.as_deref()),
            start_date: parse_date(fields.start_date.as_deref()),
            end_date: parse_date(fields.end_date.as_deref()),
            duration: SlotDuration::from_fields(
                fields.slot_duration_hours.as_deref(),
                fields.slot_duration_minutes.as_deref(),
            ),
            selected_slots: fields.selected_slots.clone(),
            weekdays,
            requires_selection: fields.requires_selection,
        }
    }

    pub fn time_range_valid(&self) -> bool {
        validate_time_range(self.start_time, self.end_time)
    }

    pub fn date_range_valid(&self) -> bool {
        validate_date_range(self.start_date, self.end_date)
    }

    pub fn slot_duration_valid(&self) -> bool {
        validate_slot_duration(self.start_time, self.end_time, self.duration)
    }

    /// The selection must come from the slots the current inputs generate.
    /// An empty selection passes only when a selection is not required.
    pub fn selection_valid(&self) -> bool {
        if !validate_selection(&self.selected_slots) {
            return !self.requires_selection;
        }
        let offered: Vec<SlotValue> = self.generate_slots().iter().map(Slot::value).collect();
        self.selected_slots.iter().all(|value| offered.contains(value))
    }

    /// Indicators that must be visible for this state.
    ///
    /// The slot indicator only reports a duration problem once the time range
    /// itself is valid; an invalid time range is reported by the time
    /// indicator alone.
    pub fn failed_indicators(&self) -> Indicators {
        Indicators {
            date: !self.date_range_valid(),
            time: !self.time_range_valid(),
            slot: self.time_range_valid() && !self.slot_duration_valid(),
            selection: !self.selection_valid(),
        }
    }

    /// The slots the current inputs produce, or none if any input is missing
    /// or invalid.
    pub fn generate_slots(&self) -> Vec<Slot> {
        generate_for_form(self)
    }

    /// The payload to post, if the form may be submitted.
    pub fn submission(&self) -> Option<Submission> {
        if !can_submit(self) {
            return None;
        }
        let slots = if self.selected_slots.is_empty() && !self.requires_selection {
            self.generate_slots().iter().map(Slot::value).collect()
        } else {
            self.selected_slots.clone()
        };
        Some(Submission {
            start_date: self.start_date?,
            end_date: self.end_date?,
            weekdays: self.weekdays.clone(),
            slot_duration: self.duration?,
            slots,
        })
    }
}

/// The generator fed from form state. Empty when any input is missing.
pub fn generate_for_form(state: &FormState) -> Vec<Slot> {
    match (state.start_time, state.end_time, state.duration) {
        (Some(start), Some(end), Some(duration)) => generate_slots(start, end, duration),
        _ => Vec::new(),
    }
}

/// Submit guard: every check must pass.
pub fn can_submit(state: &FormState) -> bool {
    state.date_range_valid()
        && state.time_range_valid()
        && state.slot_duration_valid()
        && state.selection_valid()
}

/// Raw field values exactly as the widgets report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub slot_duration_hours: Option<String>,
    #[serde(default)]
    pub slot_duration_minutes: Option<String>,
    #[serde(default)]
    pub selected_slots: Vec<SlotValue>,
    #[serde(default)]
    pub weekdays: Vec<String>,
    #[serde(default = "default_true")]
    pub requires_selection: bool,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            start_date: None,
            end_date: None,
            slot_duration_hours: None,
            slot_duration_minutes: None,
            selected_slots: Vec::new(),
            weekdays: Vec::new(),
            requires_selection: true,
        }
    }
}

/// The machine-readable payload of an accepted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
    pub slot_duration: SlotDuration,
    pub slots: Vec<SlotValue>,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// A text field on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    StartTime,
    EndTime,
    StartDate,
    EndDate,
    DurationHours,
    DurationMinutes,
}

impl FromStr for FormField {
    type Err = SlotError;

    /// Accepts the form's field names (`start_time`, `slot_duration_hours`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "start_time" => Ok(FormField::StartTime),
            "end_time" => Ok(FormField::EndTime),
            "start_date" => Ok(FormField::StartDate),
            "end_date" => Ok(FormField::EndDate),
            "slot_duration_hours" | "duration_hours" => Ok(FormField::DurationHours),
            "slot_duration_minutes" | "duration_minutes" => Ok(FormField::DurationMinutes),
            _ => Err(SlotError::UnknownField(s.to_string())),
        }
    }
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A text field changed; `None` means the widget reports no value.
    Changed(FormField, Option<String>),
    SelectionChanged(Vec<SlotValue>),
    WeekdaysChanged(Vec<Weekday>),
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// All checks passed; indicators are hidden and the payload may be posted.
    Accepted(Submission),
    /// At least one check failed; the submit must be cancelled.
    Suppressed(Indicators),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Binds the pure checks to form events.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    state: FormState,
    duration_hours: Option<String>,
    duration_minutes: Option<String>,
    slots: Vec<Slot>,
    indicators: Indicators,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the picker's default start and end times filled in.
    pub fn with_config(config: &FormConfig) -> Self {
        let mut controller = Self::new();
        controller.state.start_time = Some(config.picker.default_start);
        controller.state.end_time = Some(config.picker.default_end);
        controller.state.requires_selection = config.requires_selection;
        controller
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn indicators(&self) -> Indicators {
        self.indicators
    }

    /// Apply one event and return the resulting indicator visibility.
    pub fn handle(&mut self, event: FormEvent) -> Indicators {
        match event {
            FormEvent::Changed(field, value) => self.field_changed(field, value),
            FormEvent::SelectionChanged(selected) => {
                self.state.selected_slots = selected
                    .into_iter()
                    .filter(|value| self.slots.iter().any(|slot| slot.value() == *value))
                    .collect();
                let valid = self.state.selection_valid();
                self.indicators.set(Indicator::Selection, !valid);
            }
            FormEvent::WeekdaysChanged(days) => self.state.weekdays = days,
        }
        self.indicators
    }

    /// Run the submit guard.
    ///
    /// On failure every failing indicator becomes visible and the rest are
    /// left hidden; on success all are hidden.
    pub fn submit(&mut self) -> SubmitOutcome {
        match self.state.submission() {
            Some(submission) => {
                self.indicators = Indicators::default();
                SubmitOutcome::Accepted(submission)
            }
            None => {
                self.indicators = self.state.failed_indicators();
                tracing::debug!(visible = ?self.indicators.visible(), "submit suppressed");
                SubmitOutcome::Suppressed(self.indicators)
            }
        }
    }

    fn field_changed(&mut self, field: FormField, value: Option<String>) {
        match field {
            FormField::StartTime | FormField::EndTime => {
                let parsed = parse_time_of_day(value.as_deref());
                if field == FormField::StartTime {
                    self.state.start_time = parsed;
                } else {
                    self.state.end_time = parsed;
                }
                self.refresh_time();
                self.refresh_duration();
                self.regenerate();
            }
            FormField::StartDate | FormField::EndDate => {
                let parsed = parse_date(value.as_deref());
                if field == FormField::StartDate {
                    self.state.start_date = parsed;
                } else {
                    self.state.end_date = parsed;
                }
                self.refresh_dates();
            }
            FormField::DurationHours | FormField::DurationMinutes => {
                if field == FormField::DurationHours {
                    self.duration_hours = value;
                } else {
                    self.duration_minutes = value;
                }
                self.state.duration = SlotDuration::from_fields(
                    self.duration_hours.as_deref(),
                    self.duration_minutes.as_deref(),
                );
                self.refresh_duration();
                self.regenerate();
            }
        }
    }

    // The refresh helpers leave an indicator untouched while its inputs are
    // still missing, so a half-filled form does not flash errors.

    fn refresh_time(&mut self) {
        if self.state.start_time.is_some() && self.state.end_time.is_some() {
            self.indicators
                .set(Indicator::Time, !self.state.time_range_valid());
        }
    }

    fn refresh_duration(&mut self) {
        if self.state.time_range_valid() && self.state.duration.is_some() {
            self.indicators
                .set(Indicator::Slot, !self.state.slot_duration_valid());
        }
    }

    fn refresh_dates(&mut self) {
        if self.state.start_date.is_some() && self.state.end_date.is_some() {
            self.indicators
                .set(Indicator::Date, !self.state.date_range_valid());
        }
    }

    fn regenerate(&mut self) {
        self.slots = generate_for_form(&self.state);
        let slots = &self.slots;
        self.state
            .selected_slots
            .retain(|value| slots.iter().any(|slot| slot.value() == *value));
    }
}
