//! WASM bindings for slot-engine.
//!
//! Exposes the form validators, slot generation and availability expansion to
//! the availability page's JavaScript via `wasm-bindgen`. All complex types
//! are passed as JSON strings.
//!
//! The page keeps one [`AvailabilityForm`] per form and forwards every widget
//! change to it. Each call returns the indicator list, which the page applies
//! by toggling the `hidden` class on the listed element ids, and the slot list
//! it renders into the multi-select.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir static/js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::Weekday;
use serde::Serialize;
use slot_engine::form::{FormField, Indicator, Submission};
use slot_engine::{
    FormConfig, FormController, FormEvent, Indicators, Slot, SlotDuration, SlotValue,
    SubmitOutcome,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// One `<option>` of the slot multi-select.
#[derive(Serialize)]
struct SlotOptionDto {
    label: String,
    start: String,
    end: String,
}

impl From<&Slot> for SlotOptionDto {
    fn from(s: &Slot) -> Self {
        Self {
            label: s.label.clone(),
            start: s.start.to_24h(),
            end: s.end.to_24h(),
        }
    }
}

#[derive(Serialize)]
struct IndicatorDto {
    id: &'static str,
    visible: bool,
    message: &'static str,
}

fn indicator_dtos(indicators: Indicators) -> Vec<IndicatorDto> {
    Indicator::ALL
        .iter()
        .map(|i| IndicatorDto {
            id: i.element_id(),
            visible: indicators.is_visible(*i),
            message: i.message(),
        })
        .collect()
}

#[derive(Serialize)]
struct SubmitDto<'a> {
    accepted: bool,
    indicators: Vec<IndicatorDto>,
    submission: Option<&'a Submission>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn duration_from(hours: Option<String>, minutes: Option<String>) -> Option<SlotDuration> {
    SlotDuration::from_fields(hours.as_deref(), minutes.as_deref())
}

fn slot_options(slots: &[Slot]) -> Vec<SlotOptionDto> {
    slots.iter().map(SlotOptionDto::from).collect()
}

// ---------------------------------------------------------------------------
// Stateless exports
// ---------------------------------------------------------------------------

/// Parse a picker time (`"h:mm AM"`). Returns the 24-hour `"HH:mm"` form, or
/// `undefined` when the text is missing or malformed.
#[wasm_bindgen(js_name = "parseTimeOfDay")]
pub fn parse_time_of_day(text: Option<String>) -> Option<String> {
    slot_engine::parse_time_of_day(text.as_deref()).map(|t| t.to_24h())
}

/// `true` iff both picker times parse and start is before end.
#[wasm_bindgen(js_name = "validateTimeRange")]
pub fn validate_time_range(start: Option<String>, end: Option<String>) -> bool {
    slot_engine::validate_time_range(
        slot_engine::parse_time_of_day(start.as_deref()),
        slot_engine::parse_time_of_day(end.as_deref()),
    )
}

/// `true` iff both `YYYY-MM-DD` dates parse and start is not after end.
#[wasm_bindgen(js_name = "validateDateRange")]
pub fn validate_date_range(start: Option<String>, end: Option<String>) -> bool {
    slot_engine::validate_date_range(
        slot_engine::parse_date(start.as_deref()),
        slot_engine::parse_date(end.as_deref()),
    )
}

/// `true` iff the time range is valid and the duration fields give a positive
/// length that fits inside it.
#[wasm_bindgen(js_name = "validateSlotDuration")]
pub fn validate_slot_duration(
    start: Option<String>,
    end: Option<String>,
    hours: Option<String>,
    minutes: Option<String>,
) -> bool {
    slot_engine::validate_slot_duration(
        slot_engine::parse_time_of_day(start.as_deref()),
        slot_engine::parse_time_of_day(end.as_deref()),
        duration_from(hours, minutes),
    )
}

/// Generate slots for a window. Returns a JSON array of `{label, start, end}`;
/// empty when any input is missing or invalid.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(
    start: Option<String>,
    end: Option<String>,
    hours: Option<String>,
    minutes: Option<String>,
) -> Result<String, JsValue> {
    let start = slot_engine::parse_time_of_day(start.as_deref());
    let end = slot_engine::parse_time_of_day(end.as_deref());
    let slots = match (start, end, duration_from(hours, minutes)) {
        (Some(start), Some(end), Some(duration)) => slot_engine::generate_slots(start, end, duration),
        _ => Vec::new(),
    };
    to_json(&slot_options(&slots))
}

/// Expand a submission JSON into a JSON array of `{date, start, end}`.
#[wasm_bindgen(js_name = "expandAvailabilities")]
pub fn expand_availabilities(submission_json: &str) -> Result<String, JsValue> {
    let submission: Submission = serde_json::from_str(submission_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid submission JSON: {}", e)))?;
    let availabilities = slot_engine::expand_availabilities(&submission)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&availabilities)
}

/// Picker dropdown entries as 12-hour strings.
#[wasm_bindgen(js_name = "timeChoices")]
pub fn time_choices(config_json: Option<String>) -> Result<Vec<String>, JsValue> {
    let config = load_config(config_json.as_deref())?;
    Ok(config
        .picker
        .time_choices()
        .iter()
        .map(|t| t.to_12h())
        .collect())
}

fn load_config(json: Option<&str>) -> Result<FormConfig, JsValue> {
    match json {
        Some(json) => FormConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(FormConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Stateful form
// ---------------------------------------------------------------------------

/// The availability form's state, bound to its widgets by the page.
#[wasm_bindgen]
pub struct AvailabilityForm {
    controller: FormController,
}

#[wasm_bindgen]
impl AvailabilityForm {
    /// Create a form, optionally from a JSON `FormConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<AvailabilityForm, JsValue> {
        let config = load_config(config_json.as_deref())?;
        Ok(Self {
            controller: FormController::with_config(&config),
        })
    }

    /// Forward a field change (`start_time`, `end_time`, `start_date`,
    /// `end_date`, `slot_duration_hours`, `slot_duration_minutes`).
    ///
    /// Returns the indicator list as JSON.
    pub fn change(&mut self, field: &str, value: Option<String>) -> Result<String, JsValue> {
        let field: FormField = field
            .parse()
            .map_err(|e: slot_engine::SlotError| JsValue::from_str(&e.to_string()))?;
        let shown = self.controller.handle(FormEvent::Changed(field, value));
        to_json(&indicator_dtos(shown))
    }

    /// Forward the multi-select's chosen options, a JSON array of `{start, end}`.
    #[wasm_bindgen(js_name = "changeSelection")]
    pub fn change_selection(&mut self, values_json: &str) -> Result<String, JsValue> {
        let values: Vec<SlotValue> = serde_json::from_str(values_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid selection JSON: {}", e)))?;
        let shown = self.controller.handle(FormEvent::SelectionChanged(values));
        to_json(&indicator_dtos(shown))
    }

    /// Forward the checked weekday names, a JSON array such as `["Monday"]`.
    #[wasm_bindgen(js_name = "changeWeekdays")]
    pub fn change_weekdays(&mut self, names_json: &str) -> Result<String, JsValue> {
        let days: Vec<Weekday> = serde_json::from_str(names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid weekdays JSON: {}", e)))?;
        let shown = self.controller.handle(FormEvent::WeekdaysChanged(days));
        to_json(&indicator_dtos(shown))
    }

    /// Current slot options as JSON.
    pub fn slots(&self) -> Result<String, JsValue> {
        to_json(&slot_options(self.controller.slots()))
    }

    /// Current indicator list as JSON.
    pub fn indicators(&self) -> Result<String, JsValue> {
        to_json(&indicator_dtos(self.controller.indicators()))
    }

    /// Run the submit guard. The page must cancel the submit event when
    /// `accepted` is `false`.
    pub fn submit(&mut self) -> Result<String, JsValue> {
        let outcome = self.controller.submit();
        let dto = match &outcome {
            SubmitOutcome::Accepted(submission) => SubmitDto {
                accepted: true,
                indicators: indicator_dtos(Indicators::default()),
                submission: Some(submission),
            },
            SubmitOutcome::Suppressed(shown) => SubmitDto {
                accepted: false,
                indicators: indicator_dtos(*shown),
                submission: None,
            },
        };
        to_json(&dto)
    }
}
