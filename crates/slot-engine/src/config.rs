//! Form defaults: time-picker behaviour and the slot-duration dropdown.
//!
//! Loaded from JSON; every field is optional and falls back to the built-in
//! defaults (15-minute picker steps starting at 8:00 AM, an 8:00-9:00 AM
//! initial window, durations from 15 minutes to 23 hours, a slot selection
//! required before submit).

use serde::{Deserialize, Serialize};

use crate::duration::SlotDuration;
use crate::error::{Result, SlotError};
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Top-level configuration for an availability form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub picker: PickerConfig,
    pub duration_presets: Vec<DurationPreset>,
    /// Whether the user must pick at least one slot before submitting. When
    /// off, an empty selection submits every generated slot.
    pub requires_selection: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            picker: PickerConfig::default(),
            duration_presets: default_duration_presets(),
            requires_selection: true,
        }
    }
}

impl FormConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    /// Returns `SlotError::Json` for malformed JSON and `SlotError::InvalidConfig`
    /// when a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.picker.validate()?;
        if let Some(preset) = self.duration_presets.iter().find(|p| p.minutes.is_zero()) {
            return Err(SlotError::InvalidConfig(format!(
                "duration preset {:?} has zero length",
                preset.label
            )));
        }
        Ok(())
    }
}

/// Time-picker widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Step between dropdown entries.
    pub interval_minutes: u32,
    /// First dropdown entry.
    pub first_time: TimeOfDay,
    /// Initial value of the start-time field.
    pub default_start: TimeOfDay,
    /// Initial value of the end-time field.
    pub default_end: TimeOfDay,
}

impl Default for PickerConfig {
    fn default() -> Self {
        let eight = TimeOfDay::from_hm(8, 0).unwrap_or_default();
        Self {
            interval_minutes: 15,
            first_time: eight,
            default_start: eight,
            default_end: TimeOfDay::from_hm(9, 0).unwrap_or_default(),
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interval_minutes == 0 || self.interval_minutes >= MINUTES_PER_DAY {
            return Err(SlotError::InvalidConfig(format!(
                "picker interval must be between 1 and {} minutes, got {}",
                MINUTES_PER_DAY - 1,
                self.interval_minutes
            )));
        }
        Ok(())
    }

    /// Dropdown entries from `first_time` in `interval_minutes` steps, up to
    /// (not including) midnight.
    pub fn time_choices(&self) -> Vec<TimeOfDay> {
        if self.interval_minutes == 0 {
            return Vec::new();
        }
        (self.first_time.minutes_since_midnight()..MINUTES_PER_DAY)
            .step_by(self.interval_minutes as usize)
            .filter_map(TimeOfDay::from_minutes)
            .collect()
    }
}

/// One entry of the slot-duration dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationPreset {
    pub minutes: SlotDuration,
    pub label: String,
}

impl From<SlotDuration> for DurationPreset {
    fn from(minutes: SlotDuration) -> Self {
        Self {
            label: minutes.label(),
            minutes,
        }
    }
}

/// 15, 30 and 45 minutes, then every whole hour from 1 to 23.
pub fn default_duration_presets() -> Vec<DurationPreset> {
    [15, 30, 45]
        .into_iter()
        .chain((1..=23).map(|hours| hours * 60))
        .map(|minutes| DurationPreset::from(SlotDuration::from_minutes(minutes)))
        .collect()
}
