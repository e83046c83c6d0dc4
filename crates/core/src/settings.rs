//! Per-user vital-sign alert thresholds.
//!
//! The backend evaluates these against live telemetry; this module only
//! defines the shape, the defaults and the range checks applied before a
//! form is submitted.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::validation::{self, FieldErrors, FormNumber};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Heart-rate bounds accepted for thresholds (bpm).
pub const HEART_RATE_RANGE: (i32, i32) = (30, 220);

/// Skin temperature bounds accepted for thresholds (°C).
pub const SKIN_TEMP_RANGE: (f64, f64) = (30.0, 42.0);

/// Daily step-count bounds.
pub const STEPS_RANGE: (i32, i32) = (0, 100_000);

/// Sleep duration bounds (hours).
pub const SLEEP_HOURS_RANGE: (f64, f64) = (0.0, 24.0);

/// Allowed silence window before a no-data alert (minutes).
pub const NO_DATA_MINUTES_RANGE: (i32, i32) = (5, 1440);

/// Threshold settings for a single user, as stored by the backend.
///
/// Bounds of a disabled metric are kept so re-enabling restores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertSettings {
    pub heart_rate_enabled: bool,
    pub heart_rate_min: i32,
    pub heart_rate_max: i32,
    pub skin_temp_enabled: bool,
    pub skin_temp_min: f64,
    pub skin_temp_max: f64,
    pub steps_enabled: bool,
    pub steps_min: i32,
    pub sleep_enabled: bool,
    pub sleep_min_hours: f64,
    pub sleep_max_hours: f64,
    pub no_data_enabled: bool,
    pub no_data_minutes: i32,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            heart_rate_enabled: true,
            heart_rate_min: 50,
            heart_rate_max: 120,
            skin_temp_enabled: true,
            skin_temp_min: 35.0,
            skin_temp_max: 38.0,
            steps_enabled: false,
            steps_min: 1000,
            sleep_enabled: true,
            sleep_min_hours: 4.0,
            sleep_max_hours: 12.0,
            no_data_enabled: true,
            no_data_minutes: 60,
        }
    }
}

impl AlertSettings {
    /// Range and ordering checks for every bound.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_bounds(&mut errors, self);
        errors.into_result()
    }
}

fn check_bounds(errors: &mut FieldErrors, s: &AlertSettings) {
    in_range(errors, "heartRateMin", s.heart_rate_min, HEART_RATE_RANGE, "心拍数下限");
    in_range(errors, "heartRateMax", s.heart_rate_max, HEART_RATE_RANGE, "心拍数上限");
    validation::check_ordered(
        errors,
        "heartRateMax",
        Some(s.heart_rate_min),
        Some(s.heart_rate_max),
        "心拍数",
    );

    in_range(errors, "skinTempMin", s.skin_temp_min, SKIN_TEMP_RANGE, "皮膚温下限");
    in_range(errors, "skinTempMax", s.skin_temp_max, SKIN_TEMP_RANGE, "皮膚温上限");
    validation::check_ordered(
        errors,
        "skinTempMax",
        Some(s.skin_temp_min),
        Some(s.skin_temp_max),
        "皮膚温",
    );

    in_range(errors, "stepsMin", s.steps_min, STEPS_RANGE, "歩数下限");

    in_range(errors, "sleepMinHours", s.sleep_min_hours, SLEEP_HOURS_RANGE, "睡眠時間下限");
    in_range(errors, "sleepMaxHours", s.sleep_max_hours, SLEEP_HOURS_RANGE, "睡眠時間上限");
    validation::check_ordered(
        errors,
        "sleepMaxHours",
        Some(s.sleep_min_hours),
        Some(s.sleep_max_hours),
        "睡眠時間",
    );

    in_range(errors, "noDataMinutes", s.no_data_minutes, NO_DATA_MINUTES_RANGE, "無通信検知時間");
}

fn in_range<T>(errors: &mut FieldErrors, field: &str, value: T, (min, max): (T, T), label: &str)
where
    T: PartialOrd + Display + Copy,
{
    validation::check_range(errors, field, Some(value), min, max, label);
}

/// Raw threshold form. Unchecked checkboxes are simply absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertSettingsInput {
    pub heart_rate_enabled: Option<String>,
    pub heart_rate_min: Option<String>,
    pub heart_rate_max: Option<String>,
    pub skin_temp_enabled: Option<String>,
    pub skin_temp_min: Option<String>,
    pub skin_temp_max: Option<String>,
    pub steps_enabled: Option<String>,
    pub steps_min: Option<String>,
    pub sleep_enabled: Option<String>,
    pub sleep_min_hours: Option<String>,
    pub sleep_max_hours: Option<String>,
    pub no_data_enabled: Option<String>,
    pub no_data_minutes: Option<String>,
}

fn checked(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("on" | "true" | "1"))
}

fn required_number<T: FormNumber>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &Option<String>,
    label: &str,
) -> Option<T> {
    validation::require(errors, field, raw.as_deref(), label);
    validation::parse_number(errors, field, raw.as_deref(), label)
}

fn flag(value: bool) -> Option<String> {
    value.then(|| "on".to_string())
}

impl AlertSettingsInput {
    pub fn from_settings(s: &AlertSettings) -> Self {
        Self {
            heart_rate_enabled: flag(s.heart_rate_enabled),
            heart_rate_min: Some(s.heart_rate_min.to_string()),
            heart_rate_max: Some(s.heart_rate_max.to_string()),
            skin_temp_enabled: flag(s.skin_temp_enabled),
            skin_temp_min: Some(s.skin_temp_min.to_string()),
            skin_temp_max: Some(s.skin_temp_max.to_string()),
            steps_enabled: flag(s.steps_enabled),
            steps_min: Some(s.steps_min.to_string()),
            sleep_enabled: flag(s.sleep_enabled),
            sleep_min_hours: Some(s.sleep_min_hours.to_string()),
            sleep_max_hours: Some(s.sleep_max_hours.to_string()),
            no_data_enabled: flag(s.no_data_enabled),
            no_data_minutes: Some(s.no_data_minutes.to_string()),
        }
    }

    pub fn is_checked(value: &Option<String>) -> bool {
        checked(value)
    }

    /// Parse and validate the submitted form.
    ///
    /// Every bound is required, even for disabled metrics.
    pub fn validate(&self) -> Result<AlertSettings, FieldErrors> {
        let mut errors = FieldErrors::new();

        let heart_rate_min: Option<i32> =
            required_number(&mut errors, "heartRateMin", &self.heart_rate_min, "心拍数下限");
        let heart_rate_max: Option<i32> =
            required_number(&mut errors, "heartRateMax", &self.heart_rate_max, "心拍数上限");
        let steps_min: Option<i32> =
            required_number(&mut errors, "stepsMin", &self.steps_min, "歩数下限");
        let no_data_minutes: Option<i32> =
            required_number(&mut errors, "noDataMinutes", &self.no_data_minutes, "無通信検知時間");

        let skin_temp_min: Option<f64> =
            required_number(&mut errors, "skinTempMin", &self.skin_temp_min, "皮膚温下限");
        let skin_temp_max: Option<f64> =
            required_number(&mut errors, "skinTempMax", &self.skin_temp_max, "皮膚温上限");
        let sleep_min_hours: Option<f64> =
            required_number(&mut errors, "sleepMinHours", &self.sleep_min_hours, "睡眠時間下限");
        let sleep_max_hours: Option<f64> =
            required_number(&mut errors, "sleepMaxHours", &self.sleep_max_hours, "睡眠時間上限");

        let (
            Some(heart_rate_min),
            Some(heart_rate_max),
            Some(steps_min),
            Some(no_data_minutes),
            Some(skin_temp_min),
            Some(skin_temp_max),
            Some(sleep_min_hours),
            Some(sleep_max_hours),
        ) = (
            heart_rate_min,
            heart_rate_max,
            steps_min,
            no_data_minutes,
            skin_temp_min,
            skin_temp_max,
            sleep_min_hours,
            sleep_max_hours,
        )
        else {
            return Err(errors);
        };

        let settings = AlertSettings {
            heart_rate_enabled: checked(&self.heart_rate_enabled),
            heart_rate_min,
            heart_rate_max,
            skin_temp_enabled: checked(&self.skin_temp_enabled),
            skin_temp_min,
            skin_temp_max,
            steps_enabled: checked(&self.steps_enabled),
            steps_min,
            sleep_enabled: checked(&self.sleep_enabled),
            sleep_min_hours,
            sleep_max_hours,
            no_data_enabled: checked(&self.no_data_enabled),
            no_data_minutes,
        };

        check_bounds(&mut errors, &settings);
        errors.into_result()?;
        Ok(settings)
    }
}
