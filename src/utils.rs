use crate::workout::{Activity, Workout};
use once_cell::sync::Lazy;
use regex::Regex;

// Decimal literal with optional sign, fraction and exponent: "5", "-2.5", ".5", "1e3"
static DECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap());
static INFINITY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([+-]?)Infinity$").unwrap());

/// Coerce form text to a number, close to how an `<input>` value converts in
/// the browser.
///
/// Surrounding whitespace is ignored and an empty field counts as `0`.
/// Returns `None` when the text is not a number at all; `"Infinity"` is a
/// number, just not a finite one. Unlike the browser, prefixed integer
/// literals (`"0x1A"`, `"0b11"`, `"0o7"`) are rejected.
///
/// # Examples
/// ```
/// use mapty::utils::coerce_number;
/// assert_eq!(coerce_number(" 5.2 "), Some(5.2));
/// assert_eq!(coerce_number(""), Some(0.0));
/// assert_eq!(coerce_number("abc"), None);
/// ```
pub fn coerce_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    if DECIMAL_REGEX.is_match(trimmed) {
        return trimmed.parse::<f64>().ok();
    }

    INFINITY_REGEX.captures(trimmed).map(|captures| {
        if &captures[1] == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

/// Format a metric with one decimal, as shown in the workout list.
pub fn format_metric(value: f64) -> String {
    format!("{:.1}", value)
}

/// Format a raw input value without a trailing `.0` for whole numbers.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// One icon / value / unit cell of a list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl EntryDetail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// The detail cells shown under a list entry's title: distance, duration,
/// the derived metric and the variant-specific input.
pub fn entry_details(workout: &Workout) -> [EntryDetail; 4] {
    let (metric_unit, extra) = match workout.activity {
        Activity::Running { cadence, .. } => {
            ("min/km", EntryDetail::new("🦶🏼", format_value(cadence), "spm"))
        }
        Activity::Cycling { elevation_gain, .. } => {
            ("km/h", EntryDetail::new("⛰", format_value(elevation_gain), "m"))
        }
    };

    [
        EntryDetail::new(workout.kind().emoji(), format_value(workout.distance), "km"),
        EntryDetail::new("⏱", format_value(workout.duration), "min"),
        EntryDetail::new("⚡️", format_metric(workout.metric()), metric_unit),
        extra,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Coords, WorkoutKind};
    use chrono::{TimeZone, Utc};

    #[test]
    fn coerces_decimal_literals() {
        assert_eq!(coerce_number("24"), Some(24.0));
        assert_eq!(coerce_number("\t5.2\n"), Some(5.2));
        assert_eq!(coerce_number("-12"), Some(-12.0));
        assert_eq!(coerce_number("+3"), Some(3.0));
        assert_eq!(coerce_number(".5"), Some(0.5));
        assert_eq!(coerce_number("5."), Some(5.0));
        assert_eq!(coerce_number("1e3"), Some(1000.0));
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(coerce_number(""), Some(0.0));
        assert_eq!(coerce_number("   "), Some(0.0));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(coerce_number("abc"), None);
        assert_eq!(coerce_number("5km"), None);
        assert_eq!(coerce_number("1,5"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
    }

    #[test]
    fn infinity_is_a_number_but_not_finite() {
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn rejects_prefixed_integer_literals() {
        assert_eq!(coerce_number("0x1A"), None);
        assert_eq!(coerce_number("0b11"), None);
        assert_eq!(coerce_number("0o7"), None);
    }

    #[test]
    fn running_entry_shows_pace_and_cadence() {
        let created = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let w = Workout::running("1".into(), created, Coords::new(39.0, -12.0), 5.2, 24.0, 178.0);
        let details = entry_details(&w);
        let cells: Vec<(&str, &str, &str)> = details
            .iter()
            .map(|d| (d.icon, d.value.as_str(), d.unit))
            .collect();
        assert_eq!(
            cells,
            [
                (WorkoutKind::Running.emoji(), "5.2", "km"),
                ("⏱", "24", "min"),
                ("⚡️", "4.6", "min/km"),
                ("🦶🏼", "178", "spm"),
            ]
        );
    }

    #[test]
    fn cycling_entry_shows_speed_and_elevation() {
        let created = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let w = Workout::cycling("2".into(), created, Coords::new(39.0, -12.0), 27.0, 95.0, -10.0);
        let details = entry_details(&w);
        assert_eq!(details[0].icon, WorkoutKind::Cycling.emoji());
        assert_eq!(details[2], EntryDetail::new("⚡️", "17.1".to_string(), "km/h"));
        assert_eq!(details[3], EntryDetail::new("⛰", "-10".to_string(), "m"));
    }

    #[test]
    fn formats_list_values() {
        assert_eq!(format_metric(24.0 / 5.2), "4.6");
        assert_eq!(format_metric(27.0 / (95.0 / 60.0)), "17.1");
        assert_eq!(format_value(178.0), "178");
        assert_eq!(format_value(5.2), "5.2");
    }
}
