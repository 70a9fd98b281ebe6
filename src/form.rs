//! Parsing and validation of the new-workout form.

use crate::utils::coerce_number;
use crate::workout::WorkoutKind;
use std::fmt;

/// Form fields, by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Distance => "Distance",
            Field::Duration => "Duration",
            Field::Cadence => "Cadence",
            Field::Elevation => "Elevation gain",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    NotANumber { field: Field, input: String },
    NotFinite(Field),
    NotPositive { field: Field, value: f64 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotANumber { field, input } => {
                write!(f, "{} must be a valid number, got '{}'", field, input)
            }
            InputError::NotFinite(field) => write!(f, "{} must be a finite number", field),
            InputError::NotPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Raw text of the form as the user left it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl WorkoutForm {
    pub fn new(kind: WorkoutKind) -> Self {
        Self {
            kind,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }

    /// Check the fields required by the selected type.
    ///
    /// Every required field must be finite. Distance and duration must be
    /// strictly positive; so must cadence for running. Elevation gain for
    /// cycling may be zero or negative.
    pub fn validate(&self) -> Result<WorkoutDraft, InputError> {
        let distance = positive(Field::Distance, &self.distance)?;
        let duration = positive(Field::Duration, &self.duration)?;
        let extra = match self.kind {
            WorkoutKind::Running => ExtraInput::Cadence(positive(Field::Cadence, &self.cadence)?),
            WorkoutKind::Cycling => {
                ExtraInput::ElevationGain(finite(Field::Elevation, &self.elevation)?)
            }
        };

        Ok(WorkoutDraft {
            distance,
            duration,
            extra,
        })
    }
}

/// Variant-specific value of a validated form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtraInput {
    Cadence(f64),
    ElevationGain(f64),
}

/// Validated numbers ready to build a workout from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutDraft {
    pub distance: f64,
    pub duration: f64,
    pub extra: ExtraInput,
}

fn finite(field: Field, input: &str) -> Result<f64, InputError> {
    let value = coerce_number(input).ok_or_else(|| InputError::NotANumber {
        field,
        input: input.to_string(),
    })?;
    if !value.is_finite() {
        return Err(InputError::NotFinite(field));
    }
    Ok(value)
}

fn positive(field: Field, input: &str) -> Result<f64, InputError> {
    let value = finite(field, input)?;
    if value <= 0.0 {
        return Err(InputError::NotPositive { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(kind: WorkoutKind, distance: &str, duration: &str, extra: &str) -> WorkoutForm {
        let mut form = WorkoutForm::new(kind);
        form.distance = distance.into();
        form.duration = duration.into();
        match kind {
            WorkoutKind::Running => form.cadence = extra.into(),
            WorkoutKind::Cycling => form.elevation = extra.into(),
        }
        form
    }

    #[test]
    fn valid_running_form() {
        let draft = form(WorkoutKind::Running, "5.2", "24", "178").validate().unwrap();
        assert_eq!(draft.distance, 5.2);
        assert_eq!(draft.duration, 24.0);
        assert_eq!(draft.extra, ExtraInput::Cadence(178.0));
    }

    #[test]
    fn valid_cycling_form_allows_negative_elevation() {
        let draft = form(WorkoutKind::Cycling, "27", "95", "-40").validate().unwrap();
        assert_eq!(draft.extra, ExtraInput::ElevationGain(-40.0));

        let draft = form(WorkoutKind::Cycling, "27", "95", "").validate().unwrap();
        assert_eq!(draft.extra, ExtraInput::ElevationGain(0.0));
    }

    #[test]
    fn text_distance_is_rejected() {
        let err = form(WorkoutKind::Running, "abc", "24", "178").validate().unwrap_err();
        assert_eq!(
            err,
            InputError::NotANumber {
                field: Field::Distance,
                input: "abc".into()
            }
        );
    }

    #[test]
    fn non_positive_distance_or_duration_is_rejected() {
        let err = form(WorkoutKind::Cycling, "0", "95", "10").validate().unwrap_err();
        assert!(matches!(err, InputError::NotPositive { field: Field::Distance, .. }));

        let err = form(WorkoutKind::Running, "5", "-3", "170").validate().unwrap_err();
        assert!(matches!(err, InputError::NotPositive { field: Field::Duration, .. }));

        // an empty field coerces to zero
        let err = form(WorkoutKind::Running, "", "30", "170").validate().unwrap_err();
        assert!(matches!(err, InputError::NotPositive { field: Field::Distance, .. }));
    }

    #[test]
    fn infinite_values_are_rejected() {
        let err = form(WorkoutKind::Cycling, "10", "Infinity", "0").validate().unwrap_err();
        assert_eq!(err, InputError::NotFinite(Field::Duration));

        let err = form(WorkoutKind::Cycling, "10", "30", "-Infinity").validate().unwrap_err();
        assert_eq!(err, InputError::NotFinite(Field::Elevation));
    }

    #[test]
    fn running_cadence_must_be_positive() {
        let err = form(WorkoutKind::Running, "5", "25", "0").validate().unwrap_err();
        assert!(matches!(err, InputError::NotPositive { field: Field::Cadence, .. }));
    }

    #[test]
    fn unused_field_is_ignored() {
        let mut f = form(WorkoutKind::Running, "5", "25", "170");
        f.elevation = "garbage".into();
        assert!(f.validate().is_ok());
    }
}
