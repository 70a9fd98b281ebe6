//! Workout model: the two activity variants and their derived metrics.
//!
//! A [`Workout`] carries the fields shared by every session plus an
//! [`Activity`] holding the variant-specific inputs and the one metric
//! computed from them. The serialized form is a flat JSON object tagged by
//! `"type"`, so stored lists come back as full `Workout` values.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic position as `(latitude, longitude)`, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown workout type '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Identifier derived from the creation timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out timestamp ids that are strictly increasing, even when two
/// workouts are created within the same millisecond.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Start above every numeric id in `existing`.
    ///
    /// Ids that are not a representable millisecond timestamp are ignored.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a WorkoutId>) -> Self {
        let last = existing
            .into_iter()
            .filter_map(|id| id.as_str().parse::<i64>().ok())
            .filter(|&ms| Utc.timestamp_millis_opt(ms).single().is_some())
            .max()
            .unwrap_or(0);
        Self { last }
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let millis = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = millis;
        WorkoutId(millis.to_string())
    }
}

/// Variant-specific inputs and the metric derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Running {
        /// steps per minute
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// minutes
    pub duration: f64,
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub activity: Activity,
}

impl Workout {
    pub fn running(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let activity = Activity::Running {
            cadence,
            pace: duration / distance,
        };
        Self::build(id, created_at, coords, distance, duration, activity)
    }

    pub fn cycling(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let activity = Activity::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.0),
        };
        Self::build(id, created_at, coords, distance, duration, activity)
    }

    fn build(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> Self {
        let kind = match activity {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        };
        let description = describe(kind, created_at.with_timezone(&Local).date_naive());
        Self {
            id,
            created_at,
            coords,
            distance,
            duration,
            description,
            clicks: 0,
            activity,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.activity {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace for running, speed for cycling.
    pub fn metric(&self) -> f64 {
        match self.activity {
            Activity::Running { pace, .. } => pace,
            Activity::Cycling { speed, .. } => speed,
        }
    }

    pub fn click(&mut self) {
        self.clicks += 1;
    }
}

/// `"Running on March 15"`.
pub fn describe(kind: WorkoutKind, date: NaiveDate) -> String {
    format!("{} on {}", kind.label(), date.format("%B %-d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn running_pace_is_duration_over_distance() {
        let w = Workout::running(
            "1".into(),
            at(1_700_000_000_000),
            Coords::new(39.0, -12.0),
            5.2,
            24.0,
            178.0,
        );
        assert_eq!(w.kind(), WorkoutKind::Running);
        assert!((w.metric() - 24.0 / 5.2).abs() < 1e-12);
        assert!((w.metric() - 4.615).abs() < 1e-3);
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let w = Workout::cycling(
            "2".into(),
            at(1_700_000_000_000),
            Coords::new(39.0, -12.0),
            27.0,
            95.0,
            523.0,
        );
        assert_eq!(w.kind(), WorkoutKind::Cycling);
        assert!((w.metric() - 27.0 / (95.0 / 60.0)).abs() < 1e-12);
        assert!((w.metric() - 17.05).abs() < 1e-2);
    }

    #[test]
    fn describe_uses_month_name_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(describe(WorkoutKind::Running, date), "Running on March 5");
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(describe(WorkoutKind::Cycling, date), "Cycling on December 31");
    }

    #[test]
    fn description_follows_local_creation_date() {
        let created = at(1_710_500_000_000);
        let w = Workout::cycling("3".into(), created, Coords::new(0.0, 0.0), 10.0, 30.0, 0.0);
        let expected = describe(
            WorkoutKind::Cycling,
            created.with_timezone(&Local).date_naive(),
        );
        assert_eq!(w.description, expected);
        assert_eq!(w.description, w.clone().description);
    }

    #[test]
    fn id_generator_is_strictly_increasing() {
        let mut ids = IdGenerator::default();
        let now = at(1_700_000_000_000);
        let a = ids.next_id(now);
        let b = ids.next_id(now);
        let c = ids.next_id(at(1_600_000_000_000));
        assert_eq!(a.as_str(), "1700000000000");
        assert_eq!(b.as_str(), "1700000000001");
        assert_eq!(c.as_str(), "1700000000002");
    }

    #[test]
    fn different_timestamps_give_different_ids() {
        let mut ids = IdGenerator::default();
        let a = ids.next_id(at(1_700_000_000_000));
        let b = ids.next_id(at(1_700_000_000_500));
        assert_ne!(a, b);
        assert_eq!(b.as_str(), "1700000000500");
    }

    #[test]
    fn seeded_generator_skips_existing_ids() {
        let existing = [WorkoutId::from("1800000000000"), WorkoutId::from("legacy")];
        let mut ids = IdGenerator::seeded(existing.iter());
        assert_eq!(ids.next_id(at(1_700_000_000_000)).as_str(), "1800000000001");
    }

    #[test]
    fn out_of_range_stored_id_does_not_overflow() {
        let existing = [WorkoutId::from("9223372036854775807")];
        let mut ids = IdGenerator::seeded(existing.iter());
        assert_eq!(ids.next_id(at(1_700_000_000_000)).as_str(), "1700000000000");
        assert_eq!(ids.next_id(at(1_700_000_000_000)).as_str(), "1700000000001");
    }

    #[test]
    fn next_id_saturates_at_the_top() {
        let mut ids = IdGenerator { last: i64::MAX };
        assert_eq!(ids.next_id(at(0)).as_str(), i64::MAX.to_string());
    }

    #[test]
    fn serializes_flat_and_tagged() {
        let w = Workout::running(
            "42".into(),
            at(1_700_000_000_000),
            Coords::new(39.0, -12.0),
            5.0,
            25.0,
            170.0,
        );
        let value = serde_json::to_value(&w).unwrap();
        assert_eq!(value["type"], "running");
        assert_eq!(value["id"], "42");
        assert_eq!(value["coords"], serde_json::json!([39.0, -12.0]));
        assert_eq!(value["pace"], 5.0);
        assert_eq!(value["clicks"], 0);
        assert!(value["date"].as_str().unwrap().starts_with("2023-11-14T"));
    }

    #[test]
    fn deserializes_browser_written_entry() {
        let raw = r#"{
            "date": "2024-03-05T10:15:00.000Z",
            "id": "9614900000",
            "clicks": 0,
            "coords": [39, -12],
            "distance": 27,
            "duration": 95,
            "type": "cycling",
            "elevationGain": 523,
            "speed": 17.05263157894737,
            "description": "Cycling on March 5"
        }"#;
        let w: Workout = serde_json::from_str(raw).unwrap();
        assert_eq!(w.kind(), WorkoutKind::Cycling);
        assert_eq!(w.coords, Coords::new(39.0, -12.0));
        assert_eq!(w.description, "Cycling on March 5");
        match w.activity {
            Activity::Cycling { elevation_gain, .. } => assert_eq!(elevation_gain, 523.0),
            other => panic!("unexpected activity {other:?}"),
        }
    }

    #[test]
    fn kind_parses_form_values() {
        assert_eq!("running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!("cycling".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }
}
