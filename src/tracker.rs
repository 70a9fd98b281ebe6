//! Application controller.
//!
//! [`Tracker`] owns the workout list, the map once it exists, the location
//! of the last map click and the persistence store. The UI forwards every
//! user event to one of its methods and re-renders from [`Tracker::workouts`].
//!
//! # Form flow
//! - `Idle`: form hidden.
//! - `AwaitingInput`: the map was clicked, the form is shown and the click
//!   location is held until submit or cancel.
//!
//! A rejected submit keeps the tracker in `AwaitingInput` and touches
//! neither the list nor the store.

use crate::config::MAP_ZOOM_LEVEL;
use crate::form::{ExtraInput, InputError, WorkoutForm};
use crate::map::{MapSurface, Marker, PanOptions};
use crate::store::{restore_workouts, save_workouts, StoreError, WorkoutStore};
use crate::workout::{Coords, IdGenerator, Workout};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Idle,
    AwaitingInput { pending: Coords },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Submit without a preceding map click.
    NoPendingLocation,
    Invalid(InputError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NoPendingLocation => write!(f, "No map location selected"),
            SubmitError::Invalid(err) => write!(f, "Invalid input: {}", err),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<InputError> for SubmitError {
    fn from(err: InputError) -> Self {
        SubmitError::Invalid(err)
    }
}

pub struct Tracker<M: MapSurface, S: WorkoutStore> {
    map: Option<M>,
    store: S,
    form: FormState,
    workouts: Vec<Workout>,
    ids: IdGenerator,
}

impl<M: MapSurface, S: WorkoutStore> Tracker<M, S> {
    /// Build the tracker with whatever the store holds. Markers for these
    /// workouts are placed by [`Tracker::attach_map`].
    pub fn restore(store: S) -> Self {
        let workouts = restore_workouts(&store);
        let ids = IdGenerator::seeded(workouts.iter().map(|w| &w.id));
        Self {
            map: None,
            store,
            form: FormState::Idle,
            workouts,
            ids,
        }
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn form_state(&self) -> FormState {
        self.form
    }

    pub fn is_map_ready(&self) -> bool {
        self.map.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take ownership of a freshly created map and draw the markers of
    /// every workout loaded so far.
    pub fn attach_map(&mut self, mut map: M) {
        for workout in &self.workouts {
            map.add_marker(&Marker::for_workout(workout));
        }
        info!("Map ready, replayed {} markers", self.workouts.len());
        self.map = Some(map);
    }

    pub fn on_map_click(&mut self, coords: Coords) {
        debug!("Map clicked at {}", coords);
        self.form = FormState::AwaitingInput { pending: coords };
    }

    pub fn cancel(&mut self) {
        self.form = FormState::Idle;
    }

    /// Create a workout at the pending location from the submitted form.
    ///
    /// The new workout is appended, marked on the map and the whole list is
    /// saved. A failing save is logged; the workout stays in the list.
    pub fn submit(
        &mut self,
        form: &WorkoutForm,
        now: DateTime<Utc>,
    ) -> Result<&Workout, SubmitError> {
        let pending = match self.form {
            FormState::AwaitingInput { pending } => pending,
            FormState::Idle => return Err(SubmitError::NoPendingLocation),
        };
        let draft = form.validate()?;

        let id = self.ids.next_id(now);
        let workout = match draft.extra {
            ExtraInput::Cadence(cadence) => {
                Workout::running(id, now, pending, draft.distance, draft.duration, cadence)
            }
            ExtraInput::ElevationGain(elevation_gain) => Workout::cycling(
                id,
                now,
                pending,
                draft.distance,
                draft.duration,
                elevation_gain,
            ),
        };

        match self.map.as_mut() {
            Some(map) => map.add_marker(&Marker::for_workout(&workout)),
            None => warn!("Workout {} created without a map", workout.id),
        }

        info!(
            "Created {} workout {}: {} km in {} min",
            workout.kind(),
            workout.id,
            workout.distance,
            workout.duration
        );
        self.workouts.push(workout);
        self.form = FormState::Idle;

        if let Err(err) = save_workouts(&mut self.store, &self.workouts) {
            error!("Failed to persist workouts: {}", err);
        }

        Ok(&self.workouts[self.workouts.len() - 1])
    }

    /// Re-center the map on the workout with `id` and count the interaction.
    /// Unknown ids are ignored.
    pub fn pan_to(&mut self, id: &str) -> Option<&Workout> {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id.as_str() == id) else {
            debug!("No workout with id {}", id);
            return None;
        };

        if let Some(map) = self.map.as_mut() {
            map.pan_to(workout.coords, MAP_ZOOM_LEVEL, PanOptions::default());
        }
        workout.click();
        Some(workout)
    }

    /// Drop the stored list and everything held in memory. The caller reloads
    /// the page afterwards.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.workouts.clear();
        self.form = FormState::Idle;
        info!("Stored workouts cleared");
        Ok(())
    }
}
