//! Map-based workout tracker: running and cycling sessions recorded at a
//! clicked map location, listed in a sidebar and kept in `localStorage`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod form;
pub mod map;
pub mod store;
pub mod tracker;
pub mod utils;
pub mod workout;

pub use form::{InputError, WorkoutForm};
pub use map::{MapSurface, Marker, PanOptions, PopupOptions};
pub use store::{LocalStore, MemoryStore, StoreError, WorkoutStore};
pub use tracker::{FormState, SubmitError, Tracker};
pub use workout::{Activity, Coords, Workout, WorkoutId, WorkoutKind};

/// Console escape hatch: delete every stored workout and reload the page.
///
/// From the browser devtools: `wasmBindings.reset()`.
#[wasm_bindgen]
pub fn reset() -> Result<(), JsValue> {
    let mut store = LocalStore::open(config::STORAGE_KEY);
    store
        .clear()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("Stored workouts cleared from the console, reloading");
    gloo_utils::window().location().reload()
}
