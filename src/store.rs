//! Persistence of the workout list as one JSON document under a fixed key.
//!
//! [`LocalStore`] is backed by `window.localStorage`; [`MemoryStore`] keeps the
//! document in process and is what the controller tests run against.

use crate::workout::Workout;
use log::{debug, info, warn};
use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum StoreError {
    /// The browser exposes no usable storage (disabled, sandboxed, ...).
    Unavailable,
    /// The storage call itself failed, e.g. quota exceeded.
    Access(String),
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "Local storage is not available"),
            StoreError::Access(msg) => write!(f, "Local storage access failed: {}", msg),
            StoreError::Encode(err) => write!(f, "Failed to encode workouts: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encode(err)
    }
}

/// A single-slot key-value store holding the serialized workout list.
pub trait WorkoutStore {
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&mut self, payload: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// `window.localStorage` under one key.
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
    key: String,
}

impl LocalStore {
    pub fn open(key: &str) -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable, workouts will not survive a reload");
        }
        Self {
            storage,
            key: key.to_string(),
        }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Access(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl WorkoutStore for LocalStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(&self.key).map_err(js_error)
    }

    fn save(&mut self, payload: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(&self.key, payload).map_err(js_error)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.storage()?.remove_item(&self.key).map_err(js_error)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    payload: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            writes: 0,
        }
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl WorkoutStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.payload.clone())
    }

    fn save(&mut self, payload: &str) -> Result<(), StoreError> {
        self.payload = Some(payload.to_string());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.payload = None;
        Ok(())
    }
}

/// Overwrite the stored document with the full list.
pub fn save_workouts<S: WorkoutStore + ?Sized>(
    store: &mut S,
    workouts: &[Workout],
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(workouts)?;
    store.save(&payload)?;
    debug!("Saved {} workouts ({} bytes)", workouts.len(), payload.len());
    Ok(())
}

/// Read the stored list back.
///
/// A missing key, an unusable store or a document that is not a JSON array
/// all yield an empty list. Entries that do not have the workout shape are
/// dropped one by one so the rest still restore, in stored order.
pub fn restore_workouts<S: WorkoutStore + ?Sized>(store: &S) -> Vec<Workout> {
    let payload = match store.load() {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            debug!("No stored workouts");
            return Vec::new();
        }
        Err(err) => {
            warn!("Could not read stored workouts: {}", err);
            return Vec::new();
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&payload) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Ignoring malformed workout data: {}", err);
            return Vec::new();
        }
    };

    let total = entries.len();
    let workouts: Vec<Workout> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(workout) => Some(workout),
            Err(err) => {
                warn!("Skipping stored workout #{}: {}", i + 1, err);
                None
            }
        })
        .collect();

    info!("Restored {}/{} stored workouts", workouts.len(), total);
    workouts
}
