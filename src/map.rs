//! What the controller needs from a map view, independent of the library
//! that draws it.

use crate::config::{PAN_DURATION_SEC, POPUP_MAX_WIDTH, POPUP_MIN_WIDTH};
use crate::workout::{Coords, Workout};
use serde::Serialize;

/// Options of the popup bound to a workout marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pan {
    /// seconds
    pub duration: f64,
}

/// Options for re-centering the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanOptions {
    pub animate: bool,
    pub pan: Pan,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            pan: Pan {
                duration: PAN_DURATION_SEC,
            },
        }
    }
}

/// A marker with an always-open popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coords: Coords,
    pub content: String,
    pub popup: PopupOptions,
}

impl Marker {
    pub fn for_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        Self {
            coords: workout.coords,
            content: format!("{}  {}", kind.emoji(), workout.description),
            popup: PopupOptions {
                max_width: POPUP_MAX_WIDTH,
                min_width: POPUP_MIN_WIDTH,
                auto_close: false,
                close_on_click: false,
                class_name: format!("{}-popup", kind),
            },
        }
    }
}

pub trait MapSurface {
    fn add_marker(&mut self, marker: &Marker);
    fn pan_to(&mut self, center: Coords, zoom: u8, options: PanOptions);
}
