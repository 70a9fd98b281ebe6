//! JavaScript interop for the Leaflet map.
//! Provides Rust bindings to the helper functions defined in map_helpers.js.

use log::warn;
use mapty::{Coords, MapSurface, Marker, PanOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::Callback;

#[wasm_bindgen(module = "/map_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = createMap, catch)]
    fn create_map(
        container_id: &str,
        lat: f64,
        lng: f64,
        zoom: u8,
        tile_url: &str,
        attribution: &str,
        on_click: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = addWorkoutMarker)]
    fn add_workout_marker(map: &JsValue, lat: f64, lng: f64, content: &str, popup_options: JsValue);

    #[wasm_bindgen(js_name = panMap)]
    fn pan_map(map: &JsValue, lat: f64, lng: f64, zoom: u8, pan_options: JsValue);
}

/// A live Leaflet map. Keeps the click closure alive as long as the map.
pub struct LeafletMap {
    handle: JsValue,
    _on_click: Closure<dyn FnMut(f64, f64)>,
}

impl LeafletMap {
    /// Create the map inside the element with `container_id`, centered on
    /// `center`, with the tile layer attached and clicks forwarded to
    /// `on_click`.
    pub fn mount(
        container_id: &str,
        center: Coords,
        zoom: u8,
        tile_url: &str,
        attribution: &str,
        on_click: Callback<Coords>,
    ) -> Result<Self, String> {
        let on_click = Closure::<dyn FnMut(f64, f64)>::new(move |lat: f64, lng: f64| {
            on_click.emit(Coords::new(lat, lng));
        });
        let handle = create_map(
            container_id,
            center.lat(),
            center.lng(),
            zoom,
            tile_url,
            attribution,
            on_click.as_ref().unchecked_ref(),
        )
        .map_err(|e| e.as_string().unwrap_or_else(|| format!("{:?}", e)))?;

        Ok(Self {
            handle,
            _on_click: on_click,
        })
    }
}

impl MapSurface for LeafletMap {
    fn add_marker(&mut self, marker: &Marker) {
        match serde_wasm_bindgen::to_value(&marker.popup) {
            Ok(options) => add_workout_marker(
                &self.handle,
                marker.coords.lat(),
                marker.coords.lng(),
                &marker.content,
                options,
            ),
            Err(e) => warn!("Could not pass popup options to the map: {}", e),
        }
    }

    fn pan_to(&mut self, center: Coords, zoom: u8, options: PanOptions) {
        match serde_wasm_bindgen::to_value(&options) {
            Ok(options) => pan_map(&self.handle, center.lat(), center.lng(), zoom, options),
            Err(e) => warn!("Could not pass pan options to the map: {}", e),
        }
    }
}
