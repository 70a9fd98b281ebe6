use js_sys::Reflect;
use log::{info, warn};
use mapty::Coords;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Outcome of the one-shot position request made on mount.
#[derive(Clone, Debug, PartialEq)]
pub enum Geolocation {
    Pending,
    Located(Coords),
    /// Denied, timed out or not supported by the browser.
    Unavailable(String),
}

/// Ask the browser for the current position once and report the result.
#[hook]
pub fn use_geolocation() -> Geolocation {
    let status = use_state(|| Geolocation::Pending);

    {
        let status = status.clone();
        use_effect_with((), move |_| {
            let on_done = Callback::from(move |result: Geolocation| status.set(result));
            request_position(on_done);
            || ()
        });
    }

    (*status).clone()
}

fn request_position(on_done: Callback<Geolocation>) {
    let navigator = gloo_utils::window().navigator();
    let supported = Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false);
    if !supported {
        on_done.emit(Geolocation::Unavailable(
            "Geolocation is not supported".to_string(),
        ));
        return;
    }

    let geolocation = match navigator.geolocation() {
        Ok(geolocation) => geolocation,
        Err(e) => {
            on_done.emit(Geolocation::Unavailable(js_message(&e)));
            return;
        }
    };

    let on_success = {
        let on_done = on_done.clone();
        Closure::once_into_js(move |position: JsValue| {
            let result = match coords_from_position(&position) {
                Some(coords) => {
                    info!(
                        "Located at https://www.google.com/maps/@{},{}",
                        coords.lat(),
                        coords.lng()
                    );
                    Geolocation::Located(coords)
                }
                None => Geolocation::Unavailable("Malformed position".to_string()),
            };
            on_done.emit(result);
        })
    };
    let on_error = {
        let on_done = on_done.clone();
        Closure::once_into_js(move |error: JsValue| {
            let message = js_message(&error);
            warn!("Position request failed: {}", message);
            on_done.emit(Geolocation::Unavailable(message));
        })
    };

    if let Err(e) = geolocation.get_current_position_with_error_callback(
        on_success.unchecked_ref(),
        Some(on_error.unchecked_ref()),
    ) {
        on_done.emit(Geolocation::Unavailable(js_message(&e)));
    }
}

fn coords_from_position(position: &JsValue) -> Option<Coords> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(Coords::new(lat, lng))
}

fn js_message(value: &JsValue) -> String {
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
