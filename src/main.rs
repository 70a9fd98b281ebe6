//! Main module for the Mapty workout tracker using Yew.
//! Owns the tracker and wires map, form and list events into it.

use chrono::Utc;
use gloo_timers::callback::Timeout;
use log::{error, info, warn};
use mapty::config::*;
use mapty::{Coords, FormState, LocalStore, SubmitError, Tracker, WorkoutForm, WorkoutKind};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

mod components;
mod hooks;
mod leaflet;

use components::{render_kind_options, render_workout, FormRow};
use hooks::{use_geolocation, Geolocation};
use leaflet::LeafletMap;

type AppTracker = Tracker<LeafletMap, LocalStore>;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        warn!("alert failed: {:?}", e);
    }
}

/// Keep the text of an input field in a state handle.
fn text_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}

/// Id of the list entry a click landed in, if any.
fn clicked_workout_id(e: &MouseEvent) -> Option<String> {
    let target = e.target()?.dyn_into::<Element>().ok()?;
    let entry = target.closest(".workout").ok()??;
    entry.get_attribute("data-id")
}

// ──────────────────────────────────────────────────────────────────────────────

/// Application component: the only owner of the tracker.
#[function_component(App)]
fn app() -> Html {
    let tracker = use_mut_ref(|| AppTracker::restore(LocalStore::open(STORAGE_KEY)));
    let force_update = use_force_update();
    let position = use_geolocation();

    let kind = use_state(|| WorkoutKind::Running);
    let distance = use_state(String::new);
    let duration = use_state(String::new);
    let cadence = use_state(String::new);
    let elevation = use_state(String::new);
    let distance_ref = use_node_ref();
    // `display: none` right after a submit, lifted again by the timer
    let collapsed = use_state(|| false);
    let form_timer = use_mut_ref(|| None::<Timeout>);

    // Create the map once the position is known, then replay stored markers
    {
        let tracker = tracker.clone();
        let force_update = force_update.clone();
        let distance_ref = distance_ref.clone();
        use_effect_with(position, move |position| {
            match position {
                Geolocation::Pending => {}
                Geolocation::Unavailable(reason) => {
                    warn!("No position available: {}", reason);
                    alert(GEOLOCATION_ALERT);
                }
                Geolocation::Located(center) => {
                    let on_click = {
                        let tracker = tracker.clone();
                        let force_update = force_update.clone();
                        Callback::from(move |coords: Coords| {
                            tracker.borrow_mut().on_map_click(coords);
                            force_update.force_update();
                            if let Some(input) = distance_ref.cast::<HtmlInputElement>() {
                                let _ = input.focus();
                            }
                        })
                    };
                    match LeafletMap::mount(
                        MAP_CONTAINER_ID,
                        *center,
                        MAP_ZOOM_LEVEL,
                        TILE_URL,
                        TILE_ATTRIBUTION,
                        on_click,
                    ) {
                        Ok(map) => {
                            tracker.borrow_mut().attach_map(map);
                            force_update.force_update();
                        }
                        Err(e) => error!("Failed to create the map: {}", e),
                    }
                }
            }
            || ()
        });
    }

    let onsubmit = {
        let tracker = tracker.clone();
        let force_update = force_update.clone();
        let kind = kind.clone();
        let distance = distance.clone();
        let duration = duration.clone();
        let cadence = cadence.clone();
        let elevation = elevation.clone();
        let collapsed = collapsed.clone();
        let form_timer = form_timer.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = WorkoutForm {
                kind: *kind,
                distance: (*distance).clone(),
                duration: (*duration).clone(),
                cadence: (*cadence).clone(),
                elevation: (*elevation).clone(),
            };

            let outcome = tracker
                .borrow_mut()
                .submit(&form, Utc::now())
                .map(|workout| workout.description.clone());

            match outcome {
                Ok(description) => {
                    info!("Added \"{}\"", description);
                    for field in [&distance, &duration, &cadence, &elevation] {
                        field.set(String::new());
                    }
                    // Hide at once, but give the slide animation back after a delay
                    collapsed.set(true);
                    let collapsed = collapsed.clone();
                    *form_timer.borrow_mut() = Some(Timeout::new(FORM_REDISPLAY_MS, move || {
                        collapsed.set(false);
                    }));
                    force_update.force_update();
                }
                Err(SubmitError::Invalid(err)) => {
                    warn!("Rejected workout: {}", err);
                    alert(INVALID_INPUT_ALERT);
                }
                Err(err) => warn!("{}", err),
            }
        })
    };

    let onchange_kind = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<WorkoutKind>() {
                Ok(value) => kind.set(value),
                Err(err) => warn!("{}", err),
            }
        })
    };

    let onkeydown = {
        let tracker = tracker.clone();
        let force_update = force_update.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                tracker.borrow_mut().cancel();
                force_update.force_update();
            }
        })
    };

    let onclick_list = {
        let tracker = tracker.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(id) = clicked_workout_id(&e) {
                tracker.borrow_mut().pan_to(&id);
            }
        })
    };

    let onreset = {
        let tracker = tracker.clone();
        Callback::from(move |_: MouseEvent| {
            let window = gloo_utils::window();
            if !window
                .confirm_with_message("Delete all workouts?")
                .unwrap_or(false)
            {
                return;
            }
            if let Err(err) = tracker.borrow_mut().reset() {
                error!("Reset failed: {}", err);
                return;
            }
            if let Err(e) = window.location().reload() {
                error!("Reload failed: {:?}", e);
            }
        })
    };

    let (awaiting, has_workouts, entries) = {
        let state = tracker.borrow();
        (
            matches!(state.form_state(), FormState::AwaitingInput { .. }),
            !state.workouts().is_empty(),
            // newest entry directly under the form
            state.workouts().iter().rev().map(render_workout).collect::<Html>(),
        )
    };

    html! {
        <div class="app">
            <div class="sidebar">
                <ul class="workouts" onclick={onclick_list}>
                    <form
                        class={classes!("form", (!awaiting).then_some("hidden"))}
                        style={if *collapsed { "display: none" } else { "" }}
                        onsubmit={onsubmit}
                        onkeydown={onkeydown}
                    >
                        <div class="form__row">
                            <label class="form__label">{ "Type" }</label>
                            <select class="form__input form__input--type" onchange={onchange_kind}>
                                { render_kind_options(*kind) }
                            </select>
                        </div>
                        <FormRow
                            label="Distance"
                            placeholder="km"
                            class="form__input--distance"
                            value={(*distance).clone()}
                            input_ref={distance_ref.clone()}
                            oninput={text_input(&distance)}
                        />
                        <FormRow
                            label="Duration"
                            placeholder="min"
                            class="form__input--duration"
                            value={(*duration).clone()}
                            oninput={text_input(&duration)}
                        />
                        <FormRow
                            label="Cadence"
                            placeholder="step/min"
                            class="form__input--cadence"
                            value={(*cadence).clone()}
                            hidden={*kind != WorkoutKind::Running}
                            oninput={text_input(&cadence)}
                        />
                        <FormRow
                            label="Elev Gain"
                            placeholder="meters"
                            class="form__input--elevation"
                            value={(*elevation).clone()}
                            hidden={*kind != WorkoutKind::Cycling}
                            oninput={text_input(&elevation)}
                        />
                        <button class="form__btn">{ "OK" }</button>
                    </form>
                    { entries }
                </ul>
                if has_workouts {
                    <button class="btn--reset" onclick={onreset}>{ "Delete all workouts" }</button>
                }
            </div>
            <div id={MAP_CONTAINER_ID}></div>
        </div>
    }
}

/// Entry point: installs panic/log hooks and renders the App.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(DEFAULT_LOG_LEVEL));
    yew::Renderer::<App>::new().render();
}
