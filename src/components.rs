//! Pure Yew view pieces for the workout sidebar.
//!
//! Everything here renders from props or plain values; state lives in the
//! `App` component.

use mapty::utils::entry_details;
use mapty::{Workout, WorkoutKind};
use yew::prelude::*;

/// One icon / value / unit cell of a list entry.
#[derive(Properties, PartialEq)]
pub struct DetailProps {
    pub icon: AttrValue,
    pub value: AttrValue,
    pub unit: AttrValue,
}

#[function_component(WorkoutDetail)]
pub fn workout_detail(props: &DetailProps) -> Html {
    html! {
        <div class="workout__details">
            <span class="workout__icon">{ props.icon.clone() }</span>
            <span class="workout__value">{ props.value.clone() }</span>
            <span class="workout__unit">{ props.unit.clone() }</span>
        </div>
    }
}

/// Renders a workout as a list entry.
///
/// The `data-id` attribute is what a click on the list resolves back to a
/// workout.
pub fn render_workout(workout: &Workout) -> Html {
    let kind = workout.kind();
    let details = entry_details(workout)
        .into_iter()
        .map(|d| html! { <WorkoutDetail icon={d.icon} value={d.value} unit={d.unit} /> })
        .collect::<Html>();

    html! {
        <li key={workout.id.to_string()}
            class={classes!("workout", format!("workout--{}", kind))}
            data-id={workout.id.to_string()}>
            <h2 class="workout__title">{ workout.description.clone() }</h2>
            { details }
        </li>
    }
}

/// Labelled numeric input row of the form.
#[derive(Properties, PartialEq)]
pub struct FormRowProps {
    pub label: AttrValue,
    pub placeholder: AttrValue,
    pub class: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub hidden: bool,
    #[prop_or_default]
    pub input_ref: NodeRef,
    pub oninput: Callback<InputEvent>,
}

#[function_component(FormRow)]
pub fn form_row(props: &FormRowProps) -> Html {
    html! {
        <div class={classes!("form__row", props.hidden.then_some("form__row--hidden"))}>
            <label class="form__label">{ props.label.clone() }</label>
            <input
                class={classes!("form__input", props.class.to_string())}
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                ref={props.input_ref.clone()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

/// Options of the workout type selector.
pub fn render_kind_options(selected: WorkoutKind) -> Html {
    [WorkoutKind::Running, WorkoutKind::Cycling]
        .into_iter()
        .map(|kind| {
            html! {
                <option value={kind.as_str()} selected={kind == selected}>{ kind.label() }</option>
            }
        })
        .collect::<Html>()
}
