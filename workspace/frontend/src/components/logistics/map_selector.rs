use common::cities::{city_named, CITIES};
use yew::prelude::*;

use crate::components::form::select_value;

#[derive(Properties, PartialEq)]
pub struct MapSelectorProps {
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
}

/// City picker standing in for a map. Shows the coordinates of the pick.
#[function_component(MapSelector)]
pub fn map_selector(props: &MapSelectorProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| on_change.emit(select_value(&e)))
    };
    let coordinates = city_named(&props.value).map(|c| format!("{:.4}°N, {:.4}°E", c.lat, c.lon));

    html! {
        <label class="form-control">
            <span class="label-text">{&props.label}</span>
            <select class="select select-bordered select-sm" {onchange}>
                <option value="" selected={props.value.is_empty()} disabled=true>{"Choose a city"}</option>
                {for CITIES.iter().map(|c| html! {
                    <option value={c.name} selected={c.name == props.value}>{c.name}</option>
                })}
            </select>
            <span class="label-text-alt opacity-60 mt-1">{coordinates.unwrap_or_default()}</span>
        </label>
    }
}
