use common::logistics::{CreateShipmentRequest, Priority, Shipment, TransportMode};
use yew::prelude::*;

use super::map_selector::MapSelector;
use crate::api_client::logistics;
use crate::common::toast::ToastContext;
use crate::components::form::{input_value, missing_message, parse_number, select_value};

#[derive(Properties, PartialEq)]
pub struct NewShipmentFormProps {
    pub on_created: Callback<Shipment>,
}

/// Creates a shipment. Required fields are checked before anything is sent.
#[function_component(NewShipmentForm)]
pub fn new_shipment_form(props: &NewShipmentFormProps) -> Html {
    let toast = use_context::<ToastContext>();
    let draft = use_state(CreateShipmentRequest::default);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let update = |apply: fn(&mut CreateShipmentRequest, String), read: fn(&Event) -> String| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            apply(&mut next, read(&e));
            draft.set(next);
        })
    };

    let on_destination = {
        let draft = draft.clone();
        Callback::from(move |city: String| {
            let mut next = (*draft).clone();
            next.destination = city;
            draft.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let on_created = props.on_created.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            if let Some(message) = missing_message(&draft.missing_fields()) {
                error.set(Some(message));
                return;
            }
            error.set(None);
            submitting.set(true);

            let request = (*draft).clone();
            let draft = draft.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            let on_created = on_created.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match logistics::create_shipment(&request).await {
                    Ok(shipment) => {
                        if let Some(toast) = &toast {
                            toast.show_success(format!(
                                "Shipment {} created, ETA {}",
                                shipment.id, shipment.eta
                            ));
                        }
                        draft.set(CreateShipmentRequest::default());
                        on_created.emit(shipment);
                    }
                    Err(e) => error.set(Some(e)),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <form class="card bg-base-100 shadow max-w-3xl" onsubmit={on_submit}>
            <div class="card-body">
                <h3 class="card-title text-base">{"New shipment"}</h3>
                if let Some(message) = &*error {
                    <div class="alert alert-warning"><span>{message}</span></div>
                }
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <label class="form-control">
                        <span class="label-text">{"Origin"}</span>
                        <input type="text" class="input input-bordered input-sm" placeholder={draft.origin_or_default().to_string()}
                            value={draft.origin.clone().unwrap_or_default()}
                            onchange={update(|d, v| d.origin = (!v.trim().is_empty()).then_some(v), input_value)} />
                    </label>
                    <MapSelector label="Destination *" value={draft.destination.clone()} on_change={on_destination} />
                    <label class="form-control">
                        <span class="label-text">{"Items"}</span>
                        <input type="number" class="input input-bordered input-sm" min="1"
                            value={draft.items_count_or_default().to_string()}
                            onchange={update(|d, v| d.items_count = parse_number(&v).map(|n| n.max(0.0) as u32), input_value)} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"Weight (kg)"}</span>
                        <input type="number" class="input input-bordered input-sm" min="0.1" step="0.5"
                            value={draft.weight_or_default().to_string()}
                            onchange={update(|d, v| d.weight = parse_number(&v), input_value)} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"Transport mode"}</span>
                        <select class="select select-bordered select-sm"
                            onchange={update(|d, v| d.transport_mode = v.parse::<TransportMode>().ok(), select_value)}>
                            {for TransportMode::ALL.iter().map(|m| html! {
                                <option value={m.as_str()} selected={draft.transport_mode.unwrap_or_default() == *m}>{m.as_str()}</option>
                            })}
                        </select>
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"Priority"}</span>
                        <select class="select select-bordered select-sm"
                            onchange={update(|d, v| d.priority = v.parse::<Priority>().ok(), select_value)}>
                            {for Priority::ALL.iter().map(|p| html! {
                                <option value={p.as_str()} selected={draft.priority.unwrap_or_default() == *p}>{p.as_str()}</option>
                            })}
                        </select>
                    </label>
                    <label class="form-control md:col-span-2">
                        <span class="label-text">{"Notes"}</span>
                        <input type="text" class="input input-bordered input-sm"
                            value={draft.notes.clone().unwrap_or_default()}
                            onchange={update(|d, v| d.notes = (!v.trim().is_empty()).then_some(v), input_value)} />
                    </label>
                </div>
                <div class="card-actions justify-end mt-2">
                    <button type="submit" class="btn btn-primary btn-sm" disabled={*submitting}>
                        <i class="fas fa-truck"></i>{" Create shipment"}
                    </button>
                </div>
            </div>
        </form>
    }
}
