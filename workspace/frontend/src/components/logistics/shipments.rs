use common::logistics::{Shipment, ShipmentStatus, StatusUpdateRequest};
use yew::prelude::*;

use crate::api_client::logistics;
use crate::common::fetch_hook::use_fetch;
use crate::common::toast::ToastContext;
use crate::components::form::{format_inr, select_value};
use crate::hooks::FetchState;

pub fn status_badge_class(status: ShipmentStatus) -> &'static str {
    match status {
        ShipmentStatus::Processing => "badge-ghost",
        ShipmentStatus::InTransit => "badge-info",
        ShipmentStatus::OutForDelivery => "badge-primary",
        ShipmentStatus::Delivered => "badge-success",
        ShipmentStatus::Cancelled => "badge-error",
    }
}

/// Rows to show. Anything but a successful fetch shows none.
pub fn visible_rows(state: &FetchState<Vec<Shipment>>) -> &[Shipment] {
    state.data().map(Vec::as_slice).unwrap_or(&[])
}

#[derive(Properties, PartialEq)]
pub struct ShipmentsTableProps {
    /// Bumped by the parent to force a reload.
    pub version: u32,
    pub on_track: Callback<String>,
}

#[function_component(ShipmentsTable)]
pub fn shipments_table(props: &ShipmentsTableProps) -> Html {
    let toast = use_context::<ToastContext>();
    let status_filter = use_state(|| None::<String>);

    let (shipments, refetch) = use_fetch(((*status_filter).clone(), props.version), |(status, _)| {
        logistics::get_shipments(status)
    });

    let on_filter = {
        let status_filter = status_filter.clone();
        Callback::from(move |e: Event| {
            let value = select_value(&e);
            status_filter.set((!value.is_empty()).then_some(value));
        })
    };

    let on_status = |id: String| {
        let refetch = refetch.clone();
        let toast = toast.clone();
        Callback::from(move |e: Event| {
            let update = StatusUpdateRequest {
                status: select_value(&e),
                location: None,
                message: None,
            };
            let id = id.clone();
            let refetch = refetch.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match logistics::update_shipment_status(&id, &update).await {
                    Ok(shipment) => {
                        if let Some(toast) = &toast {
                            let message = format!("{} is now {}", shipment.id, shipment.status);
                            toast.show_success(message);
                        }
                        refetch.emit(());
                    }
                    Err(e) => {
                        if let Some(toast) = &toast {
                            toast.show_error(e);
                        }
                    }
                }
            });
        })
    };

    let rows = visible_rows(&shipments);

    html! {
        <div class="space-y-3">
            <div class="flex gap-2 items-center">
                <select class="select select-bordered select-sm" onchange={on_filter}>
                    <option value="" selected={status_filter.is_none()}>{"All statuses"}</option>
                    {for ShipmentStatus::ALL.iter().map(|s| html! {
                        <option value={s.as_str()} selected={status_filter.as_deref() == Some(s.as_str())}>{s.as_str()}</option>
                    })}
                </select>
                if shipments.is_loading() {
                    <span class="loading loading-spinner loading-sm"></span>
                }
                if shipments.error().is_some() {
                    <span class="text-sm text-error">{"Shipments could not be loaded."}</span>
                }
            </div>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table table-sm">
                    <thead>
                        <tr>
                            <th>{"Shipment"}</th>
                            <th>{"Route"}</th>
                            <th>{"Mode"}</th>
                            <th>{"ETA"}</th>
                            <th class="text-right">{"Cost"}</th>
                            <th>{"Status"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for rows.iter().map(|shipment| {
                            let on_track = {
                                let on_track = props.on_track.clone();
                                let id = shipment.id.clone();
                                Callback::from(move |_: MouseEvent| on_track.emit(id.clone()))
                            };
                            html! {
                                <tr key={shipment.id.clone()}>
                                    <td class="font-mono text-xs">{&shipment.id}</td>
                                    <td>{format!("{} → {}", shipment.origin, shipment.destination)}</td>
                                    <td>{shipment.transport_mode.as_str()}</td>
                                    <td>{shipment.eta.to_string()}</td>
                                    <td class="text-right">{format_inr(shipment.cost)}</td>
                                    <td>
                                        <select class={classes!("select", "select-xs", "badge", status_badge_class(shipment.status))}
                                            onchange={on_status(shipment.id.clone())}>
                                            {for ShipmentStatus::ALL.iter().map(|s| html! {
                                                <option value={s.as_str()} selected={*s == shipment.status}>{s.as_str()}</option>
                                            })}
                                        </select>
                                    </td>
                                    <td>
                                        <button class="btn btn-xs btn-ghost" onclick={on_track}>
                                            <i class="fas fa-map-marker-alt"></i>{" Track"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_fetch_shows_no_rows() {
        assert!(visible_rows(&FetchState::Error("HTTP error: 500".to_string())).is_empty());
        assert!(visible_rows(&FetchState::Loading).is_empty());
        assert!(visible_rows(&FetchState::Success(vec![])).is_empty());
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(status_badge_class(ShipmentStatus::Delivered), "badge-success");
        assert_eq!(status_badge_class(ShipmentStatus::Cancelled), "badge-error");
    }
}
