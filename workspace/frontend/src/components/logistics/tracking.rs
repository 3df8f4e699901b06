use common::logistics::ShipmentTracking as Tracking;
use yew::prelude::*;

use super::shipments::status_badge_class;
use super::weather::risk_badge_class;
use crate::api_client::logistics;
use crate::common::fetch_hook::use_fetch;
use crate::common::fetch_render::FetchRender;
use crate::components::form::input_value;

fn render_tracking(tracking: Tracking) -> Html {
    let shipment = &tracking.shipment;
    html! {
        <div class="space-y-4">
            <div class="flex flex-wrap gap-4 items-center">
                <span class="font-mono">{&shipment.id}</span>
                <span class={classes!("badge", status_badge_class(shipment.status))}>{shipment.status.as_str()}</span>
                <span>{format!("{} → {}", shipment.origin, shipment.destination)}</span>
                <span class="opacity-70">{format!("ETA {}", shipment.eta)}</span>
            </div>
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Current location"}</div>
                    <div class="stat-value text-lg">{&tracking.tracking.location}</div>
                    <div class="stat-desc">{format!("Updated {}", tracking.tracking.last_update.format("%d %b %H:%M"))}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Next checkpoint"}</div>
                    <div class="stat-value text-lg">{tracking.tracking.next_checkpoint.clone().unwrap_or_else(|| "-".to_string())}</div>
                </div>
            </div>
            <ul class="timeline timeline-vertical timeline-compact">
                {for tracking.tracking.status_history.iter().map(|entry| html! {
                    <li>
                        <div class="timeline-start text-xs opacity-70">{entry.timestamp.format("%d %b %H:%M").to_string()}</div>
                        <div class="timeline-middle"><i class="fas fa-circle text-xs"></i></div>
                        <div class="timeline-end timeline-box">
                            <span class="font-medium">{entry.status.as_str()}</span>
                            {format!(" at {}", entry.location)}
                            if let Some(message) = &entry.message {
                                <div class="text-xs opacity-70">{message}</div>
                            }
                        </div>
                        <hr />
                    </li>
                })}
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TrackingDetailProps {
    shipment_id: String,
}

#[function_component(TrackingDetail)]
fn tracking_detail(props: &TrackingDetailProps) -> Html {
    let (tracking, retry) = use_fetch(props.shipment_id.clone(), |id| async move {
        logistics::get_tracking(&id).await
    });
    let (risk, _) = use_fetch(props.shipment_id.clone(), |id| async move {
        logistics::shipment_weather_analysis(&id).await
    });

    let risk_line = risk.data().map(|found| {
        let analysis = &found.analysis;
        html! {
            <div class="alert mt-4">
                <i class="fas fa-cloud-sun-rain"></i>
                <span>
                    <span class={classes!("badge", risk_badge_class(analysis.risk_level))}>{analysis.risk_level.as_str()}</span>
                    {format!(" weather risk, expected delay {:.0} h", analysis.expected_delay_hours)}
                </span>
            </div>
        }
    });

    html! {
        <>
            <FetchRender<Tracking> state={(*tracking).clone()} render={Callback::from(render_tracking)} on_retry={retry} />
            {risk_line.unwrap_or_default()}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct ShipmentTrackingProps {
    pub shipment_id: Option<String>,
    pub on_select: Callback<String>,
}

/// Tracking of one shipment, picked in the shipments table or typed in.
#[function_component(ShipmentTracking)]
pub fn shipment_tracking(props: &ShipmentTrackingProps) -> Html {
    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let id = input_value(&e).trim().to_uppercase();
            if !id.is_empty() {
                on_select.emit(id);
            }
        })
    };

    html! {
        <div class="space-y-4">
            <input type="text" class="input input-bordered input-sm w-64 font-mono" placeholder="SHP-XXXXXXXX"
                value={props.shipment_id.clone().unwrap_or_default()} {onchange} />
            {match &props.shipment_id {
                Some(id) => html! { <TrackingDetail key={id.clone()} shipment_id={id.clone()} /> },
                None => html! { <p class="text-sm opacity-60">{"Pick a shipment to track."}</p> },
            }}
        </div>
    }
}
