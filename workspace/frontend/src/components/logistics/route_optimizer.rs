use common::cities::CITIES;
use common::logistics::{LocationPair, PreciseAnalysis, RouteOptimization, TransportMode};
use yew::prelude::*;

use crate::api_client::logistics;
use crate::common::loading::Loading;
use crate::components::form::{format_inr, input_value, parse_number, select_value};
use crate::hooks::FetchState;

pub const MIN_STOPS: usize = 2;

/// Adds or removes `city` keeping the pick order.
pub fn toggle_stop(stops: &[String], city: &str) -> Vec<String> {
    if stops.iter().any(|s| s == city) {
        stops.iter().filter(|s| *s != city).cloned().collect()
    } else {
        let mut next = stops.to_vec();
        next.push(city.to_string());
        next
    }
}

fn render_route(route: &RouteOptimization) -> Html {
    html! {
        <div class="space-y-3">
            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Distance"}</div>
                    <div class="stat-value text-lg">{format!("{:.0} km", route.total_distance_km)}</div>
                    <div class="stat-desc">{format!("saves {:.0} km", route.savings.distance_saved_km)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Time"}</div>
                    <div class="stat-value text-lg">{format!("{:.1} h", route.estimated_time_hours)}</div>
                    <div class="stat-desc">{format!("saves {:.1} h", route.savings.time_saved_hours)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Cost"}</div>
                    <div class="stat-value text-lg">{format_inr(route.estimated_cost)}</div>
                    <div class="stat-desc">{format!("saves {}", format_inr(route.savings.cost_saved))}</div>
                </div>
            </div>
            <ol class="steps steps-vertical lg:steps-horizontal">
                {for route.route_details.iter().map(|stop| html! {
                    <li class="step step-primary" data-content={stop.sequence.to_string()}>
                        <span class="text-sm">{&stop.destination}</span>
                        <span class="text-xs opacity-70">{format!("+{:.0} km, {}", stop.distance_from_previous, stop.estimated_arrival)}</span>
                    </li>
                })}
            </ol>
        </div>
    }
}

fn render_precise(analysis: &PreciseAnalysis) -> Html {
    html! {
        <table class="table table-sm">
            <thead><tr><th>{"Mode"}</th><th class="text-right">{"Hours"}</th><th class="text-right">{"Cost"}</th><th class="text-right">{"Score"}</th></tr></thead>
            <tbody>
                {for analysis.mode_scores.iter().map(|score| html! {
                    <tr class={classes!((score.mode == analysis.recommended_mode).then_some("font-semibold"))}>
                        <td>
                            {score.mode.as_str()}
                            if score.mode == analysis.recommended_mode {
                                <span class="badge badge-success badge-sm ml-2">{"recommended"}</span>
                            }
                        </td>
                        <td class="text-right">{format!("{:.1}", score.duration_hours)}</td>
                        <td class="text-right">{format_inr(score.cost)}</td>
                        <td class="text-right">{format!("{:.1}", score.score)}</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteOptimizerProps {
    pub route: LocationPair,
}

/// Multi-stop ordering plus a per-mode analysis of the selected route.
#[function_component(RouteOptimizer)]
pub fn route_optimizer(props: &RouteOptimizerProps) -> Html {
    let stops = use_state(Vec::<String>::new);
    let optimized = use_state(|| FetchState::<RouteOptimization>::NotStarted);
    let mode = use_state(TransportMode::default);
    let weight = use_state(|| 10.0_f64);
    let precise = use_state(|| FetchState::<PreciseAnalysis>::NotStarted);

    let on_optimize = {
        let stops = stops.clone();
        let optimized = optimized.clone();
        Callback::from(move |_: MouseEvent| {
            let destinations = (*stops).clone();
            let optimized = optimized.clone();
            optimized.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                match logistics::optimize_routes(&destinations).await {
                    Ok(route) => optimized.set(FetchState::Success(route)),
                    Err(e) => optimized.set(FetchState::Error(e)),
                }
            });
        })
    };

    let on_analyze = {
        let route = props.route.clone();
        let mode = mode.clone();
        let weight = weight.clone();
        let precise = precise.clone();
        Callback::from(move |_: MouseEvent| {
            let (route, mode, weight) = (route.clone(), *mode, *weight);
            let precise = precise.clone();
            precise.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                match logistics::precise_analysis(&route, mode, weight).await {
                    Ok(analysis) => precise.set(FetchState::Success(analysis)),
                    Err(e) => precise.set(FetchState::Error(e)),
                }
            });
        })
    };

    let on_mode = {
        let mode = mode.clone();
        Callback::from(move |e: Event| {
            if let Ok(next) = select_value(&e).parse::<TransportMode>() {
                mode.set(next);
            }
        })
    };
    let on_weight = {
        let weight = weight.clone();
        Callback::from(move |e: Event| {
            if let Some(kg) = parse_number(&input_value(&e)).filter(|kg| *kg > 0.0) {
                weight.set(kg);
            }
        })
    };

    let route_ready = !props.route.origin.is_empty() && !props.route.destination.is_empty();

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title text-base">{"Delivery run"}</h3>
                    <div class="flex flex-wrap gap-2">
                        {for CITIES.iter().map(|city| {
                            let checked = stops.iter().any(|s| s == city.name);
                            let onchange = {
                                let stops = stops.clone();
                                let name = city.name;
                                Callback::from(move |_: Event| stops.set(toggle_stop(&stops, name)))
                            };
                            html! {
                                <label class="label cursor-pointer gap-1">
                                    <input type="checkbox" class="checkbox checkbox-xs" {checked} {onchange} />
                                    <span class="label-text text-xs">{city.name}</span>
                                </label>
                            }
                        })}
                    </div>
                    <button class="btn btn-primary btn-sm mt-2" onclick={on_optimize}
                        disabled={stops.len() < MIN_STOPS || optimized.is_loading()}>
                        {format!("Optimize {} stops", stops.len())}
                    </button>
                    {match &*optimized {
                        FetchState::NotStarted => html! {},
                        FetchState::Loading => html! { <Loading /> },
                        FetchState::Error(e) => html! { <div class="alert alert-error"><span>{e}</span></div> },
                        FetchState::Success(route) => render_route(route),
                    }}
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title text-base">
                        {format!("Mode analysis: {} → {}", props.route.origin, props.route.destination)}
                    </h3>
                    <div class="flex gap-2 items-end">
                        <select class="select select-bordered select-sm" onchange={on_mode}>
                            {for TransportMode::ALL.iter().map(|m| html! {
                                <option value={m.as_str()} selected={*m == *mode}>{m.as_str()}</option>
                            })}
                        </select>
                        <input type="number" class="input input-bordered input-sm w-28" min="0.1" step="0.5"
                            value={weight.to_string()} onchange={on_weight} />
                        <span class="text-sm">{"kg"}</span>
                        <button class="btn btn-sm btn-outline" onclick={on_analyze} disabled={!route_ready || precise.is_loading()}>
                            {"Analyze"}
                        </button>
                    </div>
                    {match &*precise {
                        FetchState::NotStarted => html! {},
                        FetchState::Loading => html! { <Loading /> },
                        FetchState::Error(e) => html! { <div class="alert alert-error"><span>{e}</span></div> },
                        FetchState::Success(analysis) => render_precise(analysis),
                    }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_stop_keeps_order() {
        let stops = toggle_stop(&[], "Pune");
        let stops = toggle_stop(&stops, "Delhi");
        assert_eq!(stops, vec!["Pune".to_string(), "Delhi".to_string()]);
        assert_eq!(toggle_stop(&stops, "Pune"), vec!["Delhi".to_string()]);
    }
}
