use common::scenario::{
    CompetitorAction, ScenarioParameters, ScenarioRequest, ScenarioResult, ScenarioTemplate,
};
use yew::prelude::*;

use super::form::{format_inr, input_event_value, parse_number, select_value};
use crate::api_client::scenarios;
use crate::common::fetch_hook::use_fetch;
use crate::common::loading::Loading;
use crate::context::BusinessInfoContext;
use crate::hooks::FetchState;

/// Base sales used when the profile has none yet.
pub const FALLBACK_BASE_SALES: f64 = 100_000.0;

pub fn neutral_parameters() -> ScenarioParameters {
    ScenarioParameters {
        price_change: 0.0,
        marketing_spend: 0.0,
        seasonal_factor: 1.0,
        competitor_action: CompetitorAction::None,
    }
}

pub fn base_sales_for(current_sales: f64) -> f64 {
    if current_sales > 0.0 {
        current_sales
    } else {
        FALLBACK_BASE_SALES
    }
}

fn impact_class(value: f64) -> &'static str {
    if value > 0.0 {
        "text-success"
    } else if value < 0.0 {
        "text-error"
    } else {
        "text-base-content/60"
    }
}

fn render_result(result: &ScenarioResult) -> Html {
    let rows = [
        ("Price", result.breakdown.price),
        ("Marketing", result.breakdown.marketing),
        ("Seasonal", result.breakdown.seasonal),
        ("Competitor", result.breakdown.competitor),
    ];
    html! {
        <div class="space-y-4">
            <div class="stats shadow w-full">
                <div class="stat">
                    <div class="stat-title">{"Baseline"}</div>
                    <div class="stat-value text-xl">{format_inr(result.baseline)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Projected"}</div>
                    <div class="stat-value text-xl">{format_inr(result.projected)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Total impact"}</div>
                    <div class={classes!("stat-value", "text-xl", impact_class(result.total_impact))}>
                        {format!("{:+.1}%", result.total_impact)}
                    </div>
                </div>
            </div>
            <table class="table table-sm">
                <tbody>
                    {for rows.iter().map(|(label, value)| html! {
                        <tr>
                            <td>{*label}</td>
                            <td class={classes!("text-right", impact_class(*value))}>{format!("{:+.1}%", value)}</td>
                        </tr>
                    })}
                </tbody>
            </table>
            <div class="alert">
                <i class="fas fa-lightbulb"></i>
                <span>{&result.recommendation}</span>
            </div>
        </div>
    }
}

#[function_component(WhatIfScenarios)]
pub fn what_if_scenarios() -> Html {
    let business = use_context::<BusinessInfoContext>().unwrap_or_default();
    let base_sales = base_sales_for(business.profile.current_sales);

    let parameters = use_state(neutral_parameters);
    let result = use_state(|| FetchState::<ScenarioResult>::NotStarted);
    let (templates, _) = use_fetch((), |_| scenarios::get_templates());

    let set_number = |apply: fn(&mut ScenarioParameters, f64)| {
        let parameters = parameters.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = parse_number(&input_event_value(&e)) {
                let mut next = (*parameters).clone();
                apply(&mut next, value);
                parameters.set(next);
            }
        })
    };

    let on_competitor = {
        let parameters = parameters.clone();
        Callback::from(move |e: Event| {
            if let Ok(action) = select_value(&e).parse::<CompetitorAction>() {
                let mut next = (*parameters).clone();
                next.competitor_action = action;
                parameters.set(next);
            }
        })
    };

    let apply_template = |template: &ScenarioTemplate| {
        let parameters = parameters.clone();
        let chosen = template.parameters.clone();
        let name = template.name.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("Applying scenario template {}", name);
            parameters.set(chosen.clone());
        })
    };

    let on_analyze = {
        let parameters = parameters.clone();
        let result = result.clone();
        Callback::from(move |_: MouseEvent| {
            if result.is_loading() {
                return;
            }
            let request = ScenarioRequest::from_parameters(base_sales, &parameters);
            let result = result.clone();
            result.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                match scenarios::analyze_scenario(&request).await {
                    Ok(done) => result.set(FetchState::Success(done)),
                    Err(e) => result.set(FetchState::Error(e)),
                }
            });
        })
    };

    let on_reset = {
        let parameters = parameters.clone();
        Callback::from(move |_: MouseEvent| parameters.set(neutral_parameters()))
    };

    let template_buttons = match &*templates {
        FetchState::Success(list) => html! {
            <div class="flex flex-wrap gap-2">
                {for list.iter().map(|t| html! {
                    <button class="btn btn-sm btn-outline" title={t.description.clone()} onclick={apply_template(t)}>
                        {&t.name}
                    </button>
                })}
            </div>
        },
        FetchState::Error(e) => html! { <p class="text-sm text-error">{format!("Templates unavailable: {}", e)}</p> },
        _ => html! { <Loading inline=true /> },
    };

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <div class="card bg-base-100 shadow">
                <div class="card-body space-y-3">
                    <h2 class="card-title">{"Scenario"}</h2>
                    <p class="text-sm opacity-70">{format!("Base monthly sales: {}", format_inr(base_sales))}</p>
                    {template_buttons}

                    <label class="form-control">
                        <span class="label-text">{format!("Price change: {:+.0}%", parameters.price_change)}</span>
                        <input type="range" class="range range-sm" min="-50" max="100" step="1"
                            value={parameters.price_change.to_string()}
                            oninput={set_number(|p, v| p.price_change = v)} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"Marketing spend (₹)"}</span>
                        <input type="number" class="input input-bordered input-sm" min="0" step="500"
                            value={parameters.marketing_spend.to_string()}
                            oninput={set_number(|p, v| p.marketing_spend = v.max(0.0))} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{format!("Seasonal factor: {:.2}", parameters.seasonal_factor)}</span>
                        <input type="range" class="range range-sm" min="0.5" max="2" step="0.05"
                            value={parameters.seasonal_factor.to_string()}
                            oninput={set_number(|p, v| p.seasonal_factor = v)} />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{"Competitor action"}</span>
                        <select class="select select-bordered select-sm" onchange={on_competitor}>
                            {for CompetitorAction::ALL.iter().map(|a| html! {
                                <option value={a.as_str()} selected={*a == parameters.competitor_action}>{a.as_str()}</option>
                            })}
                        </select>
                    </label>

                    <div class="card-actions justify-end">
                        <button class="btn btn-ghost btn-sm" onclick={on_reset}>{"Reset"}</button>
                        <button class="btn btn-primary btn-sm" onclick={on_analyze} disabled={result.is_loading()}>
                            <i class="fas fa-calculator"></i>{" Analyze"}
                        </button>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Projected impact"}</h2>
                    {match &*result {
                        FetchState::NotStarted => html! {
                            <p class="text-sm opacity-70">{"Adjust the levers and press Analyze."}</p>
                        },
                        FetchState::Loading => html! { <Loading /> },
                        FetchState::Error(e) => html! {
                            <div class="alert alert-error"><span>{e}</span></div>
                        },
                        FetchState::Success(done) => render_result(done),
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
    fn test_base_sales_falls_back() {
        assert_eq!(base_sales_for(0.0), FALLBACK_BASE_SALES);
        assert_eq!(base_sales_for(250000.0), 250000.0);
    }

    #[test]
    fn test_neutral_parameters_build_valid_request() {
        let request = ScenarioRequest::from_parameters(50000.0, &neutral_parameters());
        assert_eq!(request.competitor_action, "none");
        assert_eq!(request.seasonal_factor, 1.0);
        assert_eq!(impact_class(0.0), "text-base-content/60");
    }
}
