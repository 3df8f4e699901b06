use std::collections::BTreeMap;

use common::forecast::{Forecast, TopItems};
use common::{derive_chart_data, ChartData};
use yew::prelude::*;

use crate::components::charts::{
    festival_bar_chart, seasonal_pie_chart, weekly_intensity_chart, PlotlyChart,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ForecastTab {
    #[default]
    Products,
    Festivals,
    Seasons,
    Timeline,
}

impl ForecastTab {
    pub const ALL: [ForecastTab; 4] = [
        ForecastTab::Products,
        ForecastTab::Festivals,
        ForecastTab::Seasons,
        ForecastTab::Timeline,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ForecastTab::Products => "Products",
            ForecastTab::Festivals => "Festivals",
            ForecastTab::Seasons => "Seasons",
            ForecastTab::Timeline => "Timeline",
        }
    }

    /// The timeline needs a non-empty forecast window.
    pub fn available(&self, charts: &ChartData) -> bool {
        match self {
            ForecastTab::Timeline => charts.weekly.is_some(),
            _ => true,
        }
    }
}

fn top_items_table(top_items: &BTreeMap<String, TopItems>) -> Html {
    if top_items.is_empty() {
        return html! {};
    }
    html! {
        <table class="table table-sm mt-4">
            <thead>
                <tr><th>{"Event"}</th><th>{"Top items this year"}</th><th>{"Last year"}</th></tr>
            </thead>
            <tbody>
                {for top_items.iter().map(|(name, items)| html! {
                    <tr>
                        <td class="font-medium">{name}</td>
                        <td>{items.this_year.join(", ")}</td>
                        <td class="opacity-70">{items.last_year.join(", ")}</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

fn products(forecast: &Forecast) -> Html {
    if forecast.product_demands.is_empty() {
        return html! { <p class="text-sm opacity-60">{"No product ranking in this forecast."}</p> };
    }
    html! {
        <table class="table table-zebra">
            <thead><tr><th>{"#"}</th><th>{"Product"}</th><th class="text-right">{"Share of demand"}</th></tr></thead>
            <tbody>
                {for forecast.product_demands.iter().enumerate().map(|(i, p)| html! {
                    <tr>
                        <td>{i + 1}</td>
                        <td>{&p.product}</td>
                        <td class="text-right">
                            <progress class="progress progress-primary w-24 mr-2" value={p.demand_percentage.to_string()} max="100"></progress>
                            {format!("{:.1}%", p.demand_percentage)}
                        </td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

fn festivals(forecast: &Forecast, charts: &ChartData, chart_id: &str) -> Html {
    if charts.festival_bars.is_empty() {
        return html! { <p class="text-sm opacity-60">{"No festivals fall inside this forecast window."}</p> };
    }
    html! {
        <>
            <PlotlyChart id={chart_id.to_string()}
                spec={festival_bar_chart(&charts.festival_bars).map_err(|e| e.to_string())} />
            <table class="table table-sm">
                <thead><tr><th>{"Festival"}</th><th>{"Date"}</th><th class="text-right">{"Uplift"}</th></tr></thead>
                <tbody>
                    {for forecast.festival_demands.chart.iter().map(|f| html! {
                        <tr>
                            <td>{&f.festival}</td>
                            <td>{f.date.map(|d| d.format("%d %b %Y").to_string()).unwrap_or_else(|| f.month.clone())}</td>
                            <td class="text-right">{format!("+{:.0}%", f.demand_increase)}</td>
                        </tr>
                    })}
                </tbody>
            </table>
            {top_items_table(&forecast.festival_demands.top_items)}
        </>
    }
}

fn seasons(forecast: &Forecast, charts: &ChartData, chart_id: &str) -> Html {
    if charts.seasonal_pie.is_empty() {
        return html! { <p class="text-sm opacity-60">{"No seasonal surges in this forecast window."}</p> };
    }
    html! {
        <>
            <PlotlyChart id={chart_id.to_string()}
                spec={seasonal_pie_chart(&charts.seasonal_pie).map_err(|e| e.to_string())} />
            <table class="table table-sm">
                <thead><tr><th>{"Season"}</th><th>{"From"}</th><th>{"To"}</th><th class="text-right">{"Surge"}</th></tr></thead>
                <tbody>
                    {for forecast.seasonal_demands.chart.iter().map(|s| html! {
                        <tr>
                            <td>{&s.season}</td>
                            <td>{s.start.map(|d| d.to_string()).unwrap_or_default()}</td>
                            <td>{s.end.map(|d| d.to_string()).unwrap_or_default()}</td>
                            <td class="text-right">{format!("+{:.0}%", s.demand_surge)}</td>
                        </tr>
                    })}
                </tbody>
            </table>
            {top_items_table(&forecast.seasonal_demands.top_items)}
        </>
    }
}

fn timeline(charts: &ChartData, chart_id: &str) -> Html {
    match &charts.weekly {
        Some(weekly) => html! {
            <PlotlyChart id={chart_id.to_string()}
                spec={weekly_intensity_chart(weekly).map_err(|e| e.to_string())} />
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ForecastResultsProps {
    pub id: i32,
    pub forecast: Forecast,
}

#[function_component(ForecastResults)]
pub fn forecast_results(props: &ForecastResultsProps) -> Html {
    let tab = use_state(ForecastTab::default);
    let charts = use_memo(props.forecast.clone(), derive_chart_data);
    let forecast = &props.forecast;

    // A forecast without a window has no timeline to stay on.
    let active = if tab.available(&charts) { *tab } else { ForecastTab::Products };

    let tabs = ForecastTab::ALL.iter().filter(|t| t.available(&charts)).map(|t| {
        let tab = tab.clone();
        let target = *t;
        let onclick = Callback::from(move |_: MouseEvent| tab.set(target));
        html! {
            <a role="tab" class={classes!("tab", (target == active).then_some("tab-active"))} {onclick}>
                {target.label()}
            </a>
        }
    });

    let chart_id = |name: &str| format!("forecast-{}-{}", props.id, name);
    let body = match active {
        ForecastTab::Products => products(forecast),
        ForecastTab::Festivals => festivals(forecast, &charts, &chart_id("festivals")),
        ForecastTab::Seasons => seasons(forecast, &charts, &chart_id("seasons")),
        ForecastTab::Timeline => timeline(&charts, &chart_id("timeline")),
    };

    let peak = forecast
        .peak_festival()
        .map(|f| format!("{} (+{:.0}%)", f.festival, f.demand_increase));
    let window = match (forecast.forecast_start, forecast.forecast_end) {
        (Some(start), Some(end)) => format!("{} to {}", start, end),
        _ => "Unknown window".to_string(),
    };

    html! {
        <div class="space-y-4">
            <div class="stats shadow w-full bg-base-100">
                <div class="stat">
                    <div class="stat-title">{"Forecast window"}</div>
                    <div class="stat-value text-lg">{window}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Confidence"}</div>
                    <div class="stat-value text-lg">{format!("{:.0}%", forecast.confidence_score * 100.0)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Peak festival"}</div>
                    <div class="stat-value text-lg">{peak.unwrap_or_else(|| "None".to_string())}</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div role="tablist" class="tabs tabs-bordered mb-4">{for tabs}</div>
                    {body}
                </div>
            </div>

            if !forecast.suggestions.is_empty() {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title text-base"><i class="fas fa-lightbulb"></i>{" Suggestions"}</h3>
                        <ul class="list-disc list-inside text-sm space-y-1">
                            {for forecast.suggestions.iter().map(|s| html! { <li>{s}</li> })}
                        </ul>
                    </div>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_timeline_needs_a_window() {
        let empty = derive_chart_data(&Forecast::default());
        assert!(!ForecastTab::Timeline.available(&empty));
        assert!(ForecastTab::Festivals.available(&empty));

        let forecast = Forecast {
            forecast_start: NaiveDate::from_ymd_opt(2025, 1, 1),
            forecast_end: NaiveDate::from_ymd_opt(2025, 1, 22),
            ..Default::default()
        };
        assert!(ForecastTab::Timeline.available(&derive_chart_data(&forecast)));
    }
}
