use common::cities::city_named;
use common::logistics::{
    LocationPair, RiskLevel, RouteNews, RouteWeather, RouteWeatherAnalysis, WeatherReport,
};
use yew::prelude::*;

use crate::api_client::logistics;
use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::use_fetch;
use crate::common::loading::Loading;
use crate::hooks::FetchState;

pub const COMBINED_ERROR: &str = "Weather and news for this route are unavailable right now.";

/// Weather analysis and route news arrive together or not at all.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteConditions {
    pub weather: RouteWeatherAnalysis,
    pub news: RouteNews,
}

/// Merges the two answers. Either failure becomes one generic message.
pub fn combine(
    weather: Result<RouteWeatherAnalysis, String>,
    news: Result<RouteNews, String>,
) -> Result<RouteConditions, String> {
    match (weather, news) {
        (Ok(weather), Ok(news)) => Ok(RouteConditions { weather, news }),
        (weather, news) => {
            if let Err(e) = weather {
                log::warn!("Route weather failed: {}", e);
            }
            if let Err(e) = news {
                log::warn!("Route news failed: {}", e);
            }
            Err(COMBINED_ERROR.to_string())
        }
    }
}

pub async fn fetch_conditions(route: LocationPair) -> Result<RouteConditions, String> {
    let (weather, news) = futures::join!(
        logistics::route_weather_analysis(&route),
        logistics::get_route_news(&route)
    );
    combine(weather, news)
}

pub fn risk_badge_class(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "badge-success",
        RiskLevel::Medium => "badge-warning",
        RiskLevel::High => "badge-error",
    }
}

/// Place and wind line under a reading. Wind arrives in m/s.
pub fn wind_line(report: &WeatherReport) -> String {
    format!("{} · wind {:.1} m/s", report.location, report.wind_speed)
}

fn weather_card(title: &str, report: &WeatherReport) -> Html {
    html! {
        <div class="stat">
            <div class="stat-title">{title}</div>
            <div class="stat-value text-lg">{format!("{:.0}°C {}", report.temperature_c, report.condition)}</div>
            <div class="stat-desc">{wind_line(report)}</div>
        </div>
    }
}

fn render_conditions(conditions: &RouteConditions) -> Html {
    let analysis = &conditions.weather;
    html! {
        <div class="space-y-4">
            <div class="flex items-center gap-3">
                <span class={classes!("badge", "badge-lg", risk_badge_class(analysis.risk_level))}>
                    {format!("{} risk", analysis.risk_level.as_str())}
                </span>
                <span class="text-sm">{format!("Expected delay {:.0} h", analysis.expected_delay_hours)}</span>
                if let Some(precise) = &analysis.precise_distance {
                    <span class="text-sm opacity-70">{format!("{:.0} km by {}", precise.distance_km, precise.transport_mode.as_str())}</span>
                }
            </div>
            <div class="stats shadow bg-base-100 w-full">
                {weather_card("Origin", &analysis.origin_weather)}
                {weather_card("Destination", &analysis.destination_weather)}
            </div>
            if !analysis.advisories.is_empty() {
                <ul class="list-disc list-inside text-sm">
                    {for analysis.advisories.iter().map(|a| html! { <li>{a}</li> })}
                </ul>
            }
            <h4 class="font-semibold">{"Route news"}</h4>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                {for conditions.news.items.iter().map(|item| html! {
                    <div class="card bg-base-200">
                        <div class="card-body p-4">
                            <div class="flex justify-between gap-2">
                                <span class="font-medium text-sm">{&item.title}</span>
                                <span class={classes!("badge", "badge-sm", risk_badge_class(item.severity))}>{&item.category}</span>
                            </div>
                            <p class="text-xs opacity-70">{&item.summary}</p>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteWeatherPanelProps {
    pub route: LocationPair,
}

#[function_component(RouteWeatherPanel)]
pub fn route_weather_panel(props: &RouteWeatherPanelProps) -> Html {
    let (conditions, retry) = use_fetch(props.route.clone(), fetch_conditions);

    match &*conditions {
        FetchState::NotStarted | FetchState::Loading => html! { <Loading text="Checking the route..." /> },
        FetchState::Error(e) => html! { <ErrorDisplay message={e.clone()} on_retry={retry} /> },
        FetchState::Success(found) => render_conditions(found),
    }
}

pub const ROUTE_SAMPLES: u32 = 5;

fn render_samples(route: &RouteWeather) -> Html {
    html! {
        <table class="table table-xs">
            <thead><tr><th>{"Point"}</th><th>{"Position"}</th><th>{"Weather"}</th></tr></thead>
            <tbody>
                {for route.samples.iter().map(|sample| html! {
                    <tr>
                        <td>{sample.index + 1}</td>
                        <td class="font-mono">{format!("{:.2}, {:.2}", sample.lat, sample.lon)}</td>
                        <td>{format!("{:.0}°C {}", sample.weather.temperature_c, sample.weather.description)}</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}

/// Weather sampled at evenly spaced points along the route.
#[function_component(RouteSamples)]
pub fn route_samples(props: &RouteWeatherPanelProps) -> Html {
    let (samples, _) = use_fetch(props.route.clone(), |route| async move {
        logistics::get_route_weather(&route, ROUTE_SAMPLES).await
    });
    match &*samples {
        FetchState::Success(route) => render_samples(route),
        FetchState::Error(e) => html! { <p class="text-xs opacity-60">{format!("No route samples: {}", e)}</p> },
        _ => html! { <Loading inline=true /> },
    }
}

#[derive(Properties, PartialEq)]
pub struct CityWeatherProps {
    pub city: String,
}

/// Current weather at one city, by coordinates when the city is known.
#[function_component(CityWeather)]
pub fn city_weather(props: &CityWeatherProps) -> Html {
    let (report, _) = use_fetch(props.city.clone(), |city| async move {
        match city_named(&city) {
            Some(known) => logistics::get_weather_at(known.lat, known.lon).await,
            None => logistics::get_weather(&city).await,
        }
    });
    match &*report {
        FetchState::Success(report) => html! {
            <div class="stats shadow bg-base-100">{weather_card(&props.city, report)}</div>
        },
        FetchState::Error(e) => html! { <p class="text-xs text-error">{e}</p> },
        _ => html! { <Loading inline=true /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> RouteWeatherAnalysis {
        RouteWeatherAnalysis {
            origin: "Bangalore".to_string(),
            destination: "Chennai".to_string(),
            origin_weather: WeatherReport::default(),
            destination_weather: WeatherReport::default(),
            risk_level: RiskLevel::Low,
            expected_delay_hours: 0.0,
            advisories: vec![],
            precise_distance: None,
        }
    }

    fn news() -> RouteNews {
        RouteNews {
            origin: "Bangalore".to_string(),
            destination: "Chennai".to_string(),
            items: vec![],
        }
    }

    #[test]
    fn test_wind_line_reports_meters_per_second() {
        let report = WeatherReport {
            location: "Chennai".to_string(),
            wind_speed: 4.2,
            ..Default::default()
        };
        assert_eq!(wind_line(&report), "Chennai · wind 4.2 m/s");
    }

    #[test]
    fn test_both_answers_are_needed() {
        assert!(combine(Ok(analysis()), Ok(news())).is_ok());
        assert_eq!(combine(Err("timeout".into()), Ok(news())).unwrap_err(), COMBINED_ERROR);
        let failed = combine(Ok(analysis()), Err("HTTP error: 502".into()));
        assert_eq!(failed.unwrap_err(), COMBINED_ERROR);
    }
}
