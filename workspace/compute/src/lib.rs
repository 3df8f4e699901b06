pub mod calendar;
pub mod error;
pub mod forecast;
pub mod inventory;
pub mod logistics;
pub mod news;
pub mod reports;
pub mod scenario;
pub mod weather;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::info;

use error::Result;
use forecast::ForecastEngine;
use logistics::providers::{default_providers, ProviderAdapter};
use logistics::routes::RouteOptimizer;
use weather::{BuiltinWeather, HttpWeather, WeatherProvider};

/// Local wall clock. Every engine and timestamp reads time through here.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The pinned day, or today on the local clock.
pub fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| local_now().date())
}

/// Returns the forecast engine used by the server.
///
/// This function uses the provided date as "today" or the current date if none is provided.
pub fn default_forecast_engine(today: Option<NaiveDate>) -> ForecastEngine {
    ForecastEngine::new_with_today(today_or_now(today))
}

pub fn default_route_optimizer(today: Option<NaiveDate>) -> RouteOptimizer {
    RouteOptimizer::new_with_today(today_or_now(today))
}

/// The four rate-card carriers, one per transport mode.
pub fn default_provider_set() -> Vec<Box<dyn ProviderAdapter>> {
    default_providers()
}

/// Weather provider settings, usually read from the server configuration.
#[derive(Debug, Clone, Default)]
pub struct WeatherSettings {
    /// Base URL of the weather proxy. `None` selects the built-in provider.
    pub api_url: Option<String>,
    pub min_interval: Duration,
    pub timeout: Duration,
}

/// Returns the HTTP provider when a proxy URL is configured and the built-in
/// provider otherwise.
///
/// Without a pinned `today` the providers read the clock on every lookup.
pub fn default_weather(
    settings: &WeatherSettings,
    today: Option<NaiveDate>,
) -> Result<Arc<dyn WeatherProvider>> {
    match settings.api_url.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => {
            info!("Using weather proxy at {}", url);
            Ok(Arc::new(HttpWeather::new(url, settings.min_interval, settings.timeout, today)?))
        }
        None => {
            info!("Using built-in weather provider");
            Ok(Arc::new(BuiltinWeather::new(today)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather::{SOURCE_BUILTIN, SOURCE_CACHE};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 14).unwrap()
    }

    #[test]
    fn test_default_engines_use_given_today() {
        assert_eq!(default_forecast_engine(Some(today())).today(), today());
        assert_eq!(default_provider_set().len(), 4);
    }

    #[test]
    fn test_unpinned_today_follows_local_clock() {
        assert_eq!(today_or_now(Some(today())), today());
        assert_eq!(today_or_now(None), Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_unpinned_weather_reads_todays_clock() {
        let provider = default_weather(&WeatherSettings::default(), None).unwrap();
        let unpinned = provider.for_place("Delhi").await.unwrap();
        let pinned = BuiltinWeather::new_with_today(today_or_now(None))
            .for_place("Delhi")
            .await
            .unwrap();
        assert_eq!(unpinned, pinned);
    }

    #[tokio::test]
    async fn test_default_weather_without_url_is_builtin() {
        let settings = WeatherSettings { api_url: Some("  ".into()), ..Default::default() };
        let provider = default_weather(&settings, Some(today())).unwrap();
        let report = provider.for_place("Delhi").await.unwrap();
        assert_eq!(report.source, SOURCE_BUILTIN);
    }

    #[tokio::test]
    async fn test_default_weather_with_url_falls_back() {
        let settings = WeatherSettings {
            api_url: Some("http://127.0.0.1:9".into()),
            min_interval: Duration::from_secs(60),
            timeout: Duration::from_millis(200),
        };
        let provider = default_weather(&settings, Some(today())).unwrap();
        let report = provider.for_place("Delhi").await.unwrap();
        assert_ne!(report.source, SOURCE_CACHE);
        assert_eq!(report.location, "Delhi");
    }
}
