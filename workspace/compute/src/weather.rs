//! Current weather for places and routes.
//!
//! Two providers implement [`WeatherProvider`]. [`BuiltinWeather`] derives
//! stable readings from the place and date and never fails. [`HttpWeather`]
//! calls a weather proxy, throttles outbound calls per endpoint and falls back
//! to the last reading it saw, then to the built-in provider.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cached::{Cached, TimedSizedCache};
use chrono::NaiveDate;
use common::logistics::{
    RiskLevel, RouteWeather, RouteWeatherAnalysis, RouteWeatherSample, WeatherReport,
};
use common::round1;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::calendar::stable_score;
use crate::error::{ComputeError, Result};
use crate::logistics::geo::{find_city, sample_segment};
use crate::today_or_now;

pub const SOURCE_BUILTIN: &str = "builtin";
pub const SOURCE_HTTP: &str = "http";
pub const SOURCE_CACHE: &str = "cache";

pub const DEFAULT_ROUTE_SAMPLES: usize = 5;
/// Wind in m/s from which travel is considered risky.
const WINDY: f64 = 8.0;
const STORMY: f64 = 15.0;
const LAST_KNOWN_CAPACITY: usize = 500;
const LAST_KNOWN_LIFESPAN_SECS: u64 = 6 * 3600;
const LAST_CALLS_CAPACITY: usize = 1000;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Weather for a place name.
    async fn for_place(&self, place: &str) -> Result<WeatherReport>;

    /// Weather at a coordinate.
    async fn for_coords(&self, lat: f64, lon: f64) -> Result<WeatherReport>;
}

/// Deterministic readings keyed by place and date.
///
/// Unpinned, the date is read from the local clock on every lookup.
#[derive(Debug, Clone, Default)]
pub struct BuiltinWeather {
    today: Option<NaiveDate>,
}

impl BuiltinWeather {
    pub fn new(today: Option<NaiveDate>) -> Self {
        Self { today }
    }

    pub fn new_with_today(today: NaiveDate) -> Self {
        Self::new(Some(today))
    }

    fn reading(
        &self,
        key: &str,
        location: String,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> WeatherReport {
        let label = format!("{}-{}", key, today_or_now(self.today).format("%Y-%m-%d"));
        let (condition, description) = match stable_score(&format!("{label}-sky"), 0, 99) {
            0..=49 => ("Clear", "clear sky"),
            50..=74 => ("Clouds", "scattered clouds"),
            75..=91 => ("Rain", "moderate rain"),
            _ => ("Thunderstorm", "thunderstorm with rain"),
        };
        WeatherReport {
            location,
            lat,
            lon,
            temperature_c: f64::from(stable_score(&format!("{label}-temp"), 180, 170)) / 10.0,
            condition: condition.to_string(),
            description: description.to_string(),
            wind_speed: f64::from(stable_score(&format!("{label}-wind"), 5, 175)) / 10.0,
            source: SOURCE_BUILTIN.to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for BuiltinWeather {
    async fn for_place(&self, place: &str) -> Result<WeatherReport> {
        let place = place.trim();
        if place.is_empty() {
            return Err(ComputeError::Validation("Location must not be empty".to_string()));
        }
        Ok(match find_city(place) {
            Some(city) => self.reading(
                &city.name.to_lowercase(),
                city.name.to_string(),
                Some(city.lat),
                Some(city.lon),
            ),
            None => self.reading(&place.to_lowercase(), place.to_string(), None, None),
        })
    }

    async fn for_coords(&self, lat: f64, lon: f64) -> Result<WeatherReport> {
        check_coords(lat, lon)?;
        let key = format!("{lat:.2},{lon:.2}");
        Ok(self.reading(&key, key.clone(), Some(lat), Some(lon)))
    }
}

fn check_coords(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(ComputeError::Validation(format!("Invalid coordinates {lat}, {lon}")));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ProxyCondition {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize, Default)]
struct ProxyWind {
    #[serde(default)]
    speed: f64,
}

/// Body returned by the weather proxy for both endpoints.
#[derive(Debug, Deserialize)]
struct ProxyWeather {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    temp: f64,
    #[serde(default)]
    weather: Vec<ProxyCondition>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    wind: ProxyWind,
}

impl ProxyWeather {
    fn into_report(self, fallback_location: &str) -> WeatherReport {
        let first = self.weather.into_iter().next();
        let condition = first
            .as_ref()
            .map(|c| c.main.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let description = self
            .description
            .filter(|d| !d.is_empty())
            .or_else(|| first.map(|c| c.description))
            .unwrap_or_default();
        WeatherReport {
            location: self.city.unwrap_or_else(|| fallback_location.to_string()),
            lat: self.lat,
            lon: self.lon,
            temperature_c: self.temp,
            condition,
            description,
            wind_speed: self.wind.speed,
            source: SOURCE_HTTP.to_string(),
        }
    }
}

/// Weather from an HTTP proxy exposing `/weather/{city}` and
/// `/weather?lat=&lon=`.
pub struct HttpWeather {
    client: reqwest::Client,
    base_url: String,
    min_interval: Duration,
    last_calls: Mutex<TimedSizedCache<String, Instant>>,
    last_known: Arc<Mutex<TimedSizedCache<String, WeatherReport>>>,
    fallback: BuiltinWeather,
}

impl HttpWeather {
    pub fn new(
        base_url: &str,
        min_interval: Duration,
        timeout: Duration,
        today: Option<NaiveDate>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            min_interval,
            // whole seconds, rounded up, so an entry outlives its interval
            last_calls: Mutex::new(TimedSizedCache::with_size_and_lifespan(
                LAST_CALLS_CAPACITY,
                min_interval.as_secs() + 1,
            )),
            last_known: Arc::new(Mutex::new(TimedSizedCache::with_size_and_lifespan(
                LAST_KNOWN_CAPACITY,
                LAST_KNOWN_LIFESPAN_SECS,
            ))),
            fallback: BuiltinWeather::new(today),
        })
    }

    /// Returns true and records the call when `key` has not been called
    /// within `interval`.
    pub fn allow_call(&self, key: &str, interval: Duration) -> bool {
        let Ok(mut calls) = self.last_calls.lock() else {
            return false;
        };
        let now = Instant::now();
        let key = key.to_string();
        match calls.cache_get(&key).copied() {
            Some(last) if now.duration_since(last) < interval => false,
            _ => {
                calls.cache_set(key, now);
                true
            }
        }
    }

    fn remember(&self, key: &str, report: &WeatherReport) {
        if let Ok(mut cache) = self.last_known.lock() {
            cache.cache_set(key.to_string(), report.clone());
        }
    }

    fn recall(&self, key: &str) -> Option<WeatherReport> {
        let mut cache = self.last_known.lock().ok()?;
        cache.cache_get(&key.to_string()).map(|report| WeatherReport {
            source: SOURCE_CACHE.to_string(),
            ..report.clone()
        })
    }

    fn place_url(&self, place: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ComputeError::Weather(format!("invalid weather url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ComputeError::Weather("weather url cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(["weather", place]);
        Ok(url)
    }

    async fn fetch(
        &self,
        request: reqwest::RequestBuilder,
        location: &str,
    ) -> Result<WeatherReport> {
        let body: ProxyWeather = request.send().await?.error_for_status()?.json().await?;
        Ok(body.into_report(location))
    }

    /// Runs one throttled lookup, falling back to the last known reading or
    /// the built-in provider.
    async fn lookup<F>(
        &self,
        key: String,
        request: Result<reqwest::RequestBuilder>,
        location: &str,
        fallback: F,
    ) -> Result<WeatherReport>
    where
        F: std::future::Future<Output = Result<WeatherReport>> + Send,
    {
        if !self.allow_call(&key, self.min_interval) {
            debug!("Weather call for {} throttled", key);
            return match self.recall(&key) {
                Some(report) => Ok(report),
                None => fallback.await,
            };
        }

        match self.fetch(request?, location).await {
            Ok(report) => {
                self.remember(&key, &report);
                Ok(report)
            }
            Err(e) => {
                warn!("Weather lookup for {} failed: {}", key, e);
                match self.recall(&key) {
                    Some(report) => Ok(report),
                    None => fallback.await,
                }
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for HttpWeather {
    #[instrument(skip(self))]
    async fn for_place(&self, place: &str) -> Result<WeatherReport> {
        let place = place.trim();
        if place.is_empty() {
            return Err(ComputeError::Validation("Location must not be empty".to_string()));
        }
        let key = format!("/weather/{}", place.to_lowercase());
        let request = self.place_url(place).map(|url| self.client.get(url));
        self.lookup(key, request, place, self.fallback.for_place(place)).await
    }

    #[instrument(skip(self))]
    async fn for_coords(&self, lat: f64, lon: f64) -> Result<WeatherReport> {
        check_coords(lat, lon)?;
        let key = format!("/weather?lat={lat:.2}&lon={lon:.2}");
        let request = Ok(self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[("lat", lat), ("lon", lon)]));
        let location = format!("{lat:.2},{lon:.2}");
        self.lookup(key, request, &location, self.fallback.for_coords(lat, lon)).await
    }
}

/// Travel risk from a single reading.
pub fn risk_level(report: &WeatherReport) -> RiskLevel {
    let condition = report.condition.to_lowercase();
    if condition.contains("thunder") || condition.contains("storm") || report.wind_speed >= STORMY {
        RiskLevel::High
    } else if ["rain", "drizzle", "fog", "mist", "haze", "snow"]
        .iter()
        .any(|c| condition.contains(c))
        || report.wind_speed >= WINDY
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn delay_hours(risk: RiskLevel) -> f64 {
    match risk {
        RiskLevel::Low => 0.0,
        RiskLevel::Medium => 2.0,
        RiskLevel::High => 6.0,
    }
}

fn advisories(risk: RiskLevel, origin: &WeatherReport, destination: &WeatherReport) -> Vec<String> {
    let mut advisories = Vec::new();
    for (end, report) in [("origin", origin), ("destination", destination)] {
        match risk_level(report) {
            RiskLevel::High => advisories.push(format!(
                "Severe weather at {} ({}): consider postponing dispatch",
                end, report.description
            )),
            RiskLevel::Medium => advisories.push(format!(
                "Expect slower transit near {} ({})",
                end, report.description
            )),
            RiskLevel::Low => {}
        }
    }
    if risk == RiskLevel::Low {
        advisories.push("Weather conditions are favourable for delivery".to_string());
    }
    advisories
}

/// Weather at both ends of a route with a combined risk and delay.
#[instrument(skip(provider))]
pub async fn route_analysis(
    provider: &dyn WeatherProvider,
    origin: &str,
    destination: &str,
) -> Result<RouteWeatherAnalysis> {
    let origin_weather = provider.for_place(origin).await?;
    let destination_weather = provider.for_place(destination).await?;

    let origin_risk = risk_level(&origin_weather);
    let destination_risk = risk_level(&destination_weather);
    let risk = origin_risk.max(destination_risk);
    let expected_delay_hours = round1(delay_hours(origin_risk) + delay_hours(destination_risk));
    debug!("Route {} -> {} risk {}", origin, destination, risk.as_str());

    Ok(RouteWeatherAnalysis {
        origin: origin.to_string(),
        destination: destination.to_string(),
        advisories: advisories(risk, &origin_weather, &destination_weather),
        origin_weather,
        destination_weather,
        risk_level: risk,
        expected_delay_hours,
        precise_distance: None,
    })
}

/// Weather at `samples` evenly spaced points between two known cities.
#[instrument(skip(provider))]
pub async fn route_weather(
    provider: &dyn WeatherProvider,
    origin: &str,
    destination: &str,
    samples: usize,
) -> Result<RouteWeather> {
    let (Some(from), Some(to)) = (find_city(origin), find_city(destination)) else {
        return Err(ComputeError::Validation(
            "Could not find coordinates for origin or destination".to_string(),
        ));
    };

    let mut points = Vec::with_capacity(samples);
    for (index, (lat, lon)) in sample_segment((from.lat, from.lon), (to.lat, to.lon), samples)
        .into_iter()
        .enumerate()
    {
        let weather = provider.for_coords(lat, lon).await?;
        points.push(RouteWeatherSample { index, lat, lon, weather });
    }
    let risk_level = points
        .iter()
        .map(|p| risk_level(&p.weather))
        .max()
        .unwrap_or_default();

    Ok(RouteWeather {
        origin: origin.to_string(),
        destination: destination.to_string(),
        samples: points,
        risk_level,
    })
}
