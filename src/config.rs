use anyhow::Result;
use chrono::NaiveDate;
use compute::{default_weather, WeatherSettings};
use config::{Config, Environment};
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://supplychain.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Server settings, read from `.env` and the process environment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// Comma separated list of allowed origins. Empty allows any origin.
    pub cors_origins: String,
    pub cache_ttl_secs: u64,
    pub cache_max_capacity: u64,
    pub default_forecast_period: u32,
    pub max_forecast_months: u32,
    /// Base URL of the weather proxy. Unset uses the built-in provider.
    pub weather_api_url: Option<String>,
    pub weather_min_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            cors_origins: String::new(),
            cache_ttl_secs: 3600,
            cache_max_capacity: 1000,
            default_forecast_period: compute::forecast::DEFAULT_FORECAST_PERIOD,
            max_forecast_months: 36,
            weather_api_url: None,
            weather_min_interval_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Loads `.env` and layers environment variables over the defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(Environment::default().try_parsing(true))
    }

    pub fn from_source(environment: Environment) -> Result<Self> {
        let settings = Config::builder().add_source(environment).build()?;
        let config: AppConfig = settings.try_deserialize()?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.weather_api_url = self
            .weather_api_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self.max_forecast_months = self.max_forecast_months.max(1);
        self.default_forecast_period =
            self.default_forecast_period.clamp(1, self.max_forecast_months);
        self
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn weather_settings(&self) -> WeatherSettings {
        WeatherSettings {
            api_url: self.weather_api_url.clone(),
            min_interval: Duration::from_millis(self.weather_min_interval_ms),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Connects to the database and builds the shared handler state.
///
/// `today` pins the date used by the forecast, routing and weather engines.
pub async fn initialize_app_state(config: AppConfig, today: Option<NaiveDate>) -> Result<AppState> {
    trace!("Entering initialize_app_state function");
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    let cache = Cache::builder()
        .max_capacity(config.cache_max_capacity)
        .time_to_live(Duration::from_secs(config.cache_ttl_secs))
        .build();
    debug!(
        "Cache ready with capacity {} and ttl {}s",
        config.cache_max_capacity, config.cache_ttl_secs
    );

    let weather = default_weather(&config.weather_settings(), today)?;

    Ok(AppState {
        db,
        cache,
        weather,
        today,
        config: Arc::new(config),
    })
}
