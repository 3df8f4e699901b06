use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::catalog::non_blank;

pub const DEFAULT_ORIGIN: &str = "Bangalore Distribution Center";
pub const DEFAULT_ITEMS_COUNT: u32 = 1;
pub const DEFAULT_WEIGHT_KG: f64 = 10.0;
pub const DEFAULT_ESTIMATED_DAYS: u32 = 4;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum ShipmentStatus {
    Processing,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::Processing,
        ShipmentStatus::InTransit,
        ShipmentStatus::OutForDelivery,
        ShipmentStatus::Delivered,
        ShipmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Processing => "Processing",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::OutForDelivery => "Out for Delivery",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = ShipmentStatus::ALL.iter().map(|s| s.as_str()).collect();
                format!("Status must be one of: {}", valid.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Road,
    Rail,
    Air,
    Sea,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] =
        [TransportMode::Road, TransportMode::Rail, TransportMode::Air, TransportMode::Sea];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Road => "road",
            TransportMode::Rail => "rail",
            TransportMode::Air => "air",
            TransportMode::Sea => "sea",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown transport mode '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Standard,
    Express,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Standard, Priority::Express, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Standard => "standard",
            Priority::Express => "express",
            Priority::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown priority '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct ShipmentItem {
    pub name: String,
    pub quantity: u32,
    pub sku: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StatusHistoryEntry {
    pub status: ShipmentStatus,
    pub timestamp: NaiveDateTime,
    pub location: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TrackingInfo {
    pub last_update: NaiveDateTime,
    pub location: String,
    #[serde(default)]
    pub next_checkpoint: Option<String>,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Shipment {
    /// `SHP-` followed by eight upper-case hex digits.
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    #[serde(default)]
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub priority: Priority,
    pub items_count: u32,
    pub total_weight: f64,
    #[serde(default)]
    pub items: Vec<ShipmentItem>,
    #[serde(default)]
    pub notes: String,
    pub cost: f64,
    pub created_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub eta: NaiveDate,
    pub actual_delivery: Option<NaiveDate>,
    pub tracking_info: TrackingInfo,
}

impl Shipment {
    pub fn delivered_on_time(&self) -> Option<bool> {
        match (self.status, self.actual_delivery) {
            (ShipmentStatus::Delivered, Some(actual)) => Some(actual <= self.eta),
            _ => None,
        }
    }
}

/// Body of `POST /api/logistics/shipments`. Omitted fields take defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate, Default)]
pub struct CreateShipmentRequest {
    #[validate(length(max = 255), custom(function = "non_blank"))]
    pub destination: String,
    #[serde(default)]
    #[validate(length(max = 255), custom(function = "non_blank"))]
    pub origin: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 1000))]
    pub items_count: Option<u32>,
    /// Total weight in kg.
    #[serde(default)]
    #[validate(range(min = 0.1, max = 1000.0))]
    pub weight: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 1, max = 30))]
    pub estimated_days: Option<u32>,
    #[serde(default)]
    pub transport_mode: Option<TransportMode>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub items: Vec<ShipmentItem>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl CreateShipmentRequest {
    pub fn origin_or_default(&self) -> &str {
        self.origin
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or(DEFAULT_ORIGIN)
    }

    pub fn items_count_or_default(&self) -> u32 {
        self.items_count.unwrap_or(DEFAULT_ITEMS_COUNT)
    }

    pub fn weight_or_default(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT_KG)
    }

    pub fn estimated_days_or_default(&self) -> u32 {
        self.estimated_days.unwrap_or(DEFAULT_ESTIMATED_DAYS)
    }

    /// Names of required form fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.destination.trim().is_empty() {
            missing.push("destination");
        }
        if self.items_count == Some(0) {
            missing.push("items_count");
        }
        missing
    }
}

/// Body of `PUT /api/logistics/shipments/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams, PartialEq, Default)]
#[into_params(parameter_in = Query)]
pub struct ShipmentQuery {
    /// Status name, matched case-insensitively.
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShipmentTracking {
    pub tracking: TrackingInfo,
    pub shipment: Shipment,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate, Default)]
pub struct LocationPair {
    #[validate(length(max = 255), custom(function = "non_blank"))]
    pub origin: String,
    #[validate(length(max = 255), custom(function = "non_blank"))]
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteSavings {
    pub distance_saved_km: f64,
    pub time_saved_hours: f64,
    pub cost_saved: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteStop {
    pub sequence: usize,
    pub destination: String,
    /// Formatted as `HH:MM on YYYY-MM-DD`.
    pub estimated_arrival: String,
    pub distance_from_previous: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteOptimization {
    pub optimized_route: Vec<String>,
    pub total_destinations: usize,
    pub total_distance_km: f64,
    pub estimated_time_hours: f64,
    pub estimated_cost: f64,
    pub savings: RouteSavings,
    pub route_details: Vec<RouteStop>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProviderQuote {
    pub provider: String,
    pub mode: TransportMode,
    pub estimated_time_hours: f64,
    pub estimated_cost: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProviderComparison {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub providers: Vec<ProviderQuote>,
    pub cheapest: Option<String>,
    pub fastest: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct WeatherReport {
    pub location: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub temperature_c: f64,
    /// Short condition such as `Clear`, `Clouds`, `Rain` or `Thunderstorm`.
    pub condition: String,
    pub description: String,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// `builtin`, `http` or `cache`.
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, PartialEq, Default)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, PartialEq, Validate)]
#[into_params(parameter_in = Query)]
pub struct RouteWeatherQuery {
    #[validate(custom(function = "non_blank"))]
    pub origin: String,
    #[validate(custom(function = "non_blank"))]
    pub destination: String,
    /// Sample points along the route, 2 to 10. Defaults to 5.
    #[serde(default)]
    #[validate(range(min = 2, max = 10))]
    pub samples: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteWeatherSample {
    pub index: usize,
    pub lat: f64,
    pub lon: f64,
    pub weather: WeatherReport,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteWeather {
    pub origin: String,
    pub destination: String,
    pub samples: Vec<RouteWeatherSample>,
    pub risk_level: RiskLevel,
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ModeScore {
    pub mode: TransportMode,
    pub duration_hours: f64,
    pub cost: f64,
    /// Higher is better, 0 to 100.
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, PartialEq, Default)]
#[into_params(parameter_in = Query)]
pub struct PreciseAnalysisQuery {
    /// road, rail, air or sea. Defaults to road.
    pub transport_mode: Option<String>,
    /// Cargo weight in kg. Defaults to 10.
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PreciseAnalysis {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub transport_mode: TransportMode,
    pub weight_kg: f64,
    pub duration_hours: f64,
    pub cost: f64,
    pub recommended_mode: TransportMode,
    pub mode_scores: Vec<ModeScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteWeatherAnalysis {
    pub origin: String,
    pub destination: String,
    pub origin_weather: WeatherReport,
    pub destination_weather: WeatherReport,
    pub risk_level: RiskLevel,
    pub expected_delay_hours: f64,
    pub advisories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precise_distance: Option<PreciseAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShipmentWeatherAnalysis {
    pub shipment_id: String,
    pub analysis: RouteWeatherAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, PartialEq, Validate)]
#[into_params(parameter_in = Query)]
pub struct RouteNewsQuery {
    #[validate(custom(function = "non_blank"))]
    pub origin: String,
    #[validate(custom(function = "non_blank"))]
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub severity: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RouteNews {
    pub origin: String,
    pub destination: String,
    pub items: Vec<NewsItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct TrendWindow {
    pub shipments: usize,
    pub on_time_rate: f64,
    pub avg_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct PerformanceTrends {
    pub last_30_days: TrendWindow,
}

/// Payload of `GET /api/logistics/analytics`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct LogisticsAnalytics {
    pub total_shipments: usize,
    pub status_breakdown: BTreeMap<String, usize>,
    pub on_time_delivery_rate: f64,
    pub average_delivery_time_days: f64,
    pub total_shipping_cost: f64,
    pub average_cost_per_shipment: f64,
    pub performance_trends: PerformanceTrends,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names_match_wire_format() {
        assert_eq!(serde_json::to_value(ShipmentStatus::InTransit).unwrap(), "In Transit");
        assert_eq!(
            "out for delivery".parse::<ShipmentStatus>().unwrap(),
            ShipmentStatus::OutForDelivery
        );
        let err = "Lost".parse::<ShipmentStatus>().unwrap_err();
        assert!(err.contains("Processing, In Transit"));
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreateShipmentRequest =
            serde_json::from_str(r#"{"destination": "Mumbai"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.origin_or_default(), DEFAULT_ORIGIN);
        assert_eq!(request.items_count_or_default(), 1);
        assert_eq!(request.weight_or_default(), 10.0);
        assert_eq!(request.estimated_days_or_default(), 4);
        assert!(request.missing_fields().is_empty());
    }

    #[test]
    fn test_create_request_rejections() {
        let empty: CreateShipmentRequest = serde_json::from_str(r#"{"destination": ""}"#).unwrap();
        assert!(empty.validate().is_err());
        assert_eq!(empty.missing_fields(), vec!["destination"]);

        let negative = serde_json::from_str::<CreateShipmentRequest>(
            r#"{"destination": "", "items_count": -1}"#,
        );
        assert!(negative.is_err());

        let mode = serde_json::from_str::<CreateShipmentRequest>(
            r#"{"destination": "Delhi", "transport_mode": "teleport"}"#,
        );
        assert!(mode.is_err());

        let heavy: CreateShipmentRequest =
            serde_json::from_str(r#"{"destination": "Delhi", "weight": 5000}"#).unwrap();
        assert!(heavy.validate().is_err());
    }

    #[test]
    fn test_on_time_only_for_delivered() {
        let raw = serde_json::json!({
            "id": "SHP-A1B2C3D4",
            "origin": DEFAULT_ORIGIN,
            "destination": "Mumbai",
            "status": "Delivered",
            "items_count": 25,
            "total_weight": 45.5,
            "cost": 4250.0,
            "created_date": "2025-09-08",
            "shipped_date": "2025-09-09",
            "eta": "2025-09-12",
            "actual_delivery": "2025-09-11",
            "tracking_info": {"last_update": "2025-09-11T18:30:00", "location": "Mumbai"}
        });
        let mut shipment: Shipment = serde_json::from_value(raw).unwrap();
        assert_eq!(shipment.transport_mode, TransportMode::Road);
        assert_eq!(shipment.delivered_on_time(), Some(true));
        shipment.status = ShipmentStatus::InTransit;
        assert_eq!(shipment.delivered_on_time(), None);
    }
}
