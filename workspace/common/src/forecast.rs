use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::catalog::{non_blank, validate_business_scale, validate_business_type};
use crate::lenient::{or_default, vec_skip_invalid};

/// Body of `POST /api/demand/forecast`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub business_name: Option<String>,
    #[validate(custom(function = "validate_business_type"))]
    pub business_type: String,
    #[validate(custom(function = "validate_business_scale"))]
    pub business_scale: String,
    /// Indian state the business operates in.
    #[validate(length(max = 100), custom(function = "non_blank"))]
    pub location: String,
    /// Current monthly sales in INR.
    #[validate(range(exclusive_min = 1000.0))]
    pub current_sales: f64,
    /// Forecast horizon in months, counted from today.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub forecast_period: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct ProductDemand {
    pub product: String,
    pub demand_percentage: f64,
}

/// One festival occurrence inside the forecast window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct FestivalPoint {
    /// Display label, e.g. "Diwali (Nov 2025)".
    pub festival: String,
    pub demand_increase: f64,
    #[serde(deserialize_with = "or_default")]
    pub date: Option<NaiveDate>,
    pub month: String,
    #[serde(deserialize_with = "or_default")]
    pub year: Option<i32>,
}

/// One season interval overlapping the forecast window. `end` is inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct SeasonPoint {
    pub season: String,
    #[serde(deserialize_with = "or_default")]
    pub start: Option<NaiveDate>,
    #[serde(deserialize_with = "or_default")]
    pub end: Option<NaiveDate>,
    pub demand_surge: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct TopItems {
    pub this_year: Vec<String>,
    pub last_year: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct FestivalDemands {
    #[serde(deserialize_with = "vec_skip_invalid")]
    pub chart: Vec<FestivalPoint>,
    #[serde(deserialize_with = "or_default")]
    pub top_items: BTreeMap<String, TopItems>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct SeasonalDemands {
    #[serde(deserialize_with = "vec_skip_invalid")]
    pub chart: Vec<SeasonPoint>,
    #[serde(deserialize_with = "or_default")]
    pub top_items: BTreeMap<String, TopItems>,
}

/// A demand forecast as produced by the backend.
///
/// The window is `[forecast_start, forecast_end)`. Every nested field is
/// parsed leniently: anything malformed becomes empty instead of rejecting
/// the whole forecast.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(default)]
pub struct Forecast {
    #[serde(deserialize_with = "or_default")]
    pub forecast_start: Option<NaiveDate>,
    #[serde(deserialize_with = "or_default")]
    pub forecast_end: Option<NaiveDate>,
    #[serde(deserialize_with = "or_default")]
    pub confidence_score: f64,
    #[serde(deserialize_with = "vec_skip_invalid")]
    pub product_demands: Vec<ProductDemand>,
    #[serde(deserialize_with = "or_default")]
    pub festival_demands: FestivalDemands,
    #[serde(deserialize_with = "or_default")]
    pub seasonal_demands: SeasonalDemands,
    #[serde(deserialize_with = "vec_skip_invalid")]
    pub suggestions: Vec<String>,
}

impl Forecast {
    /// Festival with the highest demand increase, first one wins on ties.
    pub fn peak_festival(&self) -> Option<&FestivalPoint> {
        self.festival_demands
            .chart
            .iter()
            .fold(None, |best: Option<&FestivalPoint>, point| match best {
                Some(current) if current.demand_increase >= point.demand_increase => Some(current),
                _ => Some(point),
            })
    }

    /// Season with the highest surge, first one wins on ties.
    pub fn peak_season(&self) -> Option<&SeasonPoint> {
        self.seasonal_demands
            .chart
            .iter()
            .fold(None, |best: Option<&SeasonPoint>, point| match best {
                Some(current) if current.demand_surge >= point.demand_surge => Some(current),
                _ => Some(point),
            })
    }
}

/// A stored forecast as returned by `POST /forecast` and `GET /forecast/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastRecord {
    pub id: i32,
    pub created_at: NaiveDateTime,
    pub request: ForecastRequest,
    pub forecast: Forecast,
}

/// Row of `GET /api/demand/forecast-history`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastHistoryEntry {
    pub id: i32,
    pub business_name: Option<String>,
    pub business_type: String,
    pub business_scale: String,
    pub location: String,
    pub forecast_period: u32,
    pub forecast_start: NaiveDate,
    pub forecast_end: NaiveDate,
    pub created_at: NaiveDateTime,
    pub festival_count: usize,
    pub peak_festival: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ForecastHistoryQuery {
    /// Only forecasts for this business type.
    pub business_type: Option<String>,
    /// 1 to 100, defaults to 10.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn request() -> ForecastRequest {
        ForecastRequest {
            business_name: Some("Test Electronics".to_string()),
            business_type: "Electronics Store".to_string(),
            business_scale: "Small".to_string(),
            location: "Karnataka".to_string(),
            current_sales: 50000.0,
            forecast_period: Some(12),
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_unknown_business_type_fails_validation() {
        let mut req = request();
        req.business_type = "Invalid Store Type".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("business_type"));
    }

    #[test]
    fn test_blank_location_fails_validation() {
        let mut req = request();
        req.location = "   ".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("location"));
    }

    #[test]
    fn test_sales_must_exceed_one_thousand() {
        let mut req = request();
        req.current_sales = 1000.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_period_bounds() {
        let mut req = request();
        req.forecast_period = Some(0);
        assert!(req.validate().is_err());
        // the upper bound comes from the server configuration
        req.forecast_period = Some(48);
        assert!(req.validate().is_ok());
        req.forecast_period = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_forecast_parses_backend_payload() {
        let raw = serde_json::json!({
            "forecast_start": "2025-09-14",
            "forecast_end": "2026-09-14",
            "confidence_score": 0.75,
            "product_demands": [{"product": "Rice", "demand_percentage": 20.0}],
            "festival_demands": {
                "chart": [{"festival": "Diwali (Nov 2025)", "demand_increase": 58,
                           "date": "2025-11-01", "month": "Nov", "year": 2025}],
                "top_items": {
                    "Diwali (Nov 2025)": {"this_year": ["Diwali Item 1"], "last_year": []}
                }
            },
            "seasonal_demands": {"chart": [], "top_items": {}},
            "suggestions": ["Stock up"]
        });
        let forecast: Forecast = serde_json::from_value(raw).unwrap();
        assert_eq!(forecast.forecast_start, NaiveDate::from_ymd_opt(2025, 9, 14));
        assert_eq!(forecast.festival_demands.chart.len(), 1);
        assert_eq!(forecast.festival_demands.chart[0].demand_increase, 58.0);
        assert_eq!(forecast.festival_demands.top_items.len(), 1);
        assert_eq!(forecast.suggestions, vec!["Stock up".to_string()]);
    }

    #[test]
    fn test_malformed_nested_fields_become_empty() {
        let raw = serde_json::json!({
            "forecast_start": "not a date",
            "confidence_score": "high",
            "product_demands": {"oops": true},
            "festival_demands": {
                "chart": [
                    {"festival": "Holi (Mar 2026)", "demand_increase": 27, "date": "2026-03-14"},
                    "garbage",
                    {"festival": "Broken", "demand_increase": "lots"}
                ],
                "top_items": []
            },
            "seasonal_demands": null,
            "suggestions": [1, "Keep stock", null]
        });
        let forecast: Forecast = serde_json::from_value(raw).unwrap();
        assert_eq!(forecast.forecast_start, None);
        assert_eq!(forecast.confidence_score, 0.0);
        assert!(forecast.product_demands.is_empty());
        assert_eq!(forecast.festival_demands.chart.len(), 1);
        assert!(forecast.festival_demands.top_items.is_empty());
        assert!(forecast.seasonal_demands.chart.is_empty());
        assert_eq!(forecast.suggestions, vec!["Keep stock".to_string()]);
    }

    #[test]
    fn test_empty_object_is_default_forecast() {
        let forecast: Forecast = serde_json::from_str("{}").unwrap();
        assert_eq!(forecast, Forecast::default());
        assert!(forecast.peak_festival().is_none());
    }

    #[test]
    fn test_peak_festival_picks_highest() {
        let mut forecast = Forecast::default();
        forecast.festival_demands.chart = vec![
            FestivalPoint { festival: "Holi".into(), demand_increase: 25.0, ..Default::default() },
            FestivalPoint {
                festival: "Diwali".into(),
                demand_increase: 62.0,
                ..Default::default()
            },
            FestivalPoint { festival: "Onam".into(), demand_increase: 62.0, ..Default::default() },
        ];
        assert_eq!(forecast.peak_festival().unwrap().festival, "Diwali");
    }
}
