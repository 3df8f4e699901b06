//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' request/response payloads
//! so the frontend can deserialize API responses without duplicating shapes.

pub mod calendar;
pub mod catalog;
pub mod chart_data;
pub mod cities;
pub mod export;
pub mod forecast;
pub mod inventory;
mod lenient;
pub mod logistics;
pub mod profile;
pub mod reports;
pub mod scenario;

pub use catalog::{BusinessTypesResponse, BUSINESS_SCALES, BUSINESS_TYPES, INDIAN_STATES};
pub use chart_data::{derive_chart_data, ChartData, WeeklyIntensity};
pub use forecast::{
    FestivalDemands, FestivalPoint, Forecast, ForecastHistoryEntry, ForecastRecord,
    ForecastRequest, ProductDemand, SeasonPoint, SeasonalDemands, TopItems,
};
pub use profile::BusinessProfile;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in src/schemas.rs with the
/// same field names. We mirror it here for the frontend to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error body returned by the backend for any non-2xx answer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub success: bool,
}

/// Rounds to one decimal place, the precision used for percentages.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places, the precision used for currency amounts.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(-8.06), -8.1);
        assert_eq!(round2(1950.005), 1950.01);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_api_response_deserializes_backend_shape() {
        let raw = r#"{"data": [1, 2, 3], "message": "ok", "success": true}"#;
        let parsed: ApiResponse<Vec<i32>> = serde_json::from_str(raw).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.data, vec![1, 2, 3]);
    }
}
