use common::forecast::{ForecastHistoryEntry, ForecastRecord, ForecastRequest};
use common::BusinessTypesResponse;

use crate::api_client;

/// Generate and store a forecast for the given profile request
pub async fn create_forecast(request: &ForecastRequest) -> Result<ForecastRecord, String> {
    log::debug!(
        "Requesting {}-month forecast for {}",
        request.forecast_period.unwrap_or_default(),
        request.business_type
    );
    let result: Result<ForecastRecord, String> =
        api_client::post("/demand/forecast", request).await;
    match &result {
        Ok(record) => log::info!("Forecast {} generated", record.id),
        Err(e) => log::error!("Failed to generate forecast: {}", e),
    }
    result
}

pub async fn get_forecast(forecast_id: i32) -> Result<ForecastRecord, String> {
    log::trace!("Fetching forecast with ID: {}", forecast_id);
    api_client::get(&format!("/demand/forecast/{}", forecast_id)).await
}

/// Newest first, optionally only for one business type
pub async fn get_forecast_history(
    business_type: Option<String>,
    limit: u32,
) -> Result<Vec<ForecastHistoryEntry>, String> {
    let mut params = api_client::optional_params(&[("business_type", business_type)]);
    params.push(("limit", limit.to_string()));
    let result: Result<Vec<ForecastHistoryEntry>, String> =
        api_client::get_with_query("/demand/forecast-history", &params).await;
    if let Ok(entries) = &result {
        log::info!("Fetched {} forecast history entries", entries.len());
    }
    result
}

pub async fn get_business_types() -> Result<BusinessTypesResponse, String> {
    api_client::get("/demand/business-types").await
}
