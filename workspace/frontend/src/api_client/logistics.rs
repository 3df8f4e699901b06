use common::logistics::{
    CreateShipmentRequest, LocationPair, LogisticsAnalytics, PreciseAnalysis, ProviderComparison,
    RouteNews, RouteOptimization, RouteWeather, RouteWeatherAnalysis, Shipment, ShipmentTracking,
    ShipmentWeatherAnalysis, StatusUpdateRequest, TransportMode, WeatherReport,
};

use crate::api_client;

/// Get shipments, optionally only those in one status
pub async fn get_shipments(status: Option<String>) -> Result<Vec<Shipment>, String> {
    let params = api_client::optional_params(&[("status", status)]);
    let result: Result<Vec<Shipment>, String> =
        api_client::get_with_query("/logistics/shipments", &params).await;
    match &result {
        Ok(shipments) => log::info!("Fetched {} shipments", shipments.len()),
        Err(e) => log::error!("Failed to fetch shipments: {}", e),
    }
    result
}

pub async fn create_shipment(request: &CreateShipmentRequest) -> Result<Shipment, String> {
    log::debug!("Creating shipment to {}", request.destination);
    let result: Result<Shipment, String> = api_client::post("/logistics/shipments", request).await;
    match &result {
        Ok(shipment) => log::info!("Created shipment {}", shipment.id),
        Err(e) => log::error!("Failed to create shipment to '{}': {}", request.destination, e),
    }
    result
}

pub async fn update_shipment_status(
    shipment_id: &str,
    update: &StatusUpdateRequest,
) -> Result<Shipment, String> {
    api_client::put(&format!("/logistics/shipments/{}/status", shipment_id), update).await
}

pub async fn get_tracking(shipment_id: &str) -> Result<ShipmentTracking, String> {
    api_client::get(&format!("/logistics/shipments/{}/tracking", shipment_id)).await
}

pub async fn get_analytics() -> Result<LogisticsAnalytics, String> {
    api_client::get("/logistics/analytics").await
}

pub async fn compare_providers(route: &LocationPair) -> Result<ProviderComparison, String> {
    api_client::post("/logistics/shipments/providers", route).await
}

pub async fn optimize_routes(destinations: &[String]) -> Result<RouteOptimization, String> {
    log::debug!("Optimizing route over {} destinations", destinations.len());
    api_client::post("/logistics/routes/optimize", &destinations).await
}

pub async fn precise_analysis(
    route: &LocationPair,
    mode: TransportMode,
    weight_kg: f64,
) -> Result<PreciseAnalysis, String> {
    let params = [("transport_mode", mode.as_str().to_string()), ("weight", weight_kg.to_string())];
    api_client::post_with_query("/logistics/routes/precise-analysis", &params, route).await
}

pub async fn route_weather_analysis(route: &LocationPair) -> Result<RouteWeatherAnalysis, String> {
    api_client::post("/logistics/routes/weather-analysis", route).await
}

pub async fn shipment_weather_analysis(
    shipment_id: &str,
) -> Result<ShipmentWeatherAnalysis, String> {
    api_client::get(&format!("/logistics/shipments/{}/weather-analysis", shipment_id)).await
}

pub async fn get_weather(city: &str) -> Result<WeatherReport, String> {
    api_client::get_with_query("/logistics/weather", &[("city", city.to_string())]).await
}

pub async fn get_weather_at(lat: f64, lng: f64) -> Result<WeatherReport, String> {
    let params = [("lat", lat.to_string()), ("lng", lng.to_string())];
    api_client::get_with_query("/logistics/weather", &params).await
}

pub async fn get_route_weather(route: &LocationPair, samples: u32) -> Result<RouteWeather, String> {
    let params = [
        ("origin", route.origin.clone()),
        ("destination", route.destination.clone()),
        ("samples", samples.to_string()),
    ];
    api_client::get_with_query("/logistics/weather/route", &params).await
}

pub async fn get_route_news(route: &LocationPair) -> Result<RouteNews, String> {
    let params = [("origin", route.origin.clone()), ("destination", route.destination.clone())];
    api_client::get_with_query("/logistics/news/route", &params).await
}
