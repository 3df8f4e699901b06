use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::logistics::{
    LocationPair, RouteNews, RouteNewsQuery, RouteWeather, RouteWeatherAnalysis, RouteWeatherQuery,
    ShipmentWeatherAnalysis, WeatherQuery, WeatherReport,
};
use compute::default_provider_set;
use compute::logistics::providers::precise_analysis;
use compute::news::route_news;
use compute::weather::{route_analysis, route_weather, DEFAULT_ROUTE_SAMPLES};
use tracing::{debug, instrument, trace, warn};

use super::load_shipment;
use crate::schemas::{
    compute_error, error_response, ApiResponse, AppState, CachedData, HandlerError,
};

enum Lookup {
    Place(String),
    Coords(f64, f64),
}

impl Lookup {
    fn cache_key(&self) -> String {
        match self {
            Lookup::Place(city) => format!("weather:{}", city.to_lowercase()),
            Lookup::Coords(lat, lng) => format!("weather:{:.3},{:.3}", lat, lng),
        }
    }
}

/// Current weather for a city or a coordinate pair
#[utoipa::path(
    get,
    path = "/api/logistics/weather",
    tag = "logistics",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Current weather", body = ApiResponse<WeatherReport>),
        (status = 400, description = "Neither city nor coordinates given", body = ErrorResponse),
        (status = 502, description = "Weather provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<ApiResponse<WeatherReport>>, HandlerError> {
    trace!("Entering get_weather function");
    let lookup = match (query.city.as_deref().map(str::trim), query.lat, query.lng) {
        (Some(city), _, _) if !city.is_empty() => Lookup::Place(city.to_string()),
        (_, Some(lat), Some(lng)) => Lookup::Coords(lat, lng),
        _ => {
            warn!("Weather requested without city or coordinates");
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Provide either city or lat and lng",
            ));
        }
    };
    let cache_key = lookup.cache_key();

    if let Some(CachedData::Weather(report)) = state.cache.get(&cache_key).await {
        debug!("Weather for {} served from cache", cache_key);
        return Ok(ApiResponse::ok(report, "Weather retrieved successfully"));
    }

    let report = match &lookup {
        Lookup::Place(city) => state.weather.for_place(city).await,
        Lookup::Coords(lat, lng) => state.weather.for_coords(*lat, *lng).await,
    }
    .map_err(compute_error)?;

    state.cache.insert(cache_key, CachedData::Weather(report.clone())).await;
    Ok(ApiResponse::ok(report, "Weather retrieved successfully"))
}

/// Weather sampled at evenly spaced points along a route
#[utoipa::path(
    get,
    path = "/api/logistics/weather/route",
    tag = "logistics",
    params(RouteWeatherQuery),
    responses(
        (status = 200, description = "Weather along the route", body = ApiResponse<RouteWeather>),
        (
            status = 400,
            description = "Unknown city or sample count out of range",
            body = ErrorResponse
        ),
        (status = 502, description = "Weather provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_route_weather(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<RouteWeatherQuery>>,
) -> Result<Json<ApiResponse<RouteWeather>>, HandlerError> {
    let samples = query.samples.map(|s| s as usize).unwrap_or(DEFAULT_ROUTE_SAMPLES);
    let weather = route_weather(state.weather.as_ref(), &query.origin, &query.destination, samples)
        .await
        .map_err(compute_error)?;
    Ok(ApiResponse::ok(weather, "Route weather retrieved successfully"))
}

/// Weather risk and expected delay between two places
#[utoipa::path(
    post,
    path = "/api/logistics/routes/weather-analysis",
    tag = "logistics",
    request_body = LocationPair,
    responses(
        (
            status = 200,
            description = "Route weather analysis",
            body = ApiResponse<RouteWeatherAnalysis>
        ),
        (status = 400, description = "Missing origin or destination", body = ErrorResponse),
        (status = 502, description = "Weather provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn route_weather_analysis(
    State(state): State<AppState>,
    Valid(Json(route)): Valid<Json<LocationPair>>,
) -> Result<Json<ApiResponse<RouteWeatherAnalysis>>, HandlerError> {
    let analysis = route_analysis(state.weather.as_ref(), &route.origin, &route.destination)
        .await
        .map_err(compute_error)?;
    Ok(ApiResponse::ok(analysis, "Route weather analysis completed successfully"))
}

/// Route weather and mode analysis for a stored shipment
#[utoipa::path(
    get,
    path = "/api/logistics/shipments/{shipment_id}/weather-analysis",
    tag = "logistics",
    params(
        ("shipment_id" = String, Path, description = "Shipment ID"),
    ),
    responses(
        (
            status = 200,
            description = "Shipment weather analysis",
            body = ApiResponse<ShipmentWeatherAnalysis>
        ),
        (status = 404, description = "Shipment not found", body = ErrorResponse),
        (status = 502, description = "Weather provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn shipment_weather_analysis(
    Path(shipment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShipmentWeatherAnalysis>>, HandlerError> {
    let shipment = load_shipment(&state, &shipment_id).await?;
    let weather = state.weather.as_ref();
    let mut analysis = route_analysis(weather, &shipment.origin, &shipment.destination)
        .await
        .map_err(compute_error)?;

    analysis.precise_distance = match precise_analysis(
        &default_provider_set(),
        &shipment.origin,
        &shipment.destination,
        shipment.transport_mode,
        shipment.total_weight,
    ) {
        Ok(precise) => Some(precise),
        Err(e) => {
            warn!("No mode analysis for shipment {}: {}", shipment.id, e);
            None
        }
    };

    Ok(ApiResponse::ok(
        ShipmentWeatherAnalysis {
            shipment_id: shipment.id,
            analysis,
        },
        "Shipment weather analysis completed successfully",
    ))
}

/// Travel advisories for a route
#[utoipa::path(
    get,
    path = "/api/logistics/news/route",
    tag = "logistics",
    params(RouteNewsQuery),
    responses(
        (
            status = 200,
            description = "Route advisories, most severe first",
            body = ApiResponse<RouteNews>
        ),
        (status = 400, description = "Missing origin or destination", body = ErrorResponse),
        (status = 502, description = "Weather provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_route_news(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<RouteNewsQuery>>,
) -> Result<Json<ApiResponse<RouteNews>>, HandlerError> {
    let analysis = route_analysis(state.weather.as_ref(), &query.origin, &query.destination)
        .await
        .map_err(compute_error)?;
    let news = route_news(&query.origin, &query.destination, analysis.risk_level, state.today());
    Ok(ApiResponse::ok(news, "Route news retrieved successfully"))
}
