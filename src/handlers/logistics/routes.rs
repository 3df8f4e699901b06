use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::logistics::{
    LocationPair, PreciseAnalysis, PreciseAnalysisQuery, ProviderComparison, RouteOptimization,
    TransportMode,
    DEFAULT_WEIGHT_KG,
};
use compute::logistics::providers::{
    compare_providers as quote_all, precise_analysis as analyse_modes,
};
use compute::{default_provider_set, default_route_optimizer};
use tracing::{debug, instrument, trace};

use crate::schemas::{compute_error, error_response, ApiResponse, AppState, HandlerError};

/// Order delivery stops and estimate the trip
#[utoipa::path(
    post,
    path = "/api/logistics/routes/optimize",
    tag = "logistics",
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Optimized route", body = ApiResponse<RouteOptimization>),
        (status = 400, description = "Fewer than two destinations", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn optimize_routes(
    State(state): State<AppState>,
    Json(destinations): Json<Vec<String>>,
) -> Result<Json<ApiResponse<RouteOptimization>>, HandlerError> {
    trace!("Entering optimize_routes function");
    let optimization = default_route_optimizer(state.today)
        .optimize(&destinations)
        .map_err(compute_error)?;
    debug!(
        "Route over {} stops is {} km",
        optimization.total_destinations, optimization.total_distance_km
    );
    Ok(ApiResponse::ok(optimization, "Route optimized successfully"))
}

/// Quotes from every carrier for a route
#[utoipa::path(
    post,
    path = "/api/logistics/shipments/providers",
    tag = "logistics",
    request_body = LocationPair,
    responses(
        (status = 200, description = "Carrier quotes", body = ApiResponse<ProviderComparison>),
        (status = 400, description = "Missing origin or destination", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn compare_providers(
    Valid(Json(route)): Valid<Json<LocationPair>>,
) -> Json<ApiResponse<ProviderComparison>> {
    let comparison = quote_all(&default_provider_set(), &route.origin, &route.destination);
    ApiResponse::ok(comparison, "Provider comparison retrieved successfully")
}

/// Duration and cost for one transport mode, scored against the others
#[utoipa::path(
    post,
    path = "/api/logistics/routes/precise-analysis",
    tag = "logistics",
    params(PreciseAnalysisQuery),
    request_body = LocationPair,
    responses(
        (status = 200, description = "Mode analysis", body = ApiResponse<PreciseAnalysis>),
        (status = 400, description = "Unknown mode or invalid weight", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn precise_analysis(
    Query(query): Query<PreciseAnalysisQuery>,
    Valid(Json(route)): Valid<Json<LocationPair>>,
) -> Result<Json<ApiResponse<PreciseAnalysis>>, HandlerError> {
    let mode = match query.transport_mode.as_deref().filter(|m| !m.is_empty()) {
        Some(mode) => mode
            .parse::<TransportMode>()
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e))?,
        None => TransportMode::default(),
    };
    let weight = query.weight.unwrap_or(DEFAULT_WEIGHT_KG);
    let providers = default_provider_set();
    let analysis = analyse_modes(&providers, &route.origin, &route.destination, mode, weight)
        .map_err(compute_error)?;
    Ok(ApiResponse::ok(analysis, "Precise analysis completed successfully"))
}
