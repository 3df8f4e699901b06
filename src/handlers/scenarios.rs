use axum::{
    extract::{Path, Query},
    response::Json,
};
use axum_valid::Valid;
use common::scenario::{
    CompareRequest, ScenarioComparison, ScenarioInsights, ScenarioRequest, ScenarioResult,
    ScenarioTemplate,
};
use compute::scenario::{analyze, compare, insights, templates};
use serde::Deserialize;
use tracing::{debug, info, instrument, trace};
use utoipa::IntoParams;

use crate::schemas::{compute_error, ApiResponse, HandlerError};

pub const DEFAULT_INSIGHTS_LOCATION: &str = "Karnataka";

/// Query of `GET /api/scenarios/insights/{business_type}`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InsightsQuery {
    /// State or region. Defaults to India.
    pub location: Option<String>,
}

/// Project sales under a what-if scenario
#[utoipa::path(
    post,
    path = "/api/scenarios/analyze",
    tag = "scenarios",
    request_body = ScenarioRequest,
    responses(
        (status = 200, description = "Scenario result", body = ApiResponse<ScenarioResult>),
        (status = 400, description = "Parameter out of range", body = ErrorResponse),
        (status = 422, description = "Malformed scenario", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn analyze_scenario(
    Valid(Json(request)): Valid<Json<ScenarioRequest>>,
) -> Json<ApiResponse<ScenarioResult>> {
    trace!("Entering analyze_scenario function");
    let result = analyze(&request);
    info!(
        "Scenario on {} projects {} ({}%)",
        result.baseline, result.projected, result.total_impact
    );
    ApiResponse::ok(result, "Scenario analyzed successfully")
}

/// Predefined scenario templates
#[utoipa::path(
    get,
    path = "/api/scenarios/templates",
    tag = "scenarios",
    responses(
        (
            status = 200,
            description = "Scenario templates",
            body = ApiResponse<Vec<ScenarioTemplate>>
        )
    )
)]
#[instrument]
pub async fn get_templates() -> Json<ApiResponse<Vec<ScenarioTemplate>>> {
    ApiResponse::ok(templates(), "Scenario templates retrieved successfully")
}

/// Compare two to five scenarios
#[utoipa::path(
    post,
    path = "/api/scenarios/compare",
    tag = "scenarios",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Scenario comparison", body = ApiResponse<ScenarioComparison>),
        (
            status = 400,
            description = "Wrong number of scenarios or invalid scenario",
            body = ErrorResponse
        )
    )
)]
#[instrument(skip(request), fields(count = request.scenarios.len()))]
pub async fn compare_scenarios(
    Valid(Json(request)): Valid<Json<CompareRequest>>,
) -> Result<Json<ApiResponse<ScenarioComparison>>, HandlerError> {
    let comparison = compare(&request.scenarios).map_err(compute_error)?;
    debug!("Best scenario is {}", comparison.best_scenario);
    Ok(ApiResponse::ok(comparison, "Scenarios compared successfully"))
}

/// Market insights for a business type
#[utoipa::path(
    get,
    path = "/api/scenarios/insights/{business_type}",
    tag = "scenarios",
    params(
        ("business_type" = String, Path, description = "Business type, e.g. Electronics Store"),
        InsightsQuery,
    ),
    responses(
        (status = 200, description = "Scenario insights", body = ApiResponse<ScenarioInsights>)
    )
)]
#[instrument]
pub async fn get_insights(
    Path(business_type): Path<String>,
    Query(query): Query<InsightsQuery>,
) -> Json<ApiResponse<ScenarioInsights>> {
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_INSIGHTS_LOCATION);
    ApiResponse::ok(insights(&business_type, location), "Scenario insights retrieved successfully")
}
