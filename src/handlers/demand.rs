use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::calendar::{
    FestivalCalendar, FestivalCalendarQuery, SeasonalPatterns, SeasonalPatternsQuery,
};
use common::forecast::{ForecastHistoryEntry, ForecastHistoryQuery, ForecastRecord, ForecastRequest};
use common::BusinessTypesResponse;
use compute::calendar::{festival_calendar, seasonal_patterns, DEFAULT_CALENDAR_YEAR};
use compute::default_forecast_engine;
use model::entities::forecast;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::schemas::{
    compute_error, database_error, error_response, ApiResponse, AppState, CachedData,
    HandlerError,
};

const DEFAULT_HISTORY_LIMIT: u64 = 10;

/// Generate and store a demand forecast
#[utoipa::path(
    post,
    path = "/api/demand/forecast",
    tag = "demand",
    request_body = ForecastRequest,
    responses(
        (status = 201, description = "Forecast generated", body = ApiResponse<ForecastRecord>),
        (status = 400, description = "Invalid business profile or period", body = ErrorResponse),
        (status = 422, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(business_type = %request.business_type))]
pub async fn create_forecast(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<ForecastRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<ForecastRecord>>), HandlerError> {
    trace!("Entering create_forecast function");
    let period = request.forecast_period.unwrap_or(state.config.default_forecast_period);
    if period > state.config.max_forecast_months {
        warn!("Rejected forecast period of {} months", period);
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!(
                "Forecast period must be between 1 and {} months",
                state.config.max_forecast_months
            ),
        ));
    }

    let engine = default_forecast_engine(state.today);
    let forecast = engine.generate(&request, period).map_err(compute_error)?;
    let window = (forecast.forecast_start, forecast.forecast_end);
    let (Some(forecast_start), Some(forecast_end)) = window else {
        error!("Forecast engine returned a forecast without a window");
        return Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "FORECAST_ERROR",
            "Forecast window could not be computed",
        ));
    };
    let payload = serde_json::to_value(&forecast).map_err(|e| {
        error!("Failed to serialize forecast: {}", e);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "FORECAST_ERROR",
            "Forecast could not be stored",
        )
    })?;

    let stored = forecast::ActiveModel {
        business_name: Set(request.business_name.clone()),
        business_type: Set(request.business_type.clone()),
        business_scale: Set(request.business_scale.clone()),
        location: Set(request.location.clone()),
        current_sales: Set(request.current_sales),
        forecast_period: Set(period as i32),
        forecast_start: Set(forecast_start),
        forecast_end: Set(forecast_end),
        payload: Set(payload),
        created_at: Set(state.now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| database_error("Failed to store forecast", e))?;

    info!("Stored forecast {} covering {} to {}", stored.id, forecast_start, forecast_end);
    let record = ForecastRecord {
        id: stored.id,
        created_at: stored.created_at,
        request: ForecastRequest {
            forecast_period: Some(period),
            ..request
        },
        forecast,
    };
    Ok((StatusCode::CREATED, ApiResponse::ok(record, "Forecast generated successfully")))
}

/// Get a stored forecast by ID
#[utoipa::path(
    get,
    path = "/api/demand/forecast/{forecast_id}",
    tag = "demand",
    params(
        ("forecast_id" = i32, Path, description = "Forecast ID"),
    ),
    responses(
        (status = 200, description = "Forecast retrieved", body = ApiResponse<ForecastRecord>),
        (status = 404, description = "Forecast not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Path(forecast_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastRecord>>, HandlerError> {
    trace!("Entering get_forecast function");
    match forecast::Entity::find_by_id(forecast_id).one(&state.db).await {
        Ok(Some(model)) => {
            Ok(ApiResponse::ok(ForecastRecord::from(model), "Forecast retrieved successfully"))
        }
        Ok(None) => {
            warn!("Forecast {} not found", forecast_id);
            Err(error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Forecast {} not found", forecast_id),
            ))
        }
        Err(e) => Err(database_error("Failed to load forecast", e)),
    }
}

/// List previously generated forecasts, newest first
#[utoipa::path(
    get,
    path = "/api/demand/forecast-history",
    tag = "demand",
    params(ForecastHistoryQuery),
    responses(
        (
            status = 200,
            description = "Forecast history",
            body = ApiResponse<Vec<ForecastHistoryEntry>>
        ),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast_history(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ForecastHistoryQuery>>,
) -> Result<Json<ApiResponse<Vec<ForecastHistoryEntry>>>, HandlerError> {
    trace!("Entering get_forecast_history function");
    let mut select = forecast::Entity::find();
    if let Some(business_type) = query.business_type.as_deref().filter(|t| !t.is_empty()) {
        select = select.filter(forecast::Column::BusinessType.eq(business_type));
    }
    let models = select
        .order_by_desc(forecast::Column::CreatedAt)
        .order_by_desc(forecast::Column::Id)
        .limit(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .all(&state.db)
        .await
        .map_err(|e| database_error("Failed to load forecast history", e))?;

    debug!("Loaded {} forecast history entries", models.len());
    let entries = models.iter().map(forecast::Model::history_entry).collect();
    Ok(ApiResponse::ok(entries, "Forecast history retrieved successfully"))
}

/// Business types, scales and locations accepted by the forecast endpoint
#[utoipa::path(
    get,
    path = "/api/demand/business-types",
    tag = "demand",
    responses(
        (
            status = 200,
            description = "Supported business profile values",
            body = ApiResponse<BusinessTypesResponse>
        )
    )
)]
#[instrument]
pub async fn get_business_types() -> Json<ApiResponse<BusinessTypesResponse>> {
    ApiResponse::ok(BusinessTypesResponse::default(), "Business types retrieved successfully")
}

/// Seasonal demand patterns for a business type and location
#[utoipa::path(
    get,
    path = "/api/demand/seasonal-patterns",
    tag = "demand",
    params(SeasonalPatternsQuery),
    responses(
        (status = 200, description = "Seasonal patterns", body = ApiResponse<SeasonalPatterns>),
        (status = 400, description = "Missing query parameters", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_seasonal_patterns(
    Query(query): Query<SeasonalPatternsQuery>,
) -> Json<ApiResponse<SeasonalPatterns>> {
    let patterns = seasonal_patterns(&query.business_type, &query.location);
    ApiResponse::ok(patterns, "Seasonal patterns retrieved successfully")
}

/// Festival calendar of a year
#[utoipa::path(
    get,
    path = "/api/demand/festival-calendar",
    tag = "demand",
    params(FestivalCalendarQuery),
    responses(
        (status = 200, description = "Festival calendar", body = ApiResponse<FestivalCalendar>),
        (status = 400, description = "Year out of range", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_festival_calendar(
    State(state): State<AppState>,
    Query(query): Query<FestivalCalendarQuery>,
) -> Result<Json<ApiResponse<FestivalCalendar>>, HandlerError> {
    let year = query.year.unwrap_or(DEFAULT_CALENDAR_YEAR);
    let cache_key = format!("festival_calendar:{}", year);

    if let Some(CachedData::FestivalCalendar(calendar)) = state.cache.get(&cache_key).await {
        debug!("Festival calendar {} served from cache", year);
        return Ok(ApiResponse::ok(calendar, "Festival calendar retrieved successfully"));
    }

    let calendar = festival_calendar(year).map_err(compute_error)?;
    state
        .cache
        .insert(cache_key, CachedData::FestivalCalendar(calendar.clone()))
        .await;
    Ok(ApiResponse::ok(calendar, "Festival calendar retrieved successfully"))
}
