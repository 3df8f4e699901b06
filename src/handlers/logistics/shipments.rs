use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::logistics::{
    CreateShipmentRequest, LogisticsAnalytics, Shipment, ShipmentQuery, ShipmentTracking,
    StatusUpdateRequest,
};
use compute::logistics::{
    analytics, apply_status_update, create_shipment as build_shipment, filter_by_status,
};
use model::entities::shipment;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use tracing::{debug, info, instrument, trace};

use super::load_shipment;
use crate::schemas::{compute_error, database_error, ApiResponse, AppState, HandlerError};

async fn load_all(state: &AppState) -> Result<Vec<Shipment>, HandlerError> {
    let models = shipment::Entity::find()
        .order_by_desc(shipment::Column::CreatedDate)
        .order_by_asc(shipment::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| database_error("Failed to load shipments", e))?;
    Ok(models.into_iter().map(Shipment::from).collect())
}

/// List shipments
#[utoipa::path(
    get,
    path = "/api/logistics/shipments",
    tag = "logistics",
    params(ShipmentQuery),
    responses(
        (status = 200, description = "Shipments, newest first", body = ApiResponse<Vec<Shipment>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipments(
    State(state): State<AppState>,
    Query(query): Query<ShipmentQuery>,
) -> Result<Json<ApiResponse<Vec<Shipment>>>, HandlerError> {
    trace!("Entering get_shipments function");
    let shipments = filter_by_status(load_all(&state).await?, query.status.as_deref());
    debug!("Returning {} shipments", shipments.len());
    Ok(ApiResponse::ok(shipments, "Shipments retrieved successfully"))
}

/// Create a shipment
#[utoipa::path(
    post,
    path = "/api/logistics/shipments",
    tag = "logistics",
    request_body = CreateShipmentRequest,
    responses(
        (status = 201, description = "Shipment created", body = ApiResponse<Shipment>),
        (status = 400, description = "Invalid shipment", body = ErrorResponse),
        (status = 422, description = "Malformed shipment", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(destination = %request.destination))]
pub async fn create_shipment(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateShipmentRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<Shipment>>), HandlerError> {
    trace!("Entering create_shipment function");
    let shipment = build_shipment(&request, state.now()).map_err(compute_error)?;
    shipment::ActiveModel::from(&shipment)
        .insert(&state.db)
        .await
        .map_err(|e| database_error("Failed to create shipment", e))?;

    info!(
        "Created shipment {} from {} to {} costing {}",
        shipment.id, shipment.origin, shipment.destination, shipment.cost
    );
    Ok((StatusCode::CREATED, ApiResponse::ok(shipment, "Shipment created successfully")))
}

/// Get a shipment by ID
#[utoipa::path(
    get,
    path = "/api/logistics/shipments/{shipment_id}",
    tag = "logistics",
    params(
        ("shipment_id" = String, Path, description = "Shipment ID, e.g. SHP-A1B2C3D4"),
    ),
    responses(
        (status = 200, description = "Shipment retrieved", body = ApiResponse<Shipment>),
        (status = 404, description = "Shipment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipment(
    Path(shipment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Shipment>>, HandlerError> {
    let shipment = load_shipment(&state, &shipment_id).await?;
    Ok(ApiResponse::ok(shipment, "Shipment retrieved successfully"))
}

/// Move a shipment to a new status
#[utoipa::path(
    put,
    path = "/api/logistics/shipments/{shipment_id}/status",
    tag = "logistics",
    params(
        ("shipment_id" = String, Path, description = "Shipment ID"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Shipment>),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Shipment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, update), fields(status = %update.status))]
pub async fn update_shipment_status(
    Path(shipment_id): Path<String>,
    State(state): State<AppState>,
    Json(update): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Shipment>>, HandlerError> {
    trace!("Entering update_shipment_status function");
    let mut shipment = load_shipment(&state, &shipment_id).await?;
    apply_status_update(&mut shipment, &update, state.now()).map_err(compute_error)?;

    shipment::ActiveModel::from(&shipment)
        .update(&state.db)
        .await
        .map_err(|e| database_error("Failed to update shipment", e))?;
    info!("Shipment {} is now {}", shipment.id, shipment.status);
    Ok(ApiResponse::ok(shipment, "Shipment status updated successfully"))
}

/// Tracking details of a shipment
#[utoipa::path(
    get,
    path = "/api/logistics/shipments/{shipment_id}/tracking",
    tag = "logistics",
    params(
        ("shipment_id" = String, Path, description = "Shipment ID"),
    ),
    responses(
        (
            status = 200,
            description = "Tracking info and shipment",
            body = ApiResponse<ShipmentTracking>
        ),
        (status = 404, description = "Shipment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipment_tracking(
    Path(shipment_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShipmentTracking>>, HandlerError> {
    let shipment = load_shipment(&state, &shipment_id).await?;
    let tracking = ShipmentTracking {
        tracking: shipment.tracking_info.clone(),
        shipment,
    };
    Ok(ApiResponse::ok(tracking, "Tracking information retrieved successfully"))
}

/// Delivery performance across all shipments
#[utoipa::path(
    get,
    path = "/api/logistics/analytics",
    tag = "logistics",
    responses(
        (status = 200, description = "Logistics analytics", body = ApiResponse<LogisticsAnalytics>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_logistics_analytics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LogisticsAnalytics>>, HandlerError> {
    let shipments = load_all(&state).await?;
    Ok(ApiResponse::ok(
        analytics(&shipments, state.today()),
        "Logistics analytics retrieved successfully",
    ))
}
