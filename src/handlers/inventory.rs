use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::inventory::{
    CreateInventoryItemRequest, InventoryAnalytics, InventoryItem, InventoryQuery,
    UpdateInventoryItemRequest,
};
use compute::inventory::{analytics, low_stock};
use model::entities::inventory_item;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info, instrument, trace, warn};

use crate::schemas::{database_error, error_response, ApiResponse, AppState, HandlerError};

fn to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn not_found(item_id: i32) -> HandlerError {
    warn!("Inventory item {} not found", item_id);
    error_response(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        format!("Inventory item {} not found", item_id),
    )
}

async fn load_items(state: &AppState) -> Result<Vec<InventoryItem>, HandlerError> {
    let models = inventory_item::Entity::find()
        .order_by_asc(inventory_item::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| database_error("Failed to load inventory", e))?;
    Ok(models.into_iter().map(InventoryItem::from).collect())
}

async fn ensure_unique_sku(
    state: &AppState,
    sku: &str,
    except: Option<i32>,
) -> Result<(), HandlerError> {
    let mut select = inventory_item::Entity::find().filter(inventory_item::Column::Sku.eq(sku));
    if let Some(id) = except {
        select = select.filter(inventory_item::Column::Id.ne(id));
    }
    match select.one(&state.db).await {
        Ok(Some(existing)) => {
            warn!("SKU {} already used by item {}", sku, existing.id);
            Err(error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("SKU {} already exists", sku),
            ))
        }
        Ok(None) => Ok(()),
        Err(e) => Err(database_error("Failed to check SKU", e)),
    }
}

/// List inventory items
#[utoipa::path(
    get,
    path = "/api/inventory/",
    tag = "inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Inventory items", body = ApiResponse<Vec<InventoryItem>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<ApiResponse<Vec<InventoryItem>>>, HandlerError> {
    trace!("Entering get_inventory function");
    let items: Vec<InventoryItem> = load_items(&state)
        .await?
        .into_iter()
        .filter(|item| query.matches(item))
        .collect();
    debug!("Returning {} inventory items", items.len());
    Ok(ApiResponse::ok(items, "Inventory retrieved successfully"))
}

/// Create an inventory item
#[utoipa::path(
    post,
    path = "/api/inventory/",
    tag = "inventory",
    request_body = CreateInventoryItemRequest,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<InventoryItem>),
        (status = 400, description = "Invalid item", body = ErrorResponse),
        (status = 422, description = "Malformed item", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn create_inventory_item(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateInventoryItemRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<InventoryItem>>), HandlerError> {
    trace!("Entering create_inventory_item function");
    let sku = request.sku.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    if let Some(sku) = sku.as_deref() {
        ensure_unique_sku(&state, sku, None).await?;
    }

    let now = state.now();
    let model = inventory_item::ActiveModel {
        name: Set(request.name.trim().to_string()),
        category: Set(request.category.trim().to_string()),
        sku: Set(sku),
        current_stock: Set(to_db(request.current_stock)),
        min_stock_level: Set(to_db(request.min_stock_level)),
        max_stock_level: Set(to_db(request.max_stock_level)),
        unit_cost: Set(request.unit_cost),
        selling_price: Set(request.selling_price),
        supplier: Set(request.supplier.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| database_error("Failed to create inventory item", e))?;

    info!("Created inventory item {} ({})", model.id, model.name);
    Ok((StatusCode::CREATED, ApiResponse::ok(model.into(), "Inventory item created successfully")))
}

/// Update an inventory item. Absent fields keep their value.
#[utoipa::path(
    put,
    path = "/api/inventory/{item_id}",
    tag = "inventory",
    params(
        ("item_id" = i32, Path, description = "Inventory item ID"),
    ),
    request_body = UpdateInventoryItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<InventoryItem>),
        (status = 400, description = "Invalid update", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_inventory_item(
    Path(item_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateInventoryItemRequest>>,
) -> Result<Json<ApiResponse<InventoryItem>>, HandlerError> {
    trace!("Entering update_inventory_item function");
    let existing = inventory_item::Entity::find_by_id(item_id)
        .one(&state.db)
        .await
        .map_err(|e| database_error("Failed to load inventory item", e))?
        .ok_or_else(|| not_found(item_id))?;

    let min = request.min_stock_level.map(to_db).unwrap_or(existing.min_stock_level);
    let max = request.max_stock_level.map(to_db).unwrap_or(existing.max_stock_level);
    if min >= max {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "min_stock_level must be below max_stock_level",
        ));
    }

    let sku = request.sku.as_deref().map(str::trim);
    if let Some(sku) = sku.filter(|s| !s.is_empty()) {
        ensure_unique_sku(&state, sku, Some(item_id)).await?;
    }

    let mut model: inventory_item::ActiveModel = existing.into();
    if let Some(name) = request.name {
        model.name = Set(name.trim().to_string());
    }
    if let Some(category) = request.category {
        model.category = Set(category.trim().to_string());
    }
    if let Some(sku) = sku {
        model.sku = Set(Some(sku.to_string()).filter(|s| !s.is_empty()));
    }
    if let Some(stock) = request.current_stock {
        model.current_stock = Set(to_db(stock));
    }
    model.min_stock_level = Set(min);
    model.max_stock_level = Set(max);
    if let Some(unit_cost) = request.unit_cost {
        model.unit_cost = Set(unit_cost);
    }
    if let Some(selling_price) = request.selling_price {
        model.selling_price = Set(selling_price);
    }
    if let Some(supplier) = request.supplier {
        model.supplier = Set(Some(supplier));
    }
    model.updated_at = Set(state.now());

    let updated = model
        .update(&state.db)
        .await
        .map_err(|e| database_error("Failed to update inventory item", e))?;
    let item = InventoryItem::from(updated);
    info!("Updated inventory item {}, status now {}", item.id, item.status.as_str());
    Ok(ApiResponse::ok(item, "Inventory item updated successfully"))
}

/// Delete an inventory item
#[utoipa::path(
    delete,
    path = "/api/inventory/{item_id}",
    tag = "inventory",
    params(
        ("item_id" = i32, Path, description = "Inventory item ID"),
    ),
    responses(
        (status = 200, description = "Item deleted", body = ApiResponse<String>),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_inventory_item(
    Path(item_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, HandlerError> {
    trace!("Entering delete_inventory_item function");
    let result = inventory_item::Entity::delete_by_id(item_id)
        .exec(&state.db)
        .await
        .map_err(|e| database_error("Failed to delete inventory item", e))?;
    if result.rows_affected == 0 {
        return Err(not_found(item_id));
    }
    info!("Deleted inventory item {}", item_id);
    Ok(ApiResponse::ok(
        format!("Inventory item {} deleted", item_id),
        "Inventory item deleted successfully",
    ))
}

/// Items at or below their minimum level
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    tag = "inventory",
    responses(
        (
            status = 200,
            description = "Low and critical items",
            body = ApiResponse<Vec<InventoryItem>>
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_low_stock(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InventoryItem>>>, HandlerError> {
    let items = load_items(&state).await?;
    let alerts = low_stock(&items);
    debug!("{} of {} items need reordering", alerts.len(), items.len());
    Ok(ApiResponse::ok(alerts, "Low stock items retrieved successfully"))
}

/// Stock value and status analytics
#[utoipa::path(
    get,
    path = "/api/inventory/analytics",
    tag = "inventory",
    responses(
        (status = 200, description = "Inventory analytics", body = ApiResponse<InventoryAnalytics>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_inventory_analytics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<InventoryAnalytics>>, HandlerError> {
    let items = load_items(&state).await?;
    Ok(ApiResponse::ok(analytics(&items), "Inventory analytics retrieved successfully"))
}
