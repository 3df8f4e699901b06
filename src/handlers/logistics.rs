//! Shipment tracking, route planning and route weather under `/api/logistics`.

pub mod routes;
pub mod shipments;
pub mod weather;

use axum::http::StatusCode;
use common::logistics::Shipment;
use model::entities::shipment;
use sea_orm::EntityTrait;
use tracing::warn;

use crate::schemas::{database_error, error_response, AppState, HandlerError};

/// Loads a stored shipment or answers 404.
pub(crate) async fn load_shipment(
    state: &AppState,
    shipment_id: &str,
) -> Result<Shipment, HandlerError> {
    match shipment::Entity::find_by_id(shipment_id.to_string()).one(&state.db).await {
        Ok(Some(model)) => Ok(model.into()),
        Ok(None) => {
            warn!("Shipment {} not found", shipment_id);
            Err(error_response(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Shipment {} not found", shipment_id),
            ))
        }
        Err(e) => Err(database_error("Failed to load shipment", e)),
    }
}
