use chrono::{NaiveDate, NaiveDateTime};
use common::logistics::{Shipment, ShipmentStatus, TrackingInfo};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

/// Lifecycle state of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ShipmentState {
    #[sea_orm(string_value = "Processing")]
    Processing,
    #[sea_orm(string_value = "In Transit")]
    InTransit,
    #[sea_orm(string_value = "Out for Delivery")]
    OutForDelivery,
    #[sea_orm(string_value = "Delivered")]
    Delivered,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

impl From<ShipmentState> for ShipmentStatus {
    fn from(state: ShipmentState) -> Self {
        match state {
            ShipmentState::Processing => ShipmentStatus::Processing,
            ShipmentState::InTransit => ShipmentStatus::InTransit,
            ShipmentState::OutForDelivery => ShipmentStatus::OutForDelivery,
            ShipmentState::Delivered => ShipmentStatus::Delivered,
            ShipmentState::Cancelled => ShipmentStatus::Cancelled,
        }
    }
}

impl From<ShipmentStatus> for ShipmentState {
    fn from(status: ShipmentStatus) -> Self {
        match status {
            ShipmentStatus::Processing => ShipmentState::Processing,
            ShipmentStatus::InTransit => ShipmentState::InTransit,
            ShipmentStatus::OutForDelivery => ShipmentState::OutForDelivery,
            ShipmentStatus::Delivered => ShipmentState::Delivered,
            ShipmentStatus::Cancelled => ShipmentState::Cancelled,
        }
    }
}

/// A shipment leaving a distribution center. Items and the status history
/// are stored as JSON arrays.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shipments")]
pub struct Model {
    /// `SHP-XXXXXXXX`
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentState,
    pub transport_mode: String,
    pub priority: String,
    pub items_count: i32,
    pub total_weight: f64,
    pub items: Json,
    pub notes: String,
    pub cost: f64,
    pub created_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub eta: NaiveDate,
    pub actual_delivery: Option<NaiveDate>,
    pub current_location: String,
    pub next_checkpoint: Option<String>,
    pub status_history: Json,
    pub last_update: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Shipment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            origin: model.origin,
            destination: model.destination,
            status: model.status.into(),
            transport_mode: model.transport_mode.parse().unwrap_or_default(),
            priority: model.priority.parse().unwrap_or_default(),
            items_count: u32::try_from(model.items_count).unwrap_or(0),
            total_weight: model.total_weight,
            items: serde_json::from_value(model.items).unwrap_or_default(),
            notes: model.notes,
            cost: model.cost,
            created_date: model.created_date,
            shipped_date: model.shipped_date,
            eta: model.eta,
            actual_delivery: model.actual_delivery,
            tracking_info: TrackingInfo {
                last_update: model.last_update,
                location: model.current_location,
                next_checkpoint: model.next_checkpoint,
                status_history: serde_json::from_value(model.status_history).unwrap_or_default(),
            },
        }
    }
}

impl From<&Shipment> for ActiveModel {
    fn from(shipment: &Shipment) -> Self {
        ActiveModel {
            id: Set(shipment.id.clone()),
            origin: Set(shipment.origin.clone()),
            destination: Set(shipment.destination.clone()),
            status: Set(shipment.status.into()),
            transport_mode: Set(shipment.transport_mode.as_str().to_string()),
            priority: Set(shipment.priority.as_str().to_string()),
            items_count: Set(i32::try_from(shipment.items_count).unwrap_or(i32::MAX)),
            total_weight: Set(shipment.total_weight),
            items: Set(
                serde_json::to_value(&shipment.items).unwrap_or_else(|_| Json::Array(vec![])),
            ),
            notes: Set(shipment.notes.clone()),
            cost: Set(shipment.cost),
            created_date: Set(shipment.created_date),
            shipped_date: Set(shipment.shipped_date),
            eta: Set(shipment.eta),
            actual_delivery: Set(shipment.actual_delivery),
            current_location: Set(shipment.tracking_info.location.clone()),
            next_checkpoint: Set(shipment.tracking_info.next_checkpoint.clone()),
            status_history: Set(serde_json::to_value(&shipment.tracking_info.status_history)
                .unwrap_or_else(|_| Json::Array(vec![]))),
            last_update: Set(shipment.tracking_info.last_update),
        }
    }
}
