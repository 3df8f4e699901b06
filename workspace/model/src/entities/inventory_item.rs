use chrono::NaiveDateTime;
use common::inventory::{InventoryItem, StockStatus};
use sea_orm::entity::prelude::*;

/// A stocked product. The stock status is not stored; it is derived from
/// the levels whenever the row is read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: String,
    #[sea_orm(unique)]
    pub sku: Option<String>,
    pub current_stock: i32,
    pub min_stock_level: i32,
    pub max_stock_level: i32,
    pub unit_cost: f64,
    pub selling_price: f64,
    pub supplier: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn non_negative(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

impl Model {
    pub fn status(&self) -> StockStatus {
        StockStatus::from_levels(
            non_negative(self.current_stock),
            non_negative(self.min_stock_level),
            non_negative(self.max_stock_level),
        )
    }
}

impl From<Model> for InventoryItem {
    fn from(model: Model) -> Self {
        let status = model.status();
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            sku: model.sku,
            current_stock: non_negative(model.current_stock),
            min_stock_level: non_negative(model.min_stock_level),
            max_stock_level: non_negative(model.max_stock_level),
            unit_cost: model.unit_cost,
            selling_price: model.selling_price,
            supplier: model.supplier,
            status,
            last_updated: model.updated_at,
        }
    }
}
