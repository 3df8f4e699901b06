use chrono::{NaiveDate, NaiveDateTime};
use common::logistics::{
    Priority, Shipment, ShipmentStatus, StatusHistoryEntry, TrackingInfo, TransportMode,
    DEFAULT_ORIGIN,
};
use model::entities::{inventory_item, shipment};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn day(year: i32, month: u32, day: u32) -> Result<NaiveDate, DbErr> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DbErr::Custom(format!("invalid seed date {}-{}-{}", year, month, day)))
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> Result<NaiveDateTime, DbErr> {
    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| DbErr::Custom(format!("invalid seed time {}:{}", hour, minute)))
}

const SEED_SKUS: [&str; 6] = ["GRC-001", "ELE-001", "CLT-001", "MED-001", "COS-001", "F&B-001"];
const SEED_SHIPMENTS: [&str; 4] = ["SHP-A1B2C3D4", "SHP-E5F6G7H8", "SHP-I9J0K1L2", "SHP-M3N4O5P6"];

struct SeedItem {
    name: &'static str,
    category: &'static str,
    sku: &'static str,
    current: i32,
    min: i32,
    max: i32,
    cost: f64,
    price: f64,
    supplier: &'static str,
}

const SEED_ITEMS: [SeedItem; 6] = [
    SeedItem {
        name: "Basmati Rice 1kg",
        category: "Grocery",
        sku: "GRC-001",
        current: 150,
        min: 50,
        max: 200,
        cost: 80.0,
        price: 120.0,
        supplier: "Local Rice Supplier",
    },
    SeedItem {
        name: "Samsung Galaxy A54",
        category: "Electronics",
        sku: "ELE-001",
        current: 15,
        min: 20,
        max: 50,
        cost: 15000.0,
        price: 18000.0,
        supplier: "Electronics Distributor",
    },
    SeedItem {
        name: "Festival Kurta Set",
        category: "Clothing",
        sku: "CLT-001",
        current: 80,
        min: 30,
        max: 100,
        cost: 800.0,
        price: 1500.0,
        supplier: "Textile Manufacturer",
    },
    SeedItem {
        name: "Paracetamol 500mg",
        category: "Medical",
        sku: "MED-001",
        current: 8,
        min: 25,
        max: 100,
        cost: 2.0,
        price: 3.5,
        supplier: "Medical Distributor",
    },
    SeedItem {
        name: "Lakme Lipstick",
        category: "Cosmetics",
        sku: "COS-001",
        current: 120,
        min: 40,
        max: 80,
        cost: 250.0,
        price: 350.0,
        supplier: "Beauty Distributor",
    },
    SeedItem {
        name: "Masala Chai Mix",
        category: "Food & Beverage",
        sku: "F&B-001",
        current: 45,
        min: 50,
        max: 120,
        cost: 150.0,
        price: 200.0,
        supplier: "Local Tea Supplier",
    },
];

struct SeedShipment {
    id: &'static str,
    destination: &'static str,
    status: ShipmentStatus,
    items_count: u32,
    weight: f64,
    cost: f64,
    created: (u32, u32),
    shipped: Option<(u32, u32)>,
    eta: (u32, u32),
    delivered: Option<(u32, u32)>,
    location: &'static str,
    next_checkpoint: Option<&'static str>,
    last_update: (u32, u32, u32, u32),
}

const SEED_SHIPMENT_ROWS: [SeedShipment; 4] = [
    SeedShipment {
        id: "SHP-A1B2C3D4", destination: "Mumbai", status: ShipmentStatus::Delivered,
        items_count: 25, weight: 45.5, cost: 4250.0,
        created: (9, 8), shipped: Some((9, 9)), eta: (9, 12), delivered: Some((9, 11)),
        location: "Mumbai", next_checkpoint: None, last_update: (9, 11, 18, 30),
    },
    SeedShipment {
        id: "SHP-E5F6G7H8", destination: "Chennai", status: ShipmentStatus::InTransit,
        items_count: 12, weight: 20.0, cost: 1950.0,
        created: (9, 11), shipped: Some((9, 11)), eta: (9, 13), delivered: None,
        location: "En Route to Chennai", next_checkpoint: Some("Chennai Hub"),
        last_update: (9, 12, 14, 20),
    },
    SeedShipment {
        id: "SHP-I9J0K1L2", destination: "Delhi", status: ShipmentStatus::Processing,
        items_count: 35, weight: 80.0, cost: 6500.0,
        created: (9, 12), shipped: None, eta: (9, 16), delivered: None,
        location: "Bangalore Warehouse", next_checkpoint: Some("Hyderabad Hub"),
        last_update: (9, 12, 10, 0),
    },
    SeedShipment {
        id: "SHP-M3N4O5P6", destination: "Hyderabad", status: ShipmentStatus::Delivered,
        items_count: 18, weight: 30.5, cost: 2850.0,
        created: (9, 9), shipped: Some((9, 9)), eta: (9, 11), delivered: Some((9, 10)),
        location: "Hyderabad", next_checkpoint: None, last_update: (9, 10, 16, 45),
    },
];

fn build_shipment(seed: &SeedShipment) -> Result<Shipment, DbErr> {
    let created = day(2025, seed.created.0, seed.created.1)?;
    let shipped = seed.shipped.map(|(m, d)| day(2025, m, d)).transpose()?;
    let delivered = seed.delivered.map(|(m, d)| day(2025, m, d)).transpose()?;
    let (lm, ld, lh, lmin) = seed.last_update;

    let mut history = vec![StatusHistoryEntry {
        status: ShipmentStatus::Processing,
        timestamp: at(created, 10, 0)?,
        location: "Bangalore Warehouse".to_string(),
        message: Some("Shipment created".to_string()),
    }];
    if let Some(shipped) = shipped {
        history.push(StatusHistoryEntry {
            status: ShipmentStatus::InTransit,
            timestamp: at(shipped, 12, 0)?,
            location: DEFAULT_ORIGIN.to_string(),
            message: None,
        });
    }
    if let Some(delivered) = delivered {
        history.push(StatusHistoryEntry {
            status: ShipmentStatus::Delivered,
            timestamp: at(delivered, lh, lmin)?,
            location: seed.destination.to_string(),
            message: None,
        });
    }

    Ok(Shipment {
        id: seed.id.to_string(),
        origin: DEFAULT_ORIGIN.to_string(),
        destination: seed.destination.to_string(),
        status: seed.status,
        transport_mode: TransportMode::Road,
        priority: Priority::Standard,
        items_count: seed.items_count,
        total_weight: seed.weight,
        items: vec![],
        notes: String::new(),
        cost: seed.cost,
        created_date: created,
        shipped_date: shipped,
        eta: day(2025, seed.eta.0, seed.eta.1)?,
        actual_delivery: delivered,
        tracking_info: TrackingInfo {
            last_update: at(day(2025, lm, ld)?, lh, lmin)?,
            location: seed.location.to_string(),
            next_checkpoint: seed.next_checkpoint.map(str::to_string),
            status_history: history,
        },
    })
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let created_at = at(day(2025, 9, 1)?, 10, 0)?;
        let updated_at = at(day(2025, 9, 12)?, 10, 0)?;
        for item in SEED_ITEMS.iter() {
            inventory_item::ActiveModel {
                name: Set(item.name.to_string()),
                category: Set(item.category.to_string()),
                sku: Set(Some(item.sku.to_string())),
                current_stock: Set(item.current),
                min_stock_level: Set(item.min),
                max_stock_level: Set(item.max),
                unit_cost: Set(item.cost),
                selling_price: Set(item.price),
                supplier: Set(Some(item.supplier.to_string())),
                created_at: Set(created_at),
                updated_at: Set(updated_at),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        for seed in SEED_SHIPMENT_ROWS.iter() {
            let shipment = build_shipment(seed)?;
            shipment::ActiveModel::from(&shipment).insert(db).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        shipment::Entity::delete_many()
            .filter(shipment::Column::Id.is_in(SEED_SHIPMENTS))
            .exec(db)
            .await?;
        inventory_item::Entity::delete_many()
            .filter(inventory_item::Column::Sku.is_in(SEED_SKUS))
            .exec(db)
            .await?;
        Ok(())
    }
}
