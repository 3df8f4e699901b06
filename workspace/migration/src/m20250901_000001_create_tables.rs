use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create forecasts table
        manager
            .create_table(
                Table::create()
                    .table(Forecasts::Table)
                    .if_not_exists()
                    .col(pk_auto(Forecasts::Id))
                    .col(string_null(Forecasts::BusinessName))
                    .col(string(Forecasts::BusinessType))
                    .col(string(Forecasts::BusinessScale))
                    .col(string(Forecasts::Location))
                    .col(double(Forecasts::CurrentSales))
                    .col(integer(Forecasts::ForecastPeriod))
                    .col(date(Forecasts::ForecastStart))
                    .col(date(Forecasts::ForecastEnd))
                    .col(json(Forecasts::Payload))
                    .col(date_time(Forecasts::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forecasts_business_type")
                    .table(Forecasts::Table)
                    .col(Forecasts::BusinessType)
                    .to_owned(),
            )
            .await?;

        // Create inventory items table
        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryItems::Id))
                    .col(string(InventoryItems::Name))
                    .col(string(InventoryItems::Category))
                    .col(string_null(InventoryItems::Sku).unique_key())
                    .col(integer(InventoryItems::CurrentStock))
                    .col(integer(InventoryItems::MinStockLevel))
                    .col(integer(InventoryItems::MaxStockLevel))
                    .col(double(InventoryItems::UnitCost))
                    .col(double(InventoryItems::SellingPrice))
                    .col(string_null(InventoryItems::Supplier))
                    .col(date_time(InventoryItems::CreatedAt))
                    .col(date_time(InventoryItems::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create shipments table
        manager
            .create_table(
                Table::create()
                    .table(Shipments::Table)
                    .if_not_exists()
                    .col(string_len(Shipments::Id, 12).primary_key())
                    .col(string(Shipments::Origin))
                    .col(string(Shipments::Destination))
                    .col(string_len(Shipments::Status, 20))
                    .col(string_len(Shipments::TransportMode, 10))
                    .col(string_len(Shipments::Priority, 10))
                    .col(integer(Shipments::ItemsCount))
                    .col(double(Shipments::TotalWeight))
                    .col(json(Shipments::Items))
                    .col(string(Shipments::Notes))
                    .col(double(Shipments::Cost))
                    .col(date(Shipments::CreatedDate))
                    .col(date_null(Shipments::ShippedDate))
                    .col(date(Shipments::Eta))
                    .col(date_null(Shipments::ActualDelivery))
                    .col(string(Shipments::CurrentLocation))
                    .col(string_null(Shipments::NextCheckpoint))
                    .col(json(Shipments::StatusHistory))
                    .col(date_time(Shipments::LastUpdate))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shipments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Forecasts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Forecasts {
    Table,
    Id,
    BusinessName,
    BusinessType,
    BusinessScale,
    Location,
    CurrentSales,
    ForecastPeriod,
    ForecastStart,
    ForecastEnd,
    Payload,
    CreatedAt,
}

#[derive(DeriveIden)]
enum InventoryItems {
    Table,
    Id,
    Name,
    Category,
    Sku,
    CurrentStock,
    MinStockLevel,
    MaxStockLevel,
    UnitCost,
    SellingPrice,
    Supplier,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Shipments {
    Table,
    Id,
    Origin,
    Destination,
    Status,
    TransportMode,
    Priority,
    ItemsCount,
    TotalWeight,
    Items,
    Notes,
    Cost,
    CreatedDate,
    ShippedDate,
    Eta,
    ActualDelivery,
    CurrentLocation,
    NextCheckpoint,
    StatusHistory,
    LastUpdate,
}
