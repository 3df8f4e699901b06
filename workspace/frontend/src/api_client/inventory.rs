use common::inventory::{InventoryAnalytics, InventoryItem, InventoryQuery};

use crate::api_client;

/// Get inventory items matching the filters
pub async fn get_inventory(query: &InventoryQuery) -> Result<Vec<InventoryItem>, String> {
    let params = api_client::optional_params(&[
        ("category", query.category.clone()),
        ("status", query.status.clone()),
        ("search", query.search.clone()),
    ]);
    let result: Result<Vec<InventoryItem>, String> =
        api_client::get_with_query("/inventory/", &params).await;
    match &result {
        Ok(items) => log::info!("Fetched {} inventory items", items.len()),
        Err(e) => log::error!("Failed to fetch inventory: {}", e),
    }
    result
}

pub async fn get_low_stock() -> Result<Vec<InventoryItem>, String> {
    api_client::get("/inventory/low-stock").await
}

pub async fn get_inventory_analytics() -> Result<InventoryAnalytics, String> {
    api_client::get("/inventory/analytics").await
}
