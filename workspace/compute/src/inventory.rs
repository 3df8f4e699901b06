use std::collections::BTreeMap;

use common::inventory::{CategorySummary, CategoryValue, InventoryAnalytics, InventoryItem};
use common::round2;
use tracing::{debug, instrument};

/// Stock turns per year assumed for the whole inventory.
pub const TURNOVER_RATE: f64 = 6.4;
/// Yearly carrying cost as a share of the stock value.
pub const CARRYING_COST_RATE: f64 = 0.10;
const TOP_CATEGORIES: usize = 5;

/// Items that should be reordered, lowest stock first.
pub fn low_stock(items: &[InventoryItem]) -> Vec<InventoryItem> {
    let mut low: Vec<InventoryItem> = items
        .iter()
        .filter(|item| item.status.needs_reorder())
        .cloned()
        .collect();
    low.sort_by_key(|item| (item.status, item.current_stock));
    low
}

/// Aggregates stock value and health over all items.
#[instrument(skip(items), fields(num_items = items.len()))]
pub fn analytics(items: &[InventoryItem]) -> InventoryAnalytics {
    let mut status_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut category_breakdown: BTreeMap<String, CategorySummary> = BTreeMap::new();
    let mut total_value = 0.0;

    for item in items {
        let value = item.stock_value();
        total_value += value;
        *status_breakdown.entry(item.status.as_str().to_string()).or_default() += 1;
        let summary = category_breakdown.entry(item.category.clone()).or_default();
        summary.items += 1;
        summary.value += value;
    }

    for summary in category_breakdown.values_mut() {
        summary.value = round2(summary.value);
    }

    let mut top_categories: Vec<CategoryValue> = category_breakdown
        .iter()
        .map(|(category, summary)| CategoryValue {
            category: category.clone(),
            items: summary.items,
            value: summary.value,
        })
        .collect();
    // stable sort keeps alphabetical order among equal values
    top_categories.sort_by(|a, b| b.value.total_cmp(&a.value));
    top_categories.truncate(TOP_CATEGORIES);

    let reorder_alerts = items.iter().filter(|item| item.status.needs_reorder()).count();
    debug!("Inventory worth {:.2} with {} reorder alerts", total_value, reorder_alerts);

    InventoryAnalytics {
        total_items: items.len(),
        total_value: round2(total_value),
        status_breakdown,
        category_breakdown,
        turnover_rate: TURNOVER_RATE,
        carrying_cost: round2(total_value * CARRYING_COST_RATE),
        reorder_alerts,
        top_categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::inventory::StockStatus;

    fn item(id: i32, category: &str, current: u32, min: u32, max: u32, cost: f64) -> InventoryItem {
        InventoryItem {
            id,
            name: format!("Item {}", id),
            category: category.to_string(),
            sku: None,
            current_stock: current,
            min_stock_level: min,
            max_stock_level: max,
            unit_cost: cost,
            selling_price: cost * 1.5,
            supplier: None,
            status: StockStatus::from_levels(current, min, max),
            last_updated: NaiveDate::from_ymd_opt(2025, 9, 12)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    fn seeded() -> Vec<InventoryItem> {
        vec![
            item(1, "Grocery", 150, 50, 200, 80.0),
            item(2, "Electronics", 15, 20, 50, 15000.0),
            item(3, "Clothing", 80, 30, 100, 800.0),
            item(4, "Medical", 8, 25, 100, 2.0),
            item(5, "Cosmetics", 120, 40, 80, 250.0),
            item(6, "Food & Beverage", 45, 50, 120, 150.0),
        ]
    }

    #[test]
    fn test_analytics_over_seed() {
        let analytics = analytics(&seeded());
        assert_eq!(analytics.total_items, 6);
        // 12000 + 225000 + 64000 + 16 + 30000 + 6750
        assert_eq!(analytics.total_value, 337_766.0);
        assert_eq!(analytics.carrying_cost, 33_776.6);
        assert_eq!(analytics.turnover_rate, 6.4);
        assert_eq!(analytics.reorder_alerts, 3);
        assert_eq!(analytics.status_breakdown["low"], 2);
        assert_eq!(analytics.status_breakdown["critical"], 1);
        assert_eq!(analytics.status_breakdown["overstock"], 1);
        assert_eq!(analytics.status_breakdown["healthy"], 2);

        assert_eq!(analytics.top_categories.len(), 5);
        assert_eq!(analytics.top_categories[0].category, "Electronics");
        assert_eq!(analytics.top_categories[4].category, "Food & Beverage");
        assert!(analytics.top_categories.iter().all(|c| c.category != "Medical"));
    }

    #[test]
    fn test_low_stock_orders_critical_first() {
        let low = low_stock(&seeded());
        let ids: Vec<i32> = low.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 2, 6]);
    }

    #[test]
    fn test_empty_inventory() {
        let analytics = analytics(&[]);
        assert_eq!(analytics.total_items, 0);
        assert_eq!(analytics.total_value, 0.0);
        assert!(analytics.top_categories.is_empty());
    }
}
