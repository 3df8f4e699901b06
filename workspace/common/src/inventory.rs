use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::catalog::non_blank;

/// Stock health of an inventory item, derived from its levels.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Healthy,
    Overstock,
}

impl StockStatus {
    /// `critical` at or below half the minimum, `low` at or below the
    /// minimum, `overstock` at or above 120% of the maximum.
    pub fn from_levels(current: u32, min: u32, max: u32) -> Self {
        let current = f64::from(current);
        if current <= f64::from(min) * 0.5 {
            StockStatus::Critical
        } else if current <= f64::from(min) {
            StockStatus::Low
        } else if current >= f64::from(max) * 1.2 {
            StockStatus::Overstock
        } else {
            StockStatus::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Healthy => "healthy",
            StockStatus::Overstock => "overstock",
        }
    }

    pub fn needs_reorder(&self) -> bool {
        matches!(self, StockStatus::Critical | StockStatus::Low)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(StockStatus::Critical),
            "low" => Ok(StockStatus::Low),
            "healthy" => Ok(StockStatus::Healthy),
            "overstock" => Ok(StockStatus::Overstock),
            other => Err(format!("unknown stock status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InventoryItem {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub sku: Option<String>,
    pub current_stock: u32,
    pub min_stock_level: u32,
    pub max_stock_level: u32,
    pub unit_cost: f64,
    pub selling_price: f64,
    pub supplier: Option<String>,
    pub status: StockStatus,
    pub last_updated: NaiveDateTime,
}

impl InventoryItem {
    pub fn stock_value(&self) -> f64 {
        f64::from(self.current_stock) * self.unit_cost
    }
}

/// Body of `POST /api/inventory/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
#[validate(schema(function = "validate_create_levels"))]
pub struct CreateInventoryItemRequest {
    #[validate(length(max = 255), custom(function = "non_blank"))]
    pub name: String,
    #[validate(length(max = 100), custom(function = "non_blank"))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub sku: Option<String>,
    pub current_stock: u32,
    pub min_stock_level: u32,
    #[validate(range(min = 1))]
    pub max_stock_level: u32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub unit_cost: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub selling_price: f64,
    #[serde(default)]
    pub supplier: Option<String>,
}

fn validate_create_levels(request: &CreateInventoryItemRequest) -> Result<(), ValidationError> {
    if request.min_stock_level >= request.max_stock_level {
        return Err(ValidationError::new("min_stock_level_must_be_below_max"));
    }
    Ok(())
}

/// Body of `PUT /api/inventory/{id}`. Absent fields keep their value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default, Validate)]
pub struct UpdateInventoryItemRequest {
    #[validate(length(max = 255), custom(function = "non_blank"))]
    pub name: Option<String>,
    #[validate(length(max = 100), custom(function = "non_blank"))]
    pub category: Option<String>,
    pub sku: Option<String>,
    pub current_stock: Option<u32>,
    pub min_stock_level: Option<u32>,
    pub max_stock_level: Option<u32>,
    #[validate(range(min = 0.0))]
    pub unit_cost: Option<f64>,
    #[validate(range(min = 0.0))]
    pub selling_price: Option<f64>,
    pub supplier: Option<String>,
}

/// Query of `GET /api/inventory/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams, PartialEq, Default)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Category, matched case-insensitively.
    pub category: Option<String>,
    /// One of critical, low, healthy, overstock.
    pub status: Option<String>,
    /// Substring of the name or SKU.
    pub search: Option<String>,
}

impl InventoryQuery {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if !item.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            if !item.status.as_str().eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let in_name = item.name.to_lowercase().contains(&term);
            let in_sku = item
                .sku
                .as_deref()
                .map(|sku| sku.to_lowercase().contains(&term))
                .unwrap_or(false);
            if !in_name && !in_sku {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct CategorySummary {
    pub items: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryValue {
    pub category: String,
    pub items: usize,
    pub value: f64,
}

/// Payload of `GET /api/inventory/analytics`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct InventoryAnalytics {
    pub total_items: usize,
    pub total_value: f64,
    pub status_breakdown: BTreeMap<String, usize>,
    pub category_breakdown: BTreeMap<String, CategorySummary>,
    pub turnover_rate: f64,
    pub carrying_cost: f64,
    pub reorder_alerts: usize,
    pub top_categories: Vec<CategoryValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(
        name: &str,
        sku: &str,
        category: &str,
        current: u32,
        min: u32,
        max: u32,
    ) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: name.to_string(),
            category: category.to_string(),
            sku: Some(sku.to_string()),
            current_stock: current,
            min_stock_level: min,
            max_stock_level: max,
            unit_cost: 10.0,
            selling_price: 12.0,
            supplier: None,
            status: StockStatus::from_levels(current, min, max),
            last_updated: NaiveDate::from_ymd_opt(2025, 9, 12)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(StockStatus::from_levels(150, 50, 200), StockStatus::Healthy);
        assert_eq!(StockStatus::from_levels(15, 20, 50), StockStatus::Low);
        assert_eq!(StockStatus::from_levels(8, 25, 100), StockStatus::Critical);
        assert_eq!(StockStatus::from_levels(120, 40, 80), StockStatus::Overstock);
        assert_eq!(StockStatus::from_levels(45, 50, 120), StockStatus::Low);
        // exactly half the minimum is critical
        assert_eq!(StockStatus::from_levels(10, 20, 50), StockStatus::Critical);
        // exactly 120% of the maximum is overstock
        assert_eq!(StockStatus::from_levels(60, 20, 50), StockStatus::Overstock);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            StockStatus::Critical,
            StockStatus::Low,
            StockStatus::Healthy,
            StockStatus::Overstock,
        ] {
            assert_eq!(status.as_str().parse::<StockStatus>().unwrap(), status);
        }
        assert!("unknown".parse::<StockStatus>().is_err());
        assert_eq!(serde_json::to_value(StockStatus::Overstock).unwrap(), "overstock");
    }

    #[test]
    fn test_query_filters() {
        let rice = item("Basmati Rice 1kg", "GRC-001", "Grocery", 150, 50, 200);
        let phone = item("Samsung Galaxy A54", "ELE-001", "Electronics", 15, 20, 50);

        let by_category = InventoryQuery { category: Some("grocery".into()), ..Default::default() };
        assert!(by_category.matches(&rice));
        assert!(!by_category.matches(&phone));

        let by_status = InventoryQuery { status: Some("low".into()), ..Default::default() };
        assert!(by_status.matches(&phone));
        assert!(!by_status.matches(&rice));

        let by_sku = InventoryQuery { search: Some("ele-".into()), ..Default::default() };
        assert!(by_sku.matches(&phone));
        assert!(!by_sku.matches(&rice));

        assert!(InventoryQuery::default().matches(&rice));
    }

    #[test]
    fn test_create_request_level_validation() {
        let mut request = CreateInventoryItemRequest {
            name: "Test Product".into(),
            category: "Electronics".into(),
            sku: None,
            current_stock: 100,
            min_stock_level: 20,
            max_stock_level: 200,
            unit_cost: 500.0,
            selling_price: 750.0,
            supplier: None,
        };
        assert!(request.validate().is_ok());

        request.min_stock_level = 200;
        assert!(request.validate().is_err());

        request.min_stock_level = 20;
        request.name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_stock_is_rejected_by_deserialization() {
        let raw = r#"{"name": "", "category": "Electronics", "current_stock": -5,
                      "min_stock_level": 20, "max_stock_level": 200}"#;
        assert!(serde_json::from_str::<CreateInventoryItemRequest>(raw).is_err());
    }
}
