use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// The report documents offered under `/api/reports`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    ExecutiveSummary,
    Sales,
    Inventory,
    ForecastAccuracy,
    Logistics,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::ExecutiveSummary,
        ReportKind::Sales,
        ReportKind::Inventory,
        ReportKind::ForecastAccuracy,
        ReportKind::Logistics,
    ];

    /// Path segment under `/api/reports/`.
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::ExecutiveSummary => "executive-summary",
            ReportKind::Sales => "sales",
            ReportKind::Inventory => "inventory",
            ReportKind::ForecastAccuracy => "forecast-accuracy",
            ReportKind::Logistics => "logistics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::ExecutiveSummary => "Executive Summary",
            ReportKind::Sales => "Sales Performance",
            ReportKind::Inventory => "Inventory Analysis",
            ReportKind::ForecastAccuracy => "Forecast Accuracy",
            ReportKind::Logistics => "Logistics Performance",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("unknown report type '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ExecutiveSummary {
    /// Month and year, e.g. "September 2025".
    pub period: String,
    pub total_sales: f64,
    pub growth_rate: f64,
    pub forecast_accuracy: f64,
    pub inventory_turnover: f64,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub alerts: Vec<String>,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SalesPoint {
    pub month: String,
    pub sales: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SalesReport {
    pub period: String,
    pub total_sales: f64,
    pub avg_growth: f64,
    pub data: Vec<SalesPoint>,
}

pub const SALES_PERIODS: [&str; 4] = ["weekly", "monthly", "quarterly", "yearly"];

fn validate_sales_period(value: &str) -> Result<(), ValidationError> {
    if SALES_PERIODS.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_sales_period"))
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct SalesReportQuery {
    /// weekly, monthly, quarterly or yearly. Defaults to monthly.
    #[validate(custom(function = "validate_sales_period"))]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StockStatusCounts {
    pub healthy: u32,
    pub low_stock: u32,
    pub critical: u32,
    pub overstock: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub value: f64,
    pub items: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InventoryReport {
    pub total_items: u32,
    pub total_value: f64,
    pub stock_status: StockStatusCounts,
    pub top_categories: Vec<CategoryTotal>,
    pub turnover_rate: f64,
    pub carrying_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlyAccuracy {
    pub month: String,
    pub accuracy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastAccuracyReport {
    pub overall_accuracy: f64,
    pub by_business_type: BTreeMap<String, f64>,
    pub by_season: BTreeMap<String, f64>,
    pub monthly_trend: Vec<MonthlyAccuracy>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegionalPerformance {
    pub shipments: u32,
    pub on_time: f64,
    pub avg_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShipmentStatusCounts {
    pub delivered: u32,
    pub in_transit: u32,
    pub processing: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LogisticsReport {
    pub total_shipments: u32,
    pub on_time_delivery: f64,
    pub avg_delivery_time: f64,
    pub total_cost: f64,
    pub cost_per_shipment: f64,
    pub shipment_status: ShipmentStatusCounts,
    pub regional_performance: BTreeMap<String, RegionalPerformance>,
}

fn validate_report_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ReportKind>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_report_type"))
}

/// Body of `POST /api/reports/generate-pdf`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct GenerateReportRequest {
    #[validate(custom(function = "validate_report_type"))]
    pub report_type: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Receipt for a queued report document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReportReceipt {
    pub report_id: String,
    pub report_type: String,
    pub file_name: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub generated_at: NaiveDateTime,
    pub pages: u32,
    pub download_url: String,
}
