//! Fixed report documents and report generation receipts.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use common::reports::{
    CategoryTotal, ExecutiveSummary, ForecastAccuracyReport, GenerateReportRequest, InventoryReport,
    LogisticsReport, MonthlyAccuracy, RegionalPerformance, ReportKind, ReportReceipt, SalesPoint,
    SalesReport, ShipmentStatusCounts, StockStatusCounts,
};
use common::round1;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{ComputeError, Result};

pub const REPORT_PAGES: u32 = 12;
pub const DEFAULT_SALES_PERIOD: &str = "monthly";

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn executive_summary(now: NaiveDateTime) -> ExecutiveSummary {
    ExecutiveSummary {
        period: now.format("%B %Y").to_string(),
        total_sales: 2_850_000.0,
        growth_rate: 18.5,
        forecast_accuracy: 87.2,
        inventory_turnover: 6.4,
        key_insights: strings(&[
            "Festival season driving 40% increase in demand across electronics and clothing",
            "Inventory optimization reduced carrying costs by 15%",
            "Forecast accuracy improved by 8% quarter-over-quarter",
            "Supply chain efficiency up 12% with route optimization",
        ]),
        recommendations: strings(&[
            "Increase inventory for Diwali season by 45% based on the demand forecast",
            "Expand premium product line in Karnataka and Maharashtra markets",
            "Implement dynamic pricing for high-demand festival periods",
            "Invest in supplier relationships for faster restocking",
        ]),
        alerts: strings(&[
            "3 product categories below minimum stock levels",
            "Diwali demand surge expected in 4 weeks - prepare inventory",
            "Supplier lead times increased by 2 days - adjust orders accordingly",
        ]),
        generated_at: now,
    }
}

const MONTHLY_SALES: [(&str, f64, f64); 9] = [
    ("Jan 2025", 1_200_000.0, 15.2),
    ("Feb 2025", 1_350_000.0, 12.5),
    ("Mar 2025", 1_400_000.0, 8.9),
    ("Apr 2025", 1_250_000.0, -10.7),
    ("May 2025", 1_600_000.0, 28.0),
    ("Jun 2025", 1_100_000.0, -31.3),
    ("Jul 2025", 1_750_000.0, 59.1),
    ("Aug 2025", 1_950_000.0, 11.4),
    ("Sep 2025", 2_100_000.0, 7.7),
];

/// Only the monthly series has data; other periods give an empty report.
pub fn sales(period: &str) -> SalesReport {
    let data: Vec<SalesPoint> = if period == DEFAULT_SALES_PERIOD {
        MONTHLY_SALES
            .iter()
            .map(|(month, sales, growth)| SalesPoint {
                month: month.to_string(),
                sales: *sales,
                growth: *growth,
            })
            .collect()
    } else {
        Vec::new()
    };
    let total_sales = data.iter().map(|p| p.sales).sum();
    let avg_growth = if data.is_empty() {
        0.0
    } else {
        round1(data.iter().map(|p| p.growth).sum::<f64>() / data.len() as f64)
    };
    SalesReport { period: period.to_string(), total_sales, avg_growth, data }
}

pub fn inventory() -> InventoryReport {
    let top = [
        ("Electronics", 3_200_000.0, 340),
        ("Clothing", 2_800_000.0, 420),
        ("Grocery", 1_500_000.0, 380),
        ("Medical", 1_000_000.0, 107),
    ];
    InventoryReport {
        total_items: 1247,
        total_value: 8_500_000.0,
        stock_status: StockStatusCounts {
            healthy: 850,
            low_stock: 45,
            critical: 12,
            overstock: 340,
        },
        top_categories: top
            .iter()
            .map(|(category, value, items)| CategoryTotal {
                category: category.to_string(),
                value: *value,
                items: *items,
            })
            .collect(),
        turnover_rate: 6.4,
        carrying_cost: 850_000.0,
    }
}

fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub fn forecast_accuracy() -> ForecastAccuracyReport {
    let monthly = [84.2, 86.1, 88.5, 87.3, 89.1, 85.8, 90.2, 88.9, 87.2];
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep"];
    ForecastAccuracyReport {
        overall_accuracy: 87.2,
        by_business_type: scores(&[
            ("Grocery Store", 92.1),
            ("Electronics Store", 84.5),
            ("Clothing Store", 88.7),
            ("Medical Store", 89.3),
            ("Cosmetics Store", 85.9),
            ("Food & Beverage", 83.4),
        ]),
        by_season: scores(&[
            ("Regular", 89.1),
            ("Festival", 82.3),
            ("Monsoon", 88.9),
            ("Wedding", 85.7),
        ]),
        monthly_trend: months
            .iter()
            .zip(monthly)
            .map(|(month, accuracy)| MonthlyAccuracy { month: month.to_string(), accuracy })
            .collect(),
        improvement_areas: strings(&[
            "Festival season predictions need more regional data",
            "Monsoon impact varies significantly by location",
            "New product launches reduce accuracy by 5-8%",
        ]),
    }
}

pub fn logistics() -> LogisticsReport {
    let regions = [
        ("Karnataka", 420, 92.1, 3.8),
        ("Maharashtra", 380, 87.9, 4.5),
        ("Tamil Nadu", 290, 88.6, 4.1),
        ("Gujarat", 240, 90.4, 3.9),
        ("Others", 126, 85.7, 5.2),
    ];
    LogisticsReport {
        total_shipments: 1456,
        on_time_delivery: 89.2,
        avg_delivery_time: 4.2,
        total_cost: 2_840_000.0,
        cost_per_shipment: 1950.0,
        shipment_status: ShipmentStatusCounts { delivered: 1203, in_transit: 187, processing: 66 },
        regional_performance: regions
            .iter()
            .map(|(region, shipments, on_time, avg_days)| {
                (
                    region.to_string(),
                    RegionalPerformance {
                        shipments: *shipments,
                        on_time: *on_time,
                        avg_days: *avg_days,
                    },
                )
            })
            .collect(),
    }
}

/// Issues a receipt for a report document of the requested kind.
#[instrument(skip(request, now), fields(report_type = %request.report_type))]
pub fn generate(request: &GenerateReportRequest, now: NaiveDateTime) -> Result<ReportReceipt> {
    let kind: ReportKind = request.report_type.parse().map_err(ComputeError::NotFound)?;
    if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
        if start > end {
            return Err(ComputeError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
    }

    let file_name = format!("report_{}_{}.pdf", kind.slug(), now.format("%Y%m%d"));
    let receipt = ReportReceipt {
        report_id: format!("RPT-{}", &Uuid::new_v4().simple().to_string().to_uppercase()[..8]),
        report_type: kind.slug().to_string(),
        download_url: format!("/downloads/{}", file_name),
        file_name,
        status: "generated".to_string(),
        start_date: request.start_date,
        end_date: request.end_date,
        generated_at: now,
        pages: REPORT_PAGES,
    };
    info!("Generated report {} as {}", receipt.report_id, receipt.file_name);
    Ok(receipt)
}
