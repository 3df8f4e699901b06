//! Client-side export documents: CSV, pretty JSON and a plain-text report.

use std::fmt::Write as _;
use std::string::FromUtf8Error;

use serde::Serialize;
use thiserror::Error;

use crate::forecast::Forecast;
use crate::inventory::InventoryItem;
use crate::profile::BusinessProfile;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("encoding error: {0}")]
    Encoding(#[from] FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// One flattened line of a forecast export.
#[derive(Debug, Serialize)]
struct ForecastCsvRow<'a> {
    section: &'a str,
    label: &'a str,
    value: f64,
    start: String,
    end: String,
}

fn write_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn date_or_empty(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Flattens products, festivals and seasons into one CSV document.
pub fn forecast_to_csv(forecast: &Forecast) -> Result<String> {
    let mut rows = Vec::new();
    for product in &forecast.product_demands {
        rows.push(ForecastCsvRow {
            section: "product",
            label: &product.product,
            value: product.demand_percentage,
            start: String::new(),
            end: String::new(),
        });
    }
    for festival in &forecast.festival_demands.chart {
        rows.push(ForecastCsvRow {
            section: "festival",
            label: &festival.festival,
            value: festival.demand_increase,
            start: date_or_empty(festival.date),
            end: String::new(),
        });
    }
    for season in &forecast.seasonal_demands.chart {
        rows.push(ForecastCsvRow {
            section: "season",
            label: &season.season,
            value: season.demand_surge,
            start: date_or_empty(season.start),
            end: date_or_empty(season.end),
        });
    }
    write_csv(rows)
}

#[derive(Debug, Serialize)]
struct InventoryCsvRow<'a> {
    name: &'a str,
    category: &'a str,
    sku: &'a str,
    current_stock: u32,
    min_stock_level: u32,
    max_stock_level: u32,
    unit_cost: f64,
    selling_price: f64,
    status: &'a str,
}

pub fn inventory_to_csv(items: &[InventoryItem]) -> Result<String> {
    write_csv(items.iter().map(|item| InventoryCsvRow {
        name: &item.name,
        category: &item.category,
        sku: item.sku.as_deref().unwrap_or(""),
        current_stock: item.current_stock,
        min_stock_level: item.min_stock_level,
        max_stock_level: item.max_stock_level,
        unit_cost: item.unit_cost,
        selling_price: item.selling_price,
        status: item.status.as_str(),
    }))
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Composes the human-readable forecast report offered for download.
pub fn forecast_report(profile: &BusinessProfile, forecast: &Forecast) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = writeln!(out, "DEMAND FORECAST REPORT");
    let _ = writeln!(out, "======================");
    let name = if profile.business_name.trim().is_empty() {
        "Unnamed business"
    } else {
        profile.business_name.trim()
    };
    let _ = writeln!(out, "Business: {}", name);
    let _ = writeln!(out, "Type: {} ({})", profile.business_type, profile.business_scale);
    let place: Vec<&str> = [profile.location.trim(), profile.state.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    let _ = writeln!(out, "Location: {}", place.join(", "));
    let _ = writeln!(
        out,
        "Window: {} to {}",
        date_or_empty(forecast.forecast_start),
        date_or_empty(forecast.forecast_end)
    );
    let _ = writeln!(out, "Confidence: {:.0}%", forecast.confidence_score * 100.0);

    let _ = writeln!(out, "\nTop products");
    for product in forecast.product_demands.iter().take(5) {
        let _ = writeln!(out, "  - {}: {:.1}%", product.product, product.demand_percentage);
    }

    let _ = writeln!(out, "\nFestivals");
    if forecast.festival_demands.chart.is_empty() {
        let _ = writeln!(out, "  (none in window)");
    }
    for festival in &forecast.festival_demands.chart {
        let _ = writeln!(out, "  - {}: +{:.0}%", festival.festival, festival.demand_increase);
    }

    let _ = writeln!(out, "\nSeasons");
    for season in &forecast.seasonal_demands.chart {
        let _ = writeln!(out, "  - {}: +{:.0}%", season.season, season.demand_surge);
    }

    if let Some(peak) = forecast.peak_festival() {
        let _ = writeln!(out, "\nPeak festival: {} (+{:.0}%)", peak.festival, peak.demand_increase);
    }

    let _ = writeln!(out, "\nSuggestions");
    for (i, suggestion) in forecast.suggestions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, suggestion);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{FestivalPoint, ProductDemand};
    use crate::inventory::StockStatus;
    use chrono::NaiveDate;

    fn forecast() -> Forecast {
        let mut forecast = Forecast {
            forecast_start: NaiveDate::from_ymd_opt(2025, 9, 14),
            forecast_end: NaiveDate::from_ymd_opt(2026, 3, 14),
            confidence_score: 0.75,
            product_demands: vec![ProductDemand {
                product: "Rice".into(),
                demand_percentage: 20.0,
            }],
            suggestions: vec!["Stock up early".into()],
            ..Default::default()
        };
        forecast.festival_demands.chart.push(FestivalPoint {
            festival: "Diwali, Lakshmi Puja (Oct 2025)".into(),
            demand_increase: 58.0,
            date: NaiveDate::from_ymd_opt(2025, 10, 20),
            month: "Oct".into(),
            year: Some(2025),
        });
        forecast
    }

    #[test]
    fn test_value_with_comma_is_quoted() {
        let csv = forecast_to_csv(&forecast()).unwrap();
        assert!(csv.contains("\"Diwali, Lakshmi Puja (Oct 2025)\""));
        assert!(csv.starts_with("section,label,value,start,end"));
        assert!(csv.contains("product,Rice,20.0,,"));
    }

    #[test]
    fn test_empty_forecast_exports_nothing() {
        let csv = forecast_to_csv(&Forecast::default()).unwrap();
        // csv writes the header lazily with the first row
        assert!(csv.is_empty());
    }

    #[test]
    fn test_inventory_csv() {
        let item = InventoryItem {
            id: 1,
            name: "Festival Kurta Set".into(),
            category: "Clothing".into(),
            sku: Some("CLT-001".into()),
            current_stock: 80,
            min_stock_level: 30,
            max_stock_level: 100,
            unit_cost: 800.0,
            selling_price: 1500.0,
            supplier: None,
            status: StockStatus::Healthy,
            last_updated: NaiveDate::from_ymd_opt(2025, 9, 12)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        };
        let csv = inventory_to_csv(&[item]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,category,sku,current_stock,min_stock_level,max_stock_level,\
             unit_cost,selling_price,status"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Festival Kurta Set,Clothing,CLT-001,80,30,100,800.0,1500.0,healthy"
        );
    }

    #[test]
    fn test_report_mentions_peak_and_suggestions() {
        let profile = BusinessProfile {
            business_name: "Sharma Kirana".into(),
            business_type: "Grocery Store".into(),
            business_scale: "Micro".into(),
            state: "Maharashtra".into(),
            location: "Pune".into(),
            current_sales: 30000.0,
        };
        let report = forecast_report(&profile, &forecast());
        assert!(report.contains("Business: Sharma Kirana"));
        assert!(report.contains("Location: Pune, Maharashtra\n"));
        assert!(report.contains("Peak festival: Diwali, Lakshmi Puja (Oct 2025) (+58%)"));
        assert!(report.contains("1. Stock up early"));
        assert!(report.contains("Confidence: 75%"));
    }

    #[test]
    fn test_json_export_is_pretty() {
        let json = to_json_pretty(&forecast()).unwrap();
        assert!(json.contains("\n  \"forecast_start\": \"2025-09-14\""));
    }
}
