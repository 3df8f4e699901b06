//! Shipments, routes and carrier quotes.
//!
//! Shipment records are plain [`Shipment`] values here; persistence is the
//! caller's job. Every function that needs the current date takes it as an
//! argument so results are reproducible.

pub mod geo;
pub mod providers;
pub mod routes;

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use common::logistics::{
    CreateShipmentRequest, LogisticsAnalytics, PerformanceTrends, Shipment, ShipmentStatus,
    StatusHistoryEntry, StatusUpdateRequest, TrackingInfo, TrendWindow,
};
use common::{round1, round2};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{ComputeError, Result};
use geo::{distance_km, next_checkpoint};

pub const BASE_HANDLING_COST: f64 = 100.0;
pub const COST_PER_KG: f64 = 15.0;
pub const COST_PER_ITEM: f64 = 25.0;
pub const COST_PER_KM: f64 = 5.0;
/// Reported when no shipment has been delivered yet.
pub const DEFAULT_DELIVERY_DAYS: f64 = 4.2;
const TREND_WINDOW_DAYS: i64 = 30;
const WAREHOUSE_LOCATION: &str = "Bangalore Warehouse";

/// `SHP-` followed by eight upper-case hex digits.
pub fn new_shipment_id() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("SHP-{}", &hex[..8])
}

/// Handling, weight, item and distance charges, rounded to paise.
pub fn shipping_cost(weight_kg: f64, items_count: u32, distance_km: f64) -> f64 {
    round2(
        BASE_HANDLING_COST
            + weight_kg * COST_PER_KG
            + f64::from(items_count) * COST_PER_ITEM
            + distance_km * COST_PER_KM,
    )
}

/// Builds a new shipment in `Processing` state.
#[instrument(skip(request, now), fields(destination = %request.destination))]
pub fn create_shipment(request: &CreateShipmentRequest, now: NaiveDateTime) -> Result<Shipment> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(ComputeError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let origin = request.origin_or_default().to_string();
    let destination = request.destination.trim().to_string();
    let items_count = request.items_count_or_default();
    let weight = request.weight_or_default();
    let distance = distance_km(&origin, &destination);
    let today = now.date();
    let eta = today + Duration::days(i64::from(request.estimated_days_or_default()));

    let shipment = Shipment {
        id: new_shipment_id(),
        status: ShipmentStatus::Processing,
        transport_mode: request.transport_mode.unwrap_or_default(),
        priority: request.priority.unwrap_or_default(),
        items_count,
        total_weight: weight,
        items: request.items.clone(),
        notes: request.notes.clone().unwrap_or_default(),
        cost: shipping_cost(weight, items_count, distance),
        created_date: today,
        shipped_date: None,
        eta,
        actual_delivery: None,
        tracking_info: TrackingInfo {
            last_update: now,
            location: WAREHOUSE_LOCATION.to_string(),
            next_checkpoint: Some(next_checkpoint(&origin, &destination).to_string()),
            status_history: vec![StatusHistoryEntry {
                status: ShipmentStatus::Processing,
                timestamp: now,
                location: WAREHOUSE_LOCATION.to_string(),
                message: Some("Shipment created".to_string()),
            }],
        },
        origin,
        destination,
    };
    info!("Created shipment {} costing {}", shipment.id, shipment.cost);
    Ok(shipment)
}

/// Moves a shipment to a new status and records it in the history.
///
/// Leaving `Processing` for `In Transit` stamps the ship date and reaching
/// `Delivered` stamps the delivery date.
#[instrument(skip(shipment, update, now), fields(shipment_id = %shipment.id))]
pub fn apply_status_update(
    shipment: &mut Shipment,
    update: &StatusUpdateRequest,
    now: NaiveDateTime,
) -> Result<()> {
    let status: ShipmentStatus = update.status.parse().map_err(ComputeError::Validation)?;
    let previous = shipment.status;
    let today = now.date();

    if status == ShipmentStatus::InTransit && previous == ShipmentStatus::Processing {
        shipment.shipped_date.get_or_insert(today);
    }
    if status == ShipmentStatus::Delivered {
        shipment.actual_delivery = Some(today);
        shipment.tracking_info.next_checkpoint = None;
    }
    shipment.status = status;

    let tracking = &mut shipment.tracking_info;
    if let Some(location) = update.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        tracking.location = location.to_string();
    } else if status == ShipmentStatus::Delivered {
        tracking.location = shipment.destination.clone();
    }
    tracking.last_update = now;
    tracking.status_history.push(StatusHistoryEntry {
        status,
        timestamp: now,
        location: tracking.location.clone(),
        message: update.message.clone(),
    });

    debug!("Shipment {} moved from {} to {}", shipment.id, previous, status);
    Ok(())
}

/// Keeps shipments whose status matches, ignoring case. No filter keeps all.
pub fn filter_by_status(shipments: Vec<Shipment>, status: Option<&str>) -> Vec<Shipment> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(status) => shipments
            .into_iter()
            .filter(|s| s.status.as_str().eq_ignore_ascii_case(status))
            .collect(),
        None => shipments,
    }
}

fn on_time_rate(shipments: &[&Shipment]) -> f64 {
    let delivered: Vec<bool> = shipments.iter().filter_map(|s| s.delivered_on_time()).collect();
    if delivered.is_empty() {
        return 0.0;
    }
    let on_time = delivered.iter().filter(|on_time| **on_time).count();
    round1(on_time as f64 / delivered.len() as f64 * 100.0)
}

fn average_cost(shipments: &[&Shipment]) -> f64 {
    if shipments.is_empty() {
        return 0.0;
    }
    round2(shipments.iter().map(|s| s.cost).sum::<f64>() / shipments.len() as f64)
}

/// Delivery performance over all shipments, with a trailing 30-day window
/// ending `today`.
#[instrument(skip(shipments), fields(num_shipments = shipments.len()))]
pub fn analytics(shipments: &[Shipment], today: NaiveDate) -> LogisticsAnalytics {
    let all: Vec<&Shipment> = shipments.iter().collect();

    let mut status_breakdown = BTreeMap::new();
    for shipment in shipments {
        *status_breakdown.entry(shipment.status.as_str().to_string()).or_insert(0) += 1;
    }

    let delivered: Vec<&Shipment> = shipments
        .iter()
        .filter(|s| s.status == ShipmentStatus::Delivered)
        .collect();
    let average_delivery_time_days = if delivered.is_empty() {
        DEFAULT_DELIVERY_DAYS
    } else {
        let days: i64 = delivered
            .iter()
            .filter_map(|s| Some((s.actual_delivery? - s.shipped_date?).num_days()))
            .sum();
        round1(days as f64 / delivered.len() as f64)
    };

    let window_start = today - Duration::days(TREND_WINDOW_DAYS);
    let recent: Vec<&Shipment> = shipments
        .iter()
        .filter(|s| s.created_date > window_start && s.created_date <= today)
        .collect();

    LogisticsAnalytics {
        total_shipments: shipments.len(),
        status_breakdown,
        on_time_delivery_rate: on_time_rate(&all),
        average_delivery_time_days,
        total_shipping_cost: round2(shipments.iter().map(|s| s.cost).sum()),
        average_cost_per_shipment: average_cost(&all),
        performance_trends: PerformanceTrends {
            last_30_days: TrendWindow {
                shipments: recent.len(),
                on_time_rate: on_time_rate(&recent),
                avg_cost: average_cost(&recent),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::logistics::{Priority, TransportMode, DEFAULT_ORIGIN};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn request(destination: &str) -> CreateShipmentRequest {
        CreateShipmentRequest { destination: destination.to_string(), ..Default::default() }
    }

    #[test]
    fn test_shipment_id_format() {
        let id = new_shipment_id();
        assert_eq!(id.len(), 12);
        assert!(id.starts_with("SHP-"));
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        assert_ne!(id, new_shipment_id());
    }

    #[test]
    fn test_create_with_defaults() {
        let shipment = create_shipment(&request("Mumbai"), at(2025, 9, 14, 11)).unwrap();
        assert_eq!(shipment.origin, DEFAULT_ORIGIN);
        assert_eq!(shipment.status, ShipmentStatus::Processing);
        assert_eq!(shipment.transport_mode, TransportMode::Road);
        assert_eq!(shipment.priority, Priority::Standard);
        assert_eq!(shipment.items_count, 1);
        // 100 + 150 + 25 + 980 * 5
        assert_eq!(shipment.cost, 5175.0);
        assert_eq!(shipment.eta, NaiveDate::from_ymd_opt(2025, 9, 18).unwrap());
        assert_eq!(shipment.tracking_info.next_checkpoint.as_deref(), Some("Pune Hub"));
        assert_eq!(shipment.tracking_info.status_history.len(), 1);
    }

    #[test]
    fn test_create_unknown_destination_uses_default_distance() {
        let mut req = request("Atlantis");
        req.weight = Some(2.0);
        req.items_count = Some(3);
        let shipment = create_shipment(&req, at(2025, 9, 14, 11)).unwrap();
        // 100 + 30 + 75 + 2500
        assert_eq!(shipment.cost, 2705.0);
        assert_eq!(shipment.tracking_info.next_checkpoint.as_deref(), Some("Regional Hub"));
    }

    #[test]
    fn test_create_rejects_blank_destination() {
        assert!(matches!(
            create_shipment(&request("   "), at(2025, 9, 14, 11)),
            Err(ComputeError::Validation(_))
        ));
    }

    #[test]
    fn test_status_lifecycle() {
        let mut shipment = create_shipment(&request("Chennai"), at(2025, 9, 14, 11)).unwrap();

        let transit = StatusUpdateRequest {
            status: "in transit".into(),
            location: Some("Hosur".into()),
            message: None,
        };
        apply_status_update(&mut shipment, &transit, at(2025, 9, 15, 8)).unwrap();
        assert_eq!(shipment.status, ShipmentStatus::InTransit);
        assert_eq!(shipment.shipped_date, NaiveDate::from_ymd_opt(2025, 9, 15));
        assert_eq!(shipment.tracking_info.location, "Hosur");

        let delivered = StatusUpdateRequest {
            status: "Delivered".into(),
            location: None,
            message: Some("Signed".into()),
        };
        apply_status_update(&mut shipment, &delivered, at(2025, 9, 16, 17)).unwrap();
        assert_eq!(shipment.actual_delivery, NaiveDate::from_ymd_opt(2025, 9, 16));
        assert_eq!(shipment.tracking_info.location, "Chennai");
        assert_eq!(shipment.tracking_info.next_checkpoint, None);
        assert_eq!(shipment.tracking_info.status_history.len(), 3);
        assert_eq!(shipment.delivered_on_time(), Some(true));
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let mut shipment = create_shipment(&request("Chennai"), at(2025, 9, 14, 11)).unwrap();
        let before = shipment.clone();
        let bad = StatusUpdateRequest { status: "Lost".into(), location: None, message: None };
        let err = apply_status_update(&mut shipment, &bad, at(2025, 9, 15, 8)).unwrap_err();
        assert!(err.to_string().contains("Status must be one of"));
        assert_eq!(shipment, before);
    }

    fn delivered(id: &str, shipped: u32, actual: u32, eta: u32, cost: f64) -> Shipment {
        let mut shipment = create_shipment(&request("Mumbai"), at(2025, 9, shipped, 9)).unwrap();
        shipment.id = id.to_string();
        shipment.status = ShipmentStatus::Delivered;
        shipment.shipped_date = NaiveDate::from_ymd_opt(2025, 9, shipped);
        shipment.actual_delivery = NaiveDate::from_ymd_opt(2025, 9, actual);
        shipment.eta = NaiveDate::from_ymd_opt(2025, 9, eta).unwrap();
        shipment.cost = cost;
        shipment
    }

    #[test]
    fn test_analytics() {
        let shipments = vec![
            delivered("SHP-00000001", 9, 11, 12, 4250.0),
            delivered("SHP-00000002", 9, 10, 11, 2850.0),
            delivered("SHP-00000003", 1, 8, 5, 1000.0),
            create_shipment(&request("Delhi"), at(2025, 9, 12, 10)).unwrap(),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
        let analytics = analytics(&shipments, today);

        assert_eq!(analytics.total_shipments, 4);
        assert_eq!(analytics.status_breakdown["Delivered"], 3);
        assert_eq!(analytics.status_breakdown["Processing"], 1);
        assert_eq!(analytics.on_time_delivery_rate, 66.7);
        // (2 + 1 + 7) / 3
        assert_eq!(analytics.average_delivery_time_days, 3.3);
        assert_eq!(analytics.performance_trends.last_30_days.shipments, 4);
    }

    #[test]
    fn test_analytics_without_deliveries() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
        let analytics = analytics(&[], today);
        assert_eq!(analytics.average_delivery_time_days, DEFAULT_DELIVERY_DAYS);
        assert_eq!(analytics.on_time_delivery_rate, 0.0);
        assert_eq!(analytics.average_cost_per_shipment, 0.0);
    }

    #[test]
    fn test_status_filter_ignores_case() {
        let shipments = vec![
            delivered("SHP-00000001", 9, 11, 12, 4250.0),
            create_shipment(&request("Delhi"), at(2025, 9, 12, 10)).unwrap(),
        ];
        assert_eq!(filter_by_status(shipments.clone(), Some("delivered")).len(), 1);
        assert_eq!(filter_by_status(shipments.clone(), Some("")).len(), 2);
        assert_eq!(filter_by_status(shipments, None).len(), 2);
    }
}
