use chrono::{Duration, NaiveDate, NaiveDateTime};
use common::logistics::{RouteOptimization, RouteSavings, RouteStop};
use common::{round1, round2};
use tracing::{debug, instrument};

use super::geo::{distance_km, HUB_CITY};
use crate::error::{ComputeError, Result};

/// Cities served first on a multi-stop route.
pub const PRIORITY_CITIES: [&str; 4] = ["Mumbai", "Delhi", "Chennai", "Hyderabad"];
pub const AVERAGE_SPEED_KMH: f64 = 60.0;
pub const COST_PER_KM: f64 = 8.0;
pub const COST_PER_STOP: f64 = 200.0;
pub const STOP_HOURS: f64 = 0.5;
const DEPARTURE_HOUR: u32 = 9;

/// Plans multi-stop delivery runs leaving the hub city at 09:00.
#[derive(Debug, Clone)]
pub struct RouteOptimizer {
    today: NaiveDate,
}

impl RouteOptimizer {
    pub fn new_with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Orders destinations naming a priority city first, each group
    /// alphabetically.
    pub fn order(destinations: &[String]) -> Vec<String> {
        let (mut priority, mut others): (Vec<String>, Vec<String>) = destinations
            .iter()
            .cloned()
            .partition(|d| PRIORITY_CITIES.iter().any(|city| d.contains(city)));
        priority.sort();
        others.sort();
        priority.extend(others);
        priority
    }

    fn departure(&self) -> Result<NaiveDateTime> {
        self.today
            .and_hms_opt(DEPARTURE_HOUR, 0, 0)
            .ok_or_else(|| ComputeError::Calendar("invalid departure time".to_string()))
    }

    #[instrument(skip(self, destinations), fields(count = destinations.len()))]
    pub fn optimize(&self, destinations: &[String]) -> Result<RouteOptimization> {
        if destinations.len() < 2 {
            return Err(ComputeError::Validation(
                "At least 2 destinations required for optimization".to_string(),
            ));
        }

        let route = Self::order(destinations);
        let departure = self.departure()?;

        let mut previous = HUB_CITY.to_string();
        let mut elapsed_hours = 0.0;
        let mut total_distance = 0.0;
        let mut route_details = Vec::with_capacity(route.len());

        for (i, destination) in route.iter().enumerate() {
            let leg = distance_km(&previous, destination);
            total_distance += leg;
            elapsed_hours += leg / AVERAGE_SPEED_KMH + STOP_HOURS;
            let arrival = departure + Duration::seconds((elapsed_hours * 3600.0).round() as i64);
            route_details.push(RouteStop {
                sequence: i + 1,
                destination: destination.clone(),
                estimated_arrival: arrival.format("%H:%M on %Y-%m-%d").to_string(),
                distance_from_previous: leg,
            });
            previous = destination.clone();
        }

        let total_distance_km = round1(total_distance);
        let estimated_time_hours = round1(total_distance_km / AVERAGE_SPEED_KMH);
        let stop_cost = route.len() as f64 * COST_PER_STOP;
        let estimated_cost = round2(total_distance_km * COST_PER_KM + stop_cost);
        debug!("Route of {} stops covers {} km", route.len(), total_distance_km);

        Ok(RouteOptimization {
            total_destinations: destinations.len(),
            total_distance_km,
            estimated_time_hours,
            estimated_cost,
            savings: RouteSavings {
                distance_saved_km: round2(total_distance_km * 0.15),
                time_saved_hours: round2(estimated_time_hours * 0.20),
                cost_saved: round2(estimated_cost * 0.15),
            },
            optimized_route: route,
            route_details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn optimizer() -> RouteOptimizer {
        RouteOptimizer::new_with_today(NaiveDate::from_ymd_opt(2025, 9, 14).unwrap())
    }

    #[test]
    fn test_priority_cities_first() {
        let order = RouteOptimizer::order(&names(&["Pune", "Mumbai", "Atlantis", "Chennai"]));
        assert_eq!(order, names(&["Chennai", "Mumbai", "Atlantis", "Pune"]));
    }

    #[test]
    fn test_optimize_chains_from_hub() {
        let result = optimizer().optimize(&names(&["Mumbai", "Chennai"])).unwrap();
        assert_eq!(result.optimized_route, names(&["Chennai", "Mumbai"]));
        // Bangalore -> Chennai 350, Chennai -> Mumbai 1340
        assert_eq!(result.total_distance_km, 1690.0);
        assert_eq!(result.estimated_time_hours, 28.2);
        assert_eq!(result.estimated_cost, 1690.0 * 8.0 + 400.0);
        assert_eq!(result.savings.distance_saved_km, 253.5);

        let first = &result.route_details[0];
        assert_eq!(first.sequence, 1);
        assert_eq!(first.distance_from_previous, 350.0);
        // 350 km at 60 km/h plus a half hour stop: 06:20 after 09:00
        assert_eq!(first.estimated_arrival, "15:20 on 2025-09-14");
        assert_eq!(result.route_details[1].distance_from_previous, 1340.0);
    }

    #[test]
    fn test_single_destination_is_rejected() {
        assert!(matches!(
            optimizer().optimize(&names(&["Mumbai"])),
            Err(ComputeError::Validation(_))
        ));
    }
}
