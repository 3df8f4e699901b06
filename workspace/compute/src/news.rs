//! Route advisories built from weather risk and the time of year.

use chrono::{Datelike, NaiveDate};
use common::logistics::{NewsItem, RiskLevel, RouteNews};

use crate::calendar::stable_score;
use crate::logistics::geo::find_city;

/// Cities north of this latitude get winter fog advisories.
const NORTHERN_LATITUDE: f64 = 23.0;

const ROAD_UPDATES: [(&str, &str); 4] = [
    (
        "Highway maintenance on the corridor",
        "Lane closures are scheduled on parts of the route. Allow extra time at toll plazas.",
    ),
    (
        "Checkpoint inspections tightened",
        "State border checkpoints are running additional document checks on freight vehicles.",
    ),
    (
        "Fuel prices steady",
        "Diesel prices along the route are unchanged this week.",
    ),
    (
        "Warehouse slots in demand",
        "Receiving docks at the destination report high utilisation in the afternoons.",
    ),
];

fn weather_item(risk: RiskLevel, origin: &str, destination: &str) -> NewsItem {
    let (title, summary) = match risk {
        RiskLevel::High => (
            "Severe weather warning",
            format!(
                "Storms or high winds are expected between {origin} and {destination}. \
                 Delays are likely."
            ),
        ),
        RiskLevel::Medium => (
            "Weather may slow transit",
            format!("Rain or wind along {origin} to {destination} may add a few hours to transit."),
        ),
        RiskLevel::Low => (
            "Clear conditions",
            format!("No weather disruption is expected between {origin} and {destination}."),
        ),
    };
    NewsItem {
        title: title.to_string(),
        summary,
        category: "weather".to_string(),
        severity: risk,
    }
}

fn is_northern(place: &str) -> bool {
    find_city(place).is_some_and(|city| city.lat >= NORTHERN_LATITUDE)
}

fn seasonal_item(origin: &str, destination: &str, today: NaiveDate) -> Option<NewsItem> {
    let (title, summary, severity) = match today.month() {
        7..=9 => (
            "Monsoon disruption watch",
            "Heavy rain can flood low-lying stretches. Monitor the route before dispatch.",
            RiskLevel::Medium,
        ),
        10 | 11 => (
            "Festive season volumes",
            "Carrier capacity is tight during the festival season. Book pickups early.",
            RiskLevel::Medium,
        ),
        12 | 1 | 2 if is_northern(origin) || is_northern(destination) => (
            "Winter fog in the north",
            "Dense morning fog reduces visibility on northern highways. Night driving is slower.",
            RiskLevel::Medium,
        ),
        4..=6 => (
            "Summer heat advisory",
            "High daytime temperatures. Protect perishable and heat-sensitive cargo.",
            RiskLevel::Low,
        ),
        _ => return None,
    };
    Some(NewsItem {
        title: title.to_string(),
        summary: summary.to_string(),
        category: "season".to_string(),
        severity,
    })
}

/// Advisories for a route on a given day, most severe first.
pub fn route_news(origin: &str, destination: &str, risk: RiskLevel, today: NaiveDate) -> RouteNews {
    let mut items = vec![weather_item(risk, origin, destination)];
    items.extend(seasonal_item(origin, destination, today));

    let label = format!("{}-{}-{}", origin.to_lowercase(), destination.to_lowercase(), today);
    let pick = stable_score(&label, 0, ROAD_UPDATES.len() as u32 - 1) as usize;
    let (title, summary) = ROAD_UPDATES[pick];
    items.push(NewsItem {
        title: title.to_string(),
        summary: summary.to_string(),
        category: "road".to_string(),
        severity: RiskLevel::Low,
    });

    items.sort_by(|a, b| b.severity.cmp(&a.severity));
    RouteNews {
        origin: origin.to_string(),
        destination: destination.to_string(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monsoon_route_news() {
        let news = route_news("Bangalore", "Mumbai", RiskLevel::High, day(2025, 9, 14));
        assert_eq!(news.items.len(), 3);
        assert_eq!(news.items[0].severity, RiskLevel::High);
        assert_eq!(news.items[0].category, "weather");
        assert!(news.items.iter().any(|i| i.title == "Monsoon disruption watch"));
    }

    #[test]
    fn test_winter_fog_only_for_northern_routes() {
        let north = route_news("Bangalore", "Delhi", RiskLevel::Low, day(2026, 1, 10));
        assert!(north.items.iter().any(|i| i.title.starts_with("Winter fog")));

        let south = route_news("Bangalore", "Chennai", RiskLevel::Low, day(2026, 1, 10));
        assert_eq!(south.items.len(), 2);
    }

    #[test]
    fn test_news_is_deterministic() {
        let a = route_news("Pune", "Goa", RiskLevel::Medium, day(2025, 3, 2));
        let b = route_news("Pune", "Goa", RiskLevel::Medium, day(2025, 3, 2));
        assert_eq!(a, b);
    }
}
