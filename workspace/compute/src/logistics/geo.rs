//! City lookup and road distances.

use common::cities::{City, CITIES};
use common::round1;

/// Straight lines underestimate Indian road distances by roughly a third.
pub const ROAD_FACTOR: f64 = 1.3;
/// Used when a place is not a known city.
pub const DEFAULT_DISTANCE_KM: f64 = 500.0;
pub const HUB_CITY: &str = "Bangalore";

const EARTH_RADIUS_KM: f64 = 6371.0;

const ALIASES: [(&str, &str); 5] = [
    ("bengaluru", "Bangalore"),
    ("bombay", "Mumbai"),
    ("madras", "Chennai"),
    ("calcutta", "Kolkata"),
    ("mysuru", "Mysore"),
];

/// Road distances between well-known pairs, in either direction.
const KNOWN_DISTANCES: [(&str, &str, f64); 10] = [
    ("Bangalore", "Mumbai", 980.0),
    ("Bangalore", "Delhi", 2150.0),
    ("Bangalore", "Chennai", 350.0),
    ("Bangalore", "Hyderabad", 570.0),
    ("Bangalore", "Pune", 840.0),
    ("Bangalore", "Kolkata", 1880.0),
    ("Mumbai", "Delhi", 1400.0),
    ("Mumbai", "Chennai", 1340.0),
    ("Delhi", "Chennai", 2180.0),
    ("Delhi", "Hyderabad", 1580.0),
];

const CHECKPOINTS: [(&str, &str); 6] = [
    ("Mumbai", "Pune Hub"),
    ("Delhi", "Hyderabad Hub"),
    ("Chennai", "Direct Route"),
    ("Hyderabad", "Direct Route"),
    ("Pune", "Mumbai Hub"),
    ("Kolkata", "Hyderabad Hub"),
];

/// Finds the city a place name refers to.
///
/// Matching is by containment and ignores case, so
/// "Bangalore Distribution Center" resolves to Bangalore.
pub fn find_city(place: &str) -> Option<City> {
    let lowered = place.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    if let Some(city) = CITIES.iter().find(|c| lowered.contains(&c.name.to_lowercase())) {
        return Some(*city);
    }
    ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(alias))
        .and_then(|(_, name)| CITIES.iter().find(|c| c.name == *name).copied())
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

fn table_distance(a: &str, b: &str) -> Option<f64> {
    KNOWN_DISTANCES
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, km)| *km)
}

/// Road distance between two places in kilometres.
///
/// Known pairs come from the distance table, other known cities from the
/// great-circle distance times [`ROAD_FACTOR`]. Anything else is
/// [`DEFAULT_DISTANCE_KM`].
pub fn distance_km(origin: &str, destination: &str) -> f64 {
    match (find_city(origin), find_city(destination)) {
        (Some(a), Some(b)) if a.name == b.name => 0.0,
        (Some(a), Some(b)) => table_distance(a.name, b.name)
            .unwrap_or_else(|| round1(haversine_km(a.lat, a.lon, b.lat, b.lon) * ROAD_FACTOR)),
        _ => DEFAULT_DISTANCE_KM,
    }
}

/// First hub a shipment passes on its way out of the hub city.
pub fn next_checkpoint(origin: &str, destination: &str) -> &'static str {
    let from_hub = find_city(origin).map(|c| c.name == HUB_CITY).unwrap_or(false);
    let to = find_city(destination).map(|c| c.name);
    match (from_hub, to) {
        (true, Some(to)) => CHECKPOINTS
            .iter()
            .find(|(city, _)| *city == to)
            .map(|(_, checkpoint)| *checkpoint)
            .unwrap_or("Regional Hub"),
        _ => "Regional Hub",
    }
}

/// `samples` evenly spaced points on the great circle from `from` to `to`,
/// both ends included. Points are `(lat, lon)` in degrees.
pub fn sample_segment(from: (f64, f64), to: (f64, f64), samples: usize) -> Vec<(f64, f64)> {
    if samples < 2 {
        return vec![from];
    }
    let (a, b) = (unit_vector(from), unit_vector(to));
    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2]).clamp(-1.0, 1.0);
    let omega = dot.acos();
    let steps = (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            if i == 0 {
                return from;
            }
            if i == samples - 1 {
                return to;
            }
            let t = i as f64 / steps;
            // coincident or antipodal ends have no unique great circle
            if omega.sin().abs() < 1e-12 {
                return (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
            }
            let wa = ((1.0 - t) * omega).sin() / omega.sin();
            let wb = (t * omega).sin() / omega.sin();
            to_lat_lon([
                wa * a[0] + wb * b[0],
                wa * a[1] + wb * b[1],
                wa * a[2] + wb * b[2],
            ])
        })
        .collect()
}

fn unit_vector((lat, lon): (f64, f64)) -> [f64; 3] {
    let (phi, lambda) = (lat.to_radians(), lon.to_radians());
    [phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin()]
}

fn to_lat_lon(v: [f64; 3]) -> (f64, f64) {
    let lat = v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt());
    let lon = v[1].atan2(v[0]);
    (lat.to_degrees(), lon.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_city_by_containment_and_alias() {
        assert_eq!(find_city("Bangalore Distribution Center").unwrap().name, "Bangalore");
        assert_eq!(find_city("bengaluru").unwrap().name, "Bangalore");
        assert_eq!(find_city("  mumbai port ").unwrap().name, "Mumbai");
        assert!(find_city("Atlantis").is_none());
        assert!(find_city("").is_none());
    }

    #[test]
    fn test_table_distance_either_direction() {
        assert_eq!(distance_km("Bangalore", "Mumbai"), 980.0);
        assert_eq!(distance_km("Mumbai", "Bangalore Distribution Center"), 980.0);
        assert_eq!(distance_km("Hyderabad", "Delhi"), 1580.0);
    }

    #[test]
    fn test_haversine_fallback() {
        let km = distance_km("Bangalore", "Mysore");
        // ~127 km straight, times the road factor
        assert!(km > 150.0 && km < 180.0, "got {}", km);
        assert_eq!(distance_km("Atlantis", "Mumbai"), DEFAULT_DISTANCE_KM);
        assert_eq!(distance_km("Chennai", "Chennai Port"), 0.0);
    }

    #[test]
    fn test_haversine_known_value() {
        let km = haversine_km(12.9716, 77.5946, 13.0827, 80.2707);
        assert!((km - 290.0).abs() < 5.0, "got {}", km);
    }

    #[test]
    fn test_checkpoints() {
        assert_eq!(next_checkpoint("Bangalore Distribution Center", "Mumbai"), "Pune Hub");
        assert_eq!(next_checkpoint("Bangalore", "Chennai"), "Direct Route");
        assert_eq!(next_checkpoint("Bangalore", "Jaipur"), "Regional Hub");
        assert_eq!(next_checkpoint("Delhi", "Mumbai"), "Regional Hub");
    }

    #[test]
    fn test_sample_segment_includes_ends() {
        let points = sample_segment((10.0, 70.0), (20.0, 80.0), 3);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], (10.0, 70.0));
        assert_eq!(points[2], (20.0, 80.0));
        assert_eq!(sample_segment((1.0, 2.0), (3.0, 4.0), 1), vec![(1.0, 2.0)]);
    }

    #[test]
    fn test_sample_segment_follows_great_circle() {
        let (from, to) = ((28.7041, 77.1025), (13.0827, 80.2707));
        let points = sample_segment(from, to, 5);
        let total = haversine_km(from.0, from.1, to.0, to.1);
        let mid = points[2];

        let to_mid = haversine_km(from.0, from.1, mid.0, mid.1);
        let from_mid = haversine_km(mid.0, mid.1, to.0, to.1);
        assert!((to_mid - total / 2.0).abs() < 0.01);
        assert!((from_mid - total / 2.0).abs() < 0.01);

        // evenly spaced along the arc
        for pair in points.windows(2) {
            let leg = haversine_km(pair[0].0, pair[0].1, pair[1].0, pair[1].1);
            assert!((leg - total / 4.0).abs() < 0.01);
        }
        // the arc bows away from the straight lat/lon line
        let linear_lon = (from.1 + to.1) / 2.0;
        assert!((mid.1 - linear_lon).abs() > 0.01);
    }

    #[test]
    fn test_sample_segment_same_point() {
        let points = sample_segment((12.9716, 77.5946), (12.9716, 77.5946), 4);
        for (lat, lon) in points {
            assert!((lat - 12.9716).abs() < 1e-9);
            assert!((lon - 77.5946).abs() < 1e-9);
        }
    }
}
