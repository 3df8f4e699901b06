//! Cities the dashboard knows coordinates for.
//!
//! Used for distances and weather sampling on the server and as the
//! choices of the city picker in the browser.

/// A known city with its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const CITIES: [City; 22] = [
    City { name: "Bangalore", lat: 12.9716, lon: 77.5946 },
    City { name: "Mumbai", lat: 19.0760, lon: 72.8777 },
    City { name: "Delhi", lat: 28.7041, lon: 77.1025 },
    City { name: "Chennai", lat: 13.0827, lon: 80.2707 },
    City { name: "Hyderabad", lat: 17.3850, lon: 78.4867 },
    City { name: "Pune", lat: 18.5204, lon: 73.8567 },
    City { name: "Kolkata", lat: 22.5726, lon: 88.3639 },
    City { name: "Ahmedabad", lat: 23.0225, lon: 72.5714 },
    City { name: "Jaipur", lat: 26.9124, lon: 75.7873 },
    City { name: "Lucknow", lat: 26.8467, lon: 80.9462 },
    City { name: "Kochi", lat: 9.9312, lon: 76.2673 },
    City { name: "Coimbatore", lat: 11.0168, lon: 76.9558 },
    City { name: "Surat", lat: 21.1702, lon: 72.8311 },
    City { name: "Nagpur", lat: 21.1458, lon: 79.0882 },
    City { name: "Indore", lat: 22.7196, lon: 75.8577 },
    City { name: "Bhopal", lat: 23.2599, lon: 77.4126 },
    City { name: "Patna", lat: 25.5941, lon: 85.1376 },
    City { name: "Guwahati", lat: 26.1445, lon: 91.7362 },
    City { name: "Chandigarh", lat: 30.7333, lon: 76.7794 },
    City { name: "Visakhapatnam", lat: 17.6868, lon: 83.2185 },
    City { name: "Mysore", lat: 12.2958, lon: 76.6394 },
    City { name: "Goa", lat: 15.2993, lon: 74.1240 },
];

pub fn city_named(name: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}
