//! Indian retail calendar: festivals, shopping seasons and per-business
//! demand patterns.
//!
//! Festival dates are fixed month/day pairs re-used for every year. They are
//! close enough for retail planning and keep the forecast deterministic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::calendar::{
    BusinessPattern, CalendarFestival, FestivalCalendar, FestivalSeason, Impact, MonsoonImpact,
    SeasonalPatterns, ShoppingSeason,
};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

pub const MIN_CALENDAR_YEAR: i32 = 2000;
pub const MAX_CALENDAR_YEAR: i32 = 2100;
pub const DEFAULT_CALENDAR_YEAR: i32 = 2025;

const MARKET: &str = "India";

struct MajorFestival {
    name: &'static str,
    month: u32,
    day: u32,
    impact: Impact,
    duration: &'static str,
}

struct RegionalFestival {
    name: &'static str,
    month: u32,
    day: u32,
    impact: Impact,
    regions: &'static [&'static str],
}

const MAJOR_FESTIVALS: [MajorFestival; 14] = [
    MajorFestival {
        name: "Diwali",
        month: 11,
        day: 1,
        impact: Impact::VeryHigh,
        duration: "5 days",
    },
    MajorFestival {
        name: "Dussehra",
        month: 10,
        day: 12,
        impact: Impact::High,
        duration: "10 days",
    },
    MajorFestival { name: "Holi", month: 3, day: 14, impact: Impact::Medium, duration: "2 days" },
    MajorFestival {
        name: "Karwa Chauth",
        month: 10,
        day: 20,
        impact: Impact::Medium,
        duration: "1 day",
    },
    MajorFestival {
        name: "Raksha Bandhan",
        month: 8,
        day: 18,
        impact: Impact::Medium,
        duration: "1 day",
    },
    MajorFestival {
        name: "Eid al-Fitr",
        month: 4,
        day: 1,
        impact: Impact::High,
        duration: "1 day",
    },
    MajorFestival {
        name: "Eid al-Adha",
        month: 6,
        day: 8,
        impact: Impact::Medium,
        duration: "1 day",
    },
    MajorFestival {
        name: "Christmas",
        month: 12,
        day: 25,
        impact: Impact::Medium,
        duration: "1 day",
    },
    MajorFestival { name: "New Year", month: 1, day: 1, impact: Impact::Medium, duration: "1 day" },
    MajorFestival {
        name: "Makar Sankranti",
        month: 1,
        day: 14,
        impact: Impact::Medium,
        duration: "1 day",
    },
    MajorFestival { name: "Lohri", month: 1, day: 13, impact: Impact::Medium, duration: "1 day" },
    MajorFestival {
        name: "Baisakhi",
        month: 4,
        day: 13,
        impact: Impact::Medium,
        duration: "1 day",
    },
    MajorFestival {
        name: "Janmashtami",
        month: 8,
        day: 16,
        impact: Impact::Medium,
        duration: "1 day",
    },
    MajorFestival { name: "Navratri", month: 9, day: 25, impact: Impact::High, duration: "9 days" },
];

const REGIONAL_FESTIVALS: [RegionalFestival; 10] = [
    RegionalFestival {
        name: "Ganesh Chaturthi",
        month: 8,
        day: 29,
        impact: Impact::High,
        regions: &["Maharashtra"],
    },
    RegionalFestival {
        name: "Durga Puja",
        month: 10,
        day: 7,
        impact: Impact::VeryHigh,
        regions: &["West Bengal"],
    },
    RegionalFestival { name: "Onam", month: 9, day: 5, impact: Impact::High, regions: &["Kerala"] },
    RegionalFestival {
        name: "Pongal",
        month: 1,
        day: 14,
        impact: Impact::High,
        regions: &["Tamil Nadu"],
    },
    RegionalFestival {
        name: "Ugadi",
        month: 3,
        day: 30,
        impact: Impact::Medium,
        regions: &["Karnataka", "Andhra Pradesh"],
    },
    RegionalFestival {
        name: "Bihu",
        month: 4,
        day: 14,
        impact: Impact::Medium,
        regions: &["Assam"],
    },
    RegionalFestival {
        name: "Vishu",
        month: 4,
        day: 14,
        impact: Impact::Medium,
        regions: &["Kerala"],
    },
    RegionalFestival {
        name: "Gudi Padwa",
        month: 4,
        day: 1,
        impact: Impact::Medium,
        regions: &["Maharashtra"],
    },
    RegionalFestival {
        name: "Mahavir Jayanti",
        month: 4,
        day: 10,
        impact: Impact::Medium,
        regions: &["Pan India"],
    },
    RegionalFestival {
        name: "Guru Nanak Jayanti",
        month: 11,
        day: 5,
        impact: Impact::Medium,
        regions: &["Punjab"],
    },
];

const SHOPPING_SEASONS: [(&str, &str, Impact); 3] = [
    ("Wedding Season", "Nov-Feb", Impact::High),
    ("Back to School", "June-July", Impact::Medium),
    ("Summer Shopping", "March-May", Impact::Medium),
];

fn festival_date(year: i32, month: u32, day: u32, name: &str) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ComputeError::Calendar(format!("{} has no date in {}", name, year)))
}

/// Builds the festival calendar of one year.
#[instrument]
pub fn festival_calendar(year: i32) -> Result<FestivalCalendar> {
    if !(MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR).contains(&year) {
        return Err(ComputeError::Validation(format!(
            "Year must be between {} and {}",
            MIN_CALENDAR_YEAR, MAX_CALENDAR_YEAR
        )));
    }

    let major_festivals = MAJOR_FESTIVALS
        .iter()
        .map(|f| {
            Ok(CalendarFestival {
                name: f.name.to_string(),
                date: festival_date(year, f.month, f.day, f.name)?,
                impact: f.impact,
                duration: Some(f.duration.to_string()),
                regions: Vec::new(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let regional_festivals = REGIONAL_FESTIVALS
        .iter()
        .map(|f| {
            Ok(CalendarFestival {
                name: f.name.to_string(),
                date: festival_date(year, f.month, f.day, f.name)?,
                impact: f.impact,
                duration: None,
                regions: f.regions.iter().map(|r| r.to_string()).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let shopping_seasons = SHOPPING_SEASONS
        .iter()
        .map(|(name, period, impact)| ShoppingSeason {
            name: name.to_string(),
            period: period.to_string(),
            impact: *impact,
        })
        .collect();

    debug!(
        "Built calendar for {} with {} major and {} regional festivals",
        year,
        major_festivals.len(),
        regional_festivals.len()
    );

    Ok(FestivalCalendar {
        year,
        market: MARKET.to_string(),
        major_festivals,
        regional_festivals,
        shopping_seasons,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Demand pattern of a business type. Unknown types get the grocery pattern.
pub fn business_pattern(business_type: &str) -> BusinessPattern {
    match business_type {
        "Electronics Store" => BusinessPattern {
            category: "Consumer Durables".to_string(),
            demand_patterns: strings(&["Festival gifting", "Bonus season", "New launches"]),
            seasonal_peaks: strings(&["Diwali", "New Year", "Back to school"]),
            price_sensitivity: "Medium".to_string(),
        },
        "Clothing Store" => BusinessPattern {
            category: "Fashion Retail".to_string(),
            demand_patterns: strings(&["Seasonal wear", "Festival attire", "Wedding shopping"]),
            seasonal_peaks: strings(&["Wedding season", "Festival season", "Summer/Winter"]),
            price_sensitivity: "Medium".to_string(),
        },
        _ => BusinessPattern {
            category: "Essential Retail".to_string(),
            demand_patterns: strings(&["Daily necessities", "Festival cooking", "Bulk purchasing"]),
            seasonal_peaks: strings(&["Festival seasons", "Wedding months", "Harvest periods"]),
            price_sensitivity: "High".to_string(),
        },
    }
}

/// Seasonal demand patterns for a business type at a location.
pub fn seasonal_patterns(business_type: &str, location: &str) -> SeasonalPatterns {
    let festival_seasons = BTreeMap::from([
        (
            "diwali".to_string(),
            FestivalSeason { period: "Oct-Nov".to_string(), impact: "+50-70%".to_string() },
        ),
        (
            "regional".to_string(),
            FestivalSeason { period: "varies".to_string(), impact: "+20-35%".to_string() },
        ),
        (
            "wedding".to_string(),
            FestivalSeason {
                period: "Nov-Feb, Apr-May".to_string(),
                impact: "+25-40%".to_string(),
            },
        ),
    ]);

    SeasonalPatterns {
        business_type: business_type.to_string(),
        location: location.to_string(),
        monsoon_impact: MonsoonImpact {
            period: "June-September".to_string(),
            effect: "Reduced footfall but increased essential goods demand".to_string(),
            adjustment_factor: 0.85,
        },
        festival_seasons,
        business_specific: business_pattern(business_type),
    }
}

/// Deterministic score in `base..=base + spread` derived from a label.
///
/// The first 32 bits of the label's SHA-256 pick the offset, so the same
/// label always scores the same across runs and machines.
pub fn stable_score(label: &str, base: u32, spread: u32) -> u32 {
    let digest = Sha256::digest(label.as_bytes());
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    base + head % (spread + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_has_all_festivals() {
        let calendar = festival_calendar(2025).unwrap();
        assert_eq!(calendar.major_festivals.len(), 14);
        assert_eq!(calendar.regional_festivals.len(), 10);
        assert_eq!(calendar.shopping_seasons.len(), 3);

        let diwali = &calendar.major_festivals[0];
        assert_eq!(diwali.name, "Diwali");
        assert_eq!(diwali.date, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(diwali.impact, Impact::VeryHigh);
        assert_eq!(diwali.duration.as_deref(), Some("5 days"));

        let ugadi = calendar
            .regional_festivals
            .iter()
            .find(|f| f.name == "Ugadi")
            .unwrap();
        assert_eq!(ugadi.regions, vec!["Karnataka", "Andhra Pradesh"]);
    }

    #[test]
    fn test_calendar_follows_requested_year() {
        let calendar = festival_calendar(2031).unwrap();
        assert!(calendar.all_festivals().all(|f| f.date.format("%Y").to_string() == "2031"));
    }

    #[test]
    fn test_calendar_rejects_out_of_range_year() {
        assert!(matches!(festival_calendar(1999), Err(ComputeError::Validation(_))));
        assert!(matches!(festival_calendar(2101), Err(ComputeError::Validation(_))));
    }

    #[test]
    fn test_unknown_business_uses_grocery_pattern() {
        assert_eq!(business_pattern("Medical Store"), business_pattern("Grocery Store"));
        assert_eq!(business_pattern("Electronics Store").category, "Consumer Durables");
    }

    #[test]
    fn test_seasonal_patterns_shape() {
        let patterns = seasonal_patterns("Clothing Store", "Kerala");
        assert_eq!(patterns.monsoon_impact.adjustment_factor, 0.85);
        assert_eq!(patterns.festival_seasons["diwali"].impact, "+50-70%");
        assert_eq!(patterns.business_specific.category, "Fashion Retail");
    }

    #[test]
    fn test_stable_score_is_deterministic_and_bounded() {
        let first = stable_score("Diwali-2025-11-01", 50, 12);
        assert_eq!(first, stable_score("Diwali-2025-11-01", 50, 12));
        for label in ["a", "b", "Holi-2026-03-14", "Winter-2025-12-01"] {
            let score = stable_score(label, 20, 15);
            assert!((20..=35).contains(&score));
        }
        assert_eq!(stable_score("anything", 7, 0), 7);
    }
}
