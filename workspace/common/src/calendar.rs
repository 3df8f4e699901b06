use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Retail impact of a festival or shopping season.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum Impact {
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Impact {
    pub fn is_high(&self) -> bool {
        matches!(self, Impact::High | Impact::VeryHigh)
    }

    /// Base demand increase in percent before the per-festival variation.
    pub fn base_increase(&self) -> u32 {
        match self {
            Impact::VeryHigh => 50,
            Impact::High => 35,
            Impact::Medium => 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CalendarFestival {
    pub name: String,
    pub date: NaiveDate,
    pub impact: Impact,
    /// Length of the celebration, e.g. "5 days". Major festivals only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// States that celebrate it. Regional festivals only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ShoppingSeason {
    pub name: String,
    pub period: String,
    pub impact: Impact,
}

/// Payload of `GET /api/demand/festival-calendar`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FestivalCalendar {
    pub year: i32,
    pub market: String,
    pub major_festivals: Vec<CalendarFestival>,
    pub regional_festivals: Vec<CalendarFestival>,
    pub shopping_seasons: Vec<ShoppingSeason>,
}

impl FestivalCalendar {
    pub fn all_festivals(&self) -> impl Iterator<Item = &CalendarFestival> {
        self.major_festivals.iter().chain(self.regional_festivals.iter())
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FestivalCalendarQuery {
    /// Calendar year, 2000 to 2100. Defaults to 2025.
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BusinessPattern {
    pub category: String,
    pub demand_patterns: Vec<String>,
    pub seasonal_peaks: Vec<String>,
    pub price_sensitivity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonsoonImpact {
    pub period: String,
    pub effect: String,
    pub adjustment_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FestivalSeason {
    pub period: String,
    pub impact: String,
}

/// Payload of `GET /api/demand/seasonal-patterns`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SeasonalPatterns {
    pub business_type: String,
    pub location: String,
    pub monsoon_impact: MonsoonImpact,
    pub festival_seasons: BTreeMap<String, FestivalSeason>,
    pub business_specific: BusinessPattern,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SeasonalPatternsQuery {
    /// Business type, e.g. "Grocery Store".
    #[serde(rename = "type")]
    pub business_type: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_wire_names() {
        assert_eq!(serde_json::to_value(Impact::VeryHigh).unwrap(), "Very High");
        let impact: Impact = serde_json::from_str("\"High\"").unwrap();
        assert!(impact.is_high());
        assert!(!Impact::Medium.is_high());
        assert_eq!(Impact::VeryHigh.base_increase(), 50);
    }
}
