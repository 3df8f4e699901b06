use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::calendar::BusinessPattern;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompetitorAction {
    #[default]
    None,
    Passive,
    Aggressive,
}

impl CompetitorAction {
    pub const ALL: [CompetitorAction; 3] =
        [CompetitorAction::None, CompetitorAction::Passive, CompetitorAction::Aggressive];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompetitorAction::None => "none",
            CompetitorAction::Passive => "passive",
            CompetitorAction::Aggressive => "aggressive",
        }
    }

    /// Percentage points added to the projected sales.
    pub fn impact(&self) -> f64 {
        match self {
            CompetitorAction::None => 0.0,
            CompetitorAction::Passive => 2.0,
            CompetitorAction::Aggressive => -8.0,
        }
    }
}

impl fmt::Display for CompetitorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompetitorAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompetitorAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                format!("Competitor action must be one of: none, aggressive, passive (got '{}')", s)
            })
    }
}

fn validate_competitor_action(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<CompetitorAction>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("unknown_competitor_action"))
}

fn default_seasonal_factor() -> f64 {
    1.0
}

fn default_competitor_action() -> String {
    CompetitorAction::None.as_str().to_string()
}

/// Body of `POST /api/scenarios/analyze`.
///
/// The competitor action is kept as a string so that an unknown value is a
/// validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    /// Base monthly sales in INR.
    #[validate(range(exclusive_min = 0.0))]
    pub base_sales: f64,
    /// Price change in percent.
    #[validate(range(min = -50.0, max = 100.0))]
    pub price_change: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub marketing_spend: f64,
    /// 1.0 is a normal month.
    #[serde(default = "default_seasonal_factor")]
    #[validate(range(min = 0.1, max = 5.0))]
    pub seasonal_factor: f64,
    #[serde(default = "default_competitor_action")]
    #[validate(custom(function = "validate_competitor_action"))]
    pub competitor_action: String,
}

impl ScenarioRequest {
    /// Falls back to `none` for values that did not pass validation.
    pub fn competitor(&self) -> CompetitorAction {
        self.competitor_action.parse().unwrap_or_default()
    }

    pub fn from_parameters(base_sales: f64, parameters: &ScenarioParameters) -> Self {
        Self {
            base_sales,
            price_change: parameters.price_change,
            marketing_spend: parameters.marketing_spend,
            seasonal_factor: parameters.seasonal_factor,
            competitor_action: parameters.competitor_action.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
pub struct ScenarioBreakdown {
    pub price: f64,
    pub marketing: f64,
    pub seasonal: f64,
    pub competitor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub baseline: f64,
    pub projected: f64,
    /// Sum of the breakdown, in percent.
    pub total_impact: f64,
    pub breakdown: ScenarioBreakdown,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    pub price_change: f64,
    pub marketing_spend: f64,
    pub seasonal_factor: f64,
    pub competitor_action: CompetitorAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScenarioTemplate {
    pub name: String,
    pub description: String,
    pub parameters: ScenarioParameters,
}

/// Body of `POST /api/scenarios/compare`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct CompareRequest {
    #[validate(length(min = 2, max = 5), nested)]
    pub scenarios: Vec<ScenarioRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ImpactRange {
    pub best: f64,
    pub worst: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScenarioComparison {
    pub scenarios: Vec<ScenarioResult>,
    pub best_scenario: String,
    pub worst_scenario: String,
    pub impact_range: ImpactRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CompetitorLandscape {
    pub intensity: String,
    pub key_competitors: Vec<String>,
    pub competitive_advantages: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScenarioInsights {
    pub business_type: String,
    pub location: String,
    pub price_sensitivity: String,
    pub marketing_effectiveness: String,
    pub seasonal_patterns: BusinessPattern,
    pub competitor_landscape: CompetitorLandscape,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let request: ScenarioRequest =
            serde_json::from_str(r#"{"baseSales": 100000, "priceChange": -10}"#).unwrap();
        assert_eq!(request.marketing_spend, 0.0);
        assert_eq!(request.seasonal_factor, 1.0);
        assert_eq!(request.competitor(), CompetitorAction::None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_fail_validation_not_parsing() {
        let request: ScenarioRequest = serde_json::from_str(
            r#"{"baseSales": -1000, "priceChange": 200, "competitorAction": "invalid"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("base_sales"));
        assert!(fields.contains_key("price_change"));
        assert!(fields.contains_key("competitor_action"));
    }

    #[test]
    fn test_compare_request_bounds() {
        let one = ScenarioRequest {
            base_sales: 1000.0,
            price_change: 0.0,
            marketing_spend: 0.0,
            seasonal_factor: 1.0,
            competitor_action: "none".into(),
        };
        let request = CompareRequest { scenarios: vec![one.clone()] };
        assert!(request.validate().is_err());
        let request = CompareRequest { scenarios: vec![one.clone(), one] };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_competitor_parse_is_exact() {
        assert_eq!("aggressive".parse::<CompetitorAction>().unwrap(), CompetitorAction::Aggressive);
        assert!("Aggressive".parse::<CompetitorAction>().is_err());
    }
}
