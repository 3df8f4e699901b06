use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::forecast::ForecastRequest;

/// The user's business profile as edited on the Settings page.
///
/// Field names follow the camelCase keys stored in the browser so that a
/// profile saved by one build of the dashboard loads in the next.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    pub business_name: String,
    pub business_type: String,
    pub business_scale: String,
    /// Indian state or union territory.
    pub state: String,
    /// City or locality within the state.
    pub location: String,
    /// Current monthly sales in INR.
    pub current_sales: f64,
}

impl BusinessProfile {
    /// Names of the required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.business_type.trim().is_empty() {
            missing.push("businessType");
        }
        if self.business_scale.trim().is_empty() {
            missing.push("businessScale");
        }
        if self.state.trim().is_empty() {
            missing.push("state");
        }
        if self.location.trim().is_empty() {
            missing.push("location");
        }
        if self.current_sales <= 0.0 {
            missing.push("currentSales");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Builds the forecast request for this profile.
    /// The backend keys festivals by state, so the state is sent as location.
    pub fn to_forecast_request(&self, forecast_period: u32) -> ForecastRequest {
        let business_name = self.business_name.trim();
        ForecastRequest {
            business_name: (!business_name.is_empty()).then(|| business_name.to_string()),
            business_type: self.business_type.clone(),
            business_scale: self.business_scale.clone(),
            location: if self.state.trim().is_empty() {
                self.location.clone()
            } else {
                self.state.clone()
            },
            current_sales: self.current_sales,
            forecast_period: Some(forecast_period),
        }
    }
}

impl From<&ForecastRequest> for BusinessProfile {
    /// The profile a forecast was run for. The request carries the state
    /// only, so the city stays empty.
    fn from(request: &ForecastRequest) -> Self {
        Self {
            business_name: request.business_name.clone().unwrap_or_default(),
            business_type: request.business_type.clone(),
            business_scale: request.business_scale.clone(),
            state: request.location.clone(),
            location: String::new(),
            current_sales: request.current_sales,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BusinessProfile {
        BusinessProfile {
            business_name: "Sharma Kirana".to_string(),
            business_type: "Grocery Store".to_string(),
            business_scale: "Micro".to_string(),
            state: "Maharashtra".to_string(),
            location: "Pune".to_string(),
            current_sales: 30000.0,
        }
    }

    #[test]
    fn test_missing_fields_on_empty_profile() {
        let missing = BusinessProfile::default().missing_fields();
        assert_eq!(
            missing,
            vec!["businessType", "businessScale", "state", "location", "currentSales"]
        );
    }

    #[test]
    fn test_complete_profile() {
        assert!(sample().is_complete());
    }

    #[test]
    fn test_profile_json_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["businessType"], "Grocery Store");
        assert_eq!(json["currentSales"], 30000.0);
    }

    #[test]
    fn test_partial_profile_json_fills_defaults() {
        let profile: BusinessProfile =
            serde_json::from_str(r#"{"businessType": "Clothing Store"}"#).unwrap();
        assert_eq!(profile.business_type, "Clothing Store");
        assert_eq!(profile.current_sales, 0.0);
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_forecast_request_uses_state_as_location() {
        let request = sample().to_forecast_request(12);
        assert_eq!(request.location, "Maharashtra");
        assert_eq!(request.forecast_period, Some(12));
        assert_eq!(request.business_name.as_deref(), Some("Sharma Kirana"));
    }

    #[test]
    fn test_profile_from_forecast_request() {
        let request = sample().to_forecast_request(6);
        let profile = BusinessProfile::from(&request);
        assert_eq!(profile.business_name, "Sharma Kirana");
        assert_eq!(profile.business_type, "Grocery Store");
        assert_eq!(profile.state, "Maharashtra");
        assert!(profile.location.is_empty());
        assert_eq!(profile.current_sales, 30000.0);
    }
}
