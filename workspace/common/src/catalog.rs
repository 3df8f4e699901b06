use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

/// Supported business types.
pub const BUSINESS_TYPES: [&str; 6] = [
    "Grocery Store",
    "Electronics Store",
    "Clothing Store",
    "Medical Store",
    "Cosmetics Store",
    "Food & Beverage",
];

/// MSME size classes.
pub const BUSINESS_SCALES: [&str; 3] = ["Micro", "Small", "Medium"];

/// Indian states and union territories accepted as a location.
pub const INDIAN_STATES: [&str; 33] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jammu and Kashmir",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Ladakh",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Puducherry",
    "Chandigarh",
];

pub const MSME_CLASSIFICATION: &str = "MSME (Micro, Small, Medium Enterprise)";

/// Payload of `GET /api/demand/business-types`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BusinessTypesResponse {
    pub business_types: Vec<String>,
    pub business_scales: Vec<String>,
    pub locations: Vec<String>,
    pub classification: String,
}

impl Default for BusinessTypesResponse {
    fn default() -> Self {
        Self {
            business_types: BUSINESS_TYPES.iter().map(|s| s.to_string()).collect(),
            business_scales: BUSINESS_SCALES.iter().map(|s| s.to_string()).collect(),
            locations: INDIAN_STATES.iter().map(|s| s.to_string()).collect(),
            classification: MSME_CLASSIFICATION.to_string(),
        }
    }
}

/// Rejects values that are empty once surrounding whitespace is trimmed.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

pub fn validate_business_type(value: &str) -> Result<(), ValidationError> {
    if BUSINESS_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_business_type"))
    }
}

pub fn validate_business_scale(value: &str) -> Result<(), ValidationError> {
    if BUSINESS_SCALES.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_business_scale"))
    }
}
