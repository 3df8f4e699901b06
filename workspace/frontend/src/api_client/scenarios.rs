use common::scenario::{ScenarioRequest, ScenarioResult, ScenarioTemplate};

use crate::api_client;

pub async fn analyze_scenario(request: &ScenarioRequest) -> Result<ScenarioResult, String> {
    log::debug!(
        "Analyzing scenario: price {}%, marketing {}",
        request.price_change,
        request.marketing_spend
    );
    api_client::post("/scenarios/analyze", request).await
}

pub async fn get_templates() -> Result<Vec<ScenarioTemplate>, String> {
    api_client::get("/scenarios/templates").await
}
