use crate::schemas::{ApiResponse, ErrorResponse};
use crate::config::AppConfig;
use crate::test_utils::{setup_test_server, setup_test_server_with};
use axum::http::StatusCode;
use serde_json::{json, Value};

fn forecast_body() -> Value {
    json!({
        "businessName": "Test Electronics",
        "businessType": "Electronics Store",
        "businessScale": "Small",
        "location": "Karnataka",
        "currentSales": 50000.0,
        "forecastPeriod": 6
    })
}

fn error_code(response: &axum_test::TestResponse) -> String {
    let body: ErrorResponse = response.json();
    assert!(!body.success);
    body.code
}

#[tokio::test]
async fn test_root_and_health() {
    let server = setup_test_server().await;

    let root = server.get("/").await;
    root.assert_status_ok();
    let body: Value = root.json();
    assert_eq!(body["name"], "AI Supply Chain Management Platform");
    assert_eq!(body["docs"], "/swagger-ui");

    let health = server.get("/health").await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let server = setup_test_server().await;

    let response = server.get("/api/unknown").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_code(&response), "NOT_FOUND");

    server
        .delete("/api/reports/sales")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_create_and_reload_forecast() {
    let server = setup_test_server().await;

    let response = server.post("/api/demand/forecast").json(&forecast_body()).await;
    response.assert_status(StatusCode::CREATED);
    let body: ApiResponse<Value> = response.json();
    assert!(body.success);
    let record = body.data;
    let forecast = &record["forecast"];
    assert_eq!(forecast["forecast_start"], "2025-09-14");
    assert_eq!(forecast["forecast_end"], "2026-03-14");
    assert_eq!(forecast["confidence_score"], 0.75);
    assert_eq!(forecast["product_demands"].as_array().unwrap().len(), 10);
    assert_eq!(forecast["product_demands"][0]["demand_percentage"], 16.0);
    assert!(!forecast["festival_demands"]["chart"].as_array().unwrap().is_empty());
    assert!(!forecast["suggestions"].as_array().unwrap().is_empty());

    let id = record["id"].as_i64().unwrap();
    let reloaded = server.get(&format!("/api/demand/forecast/{}", id)).await;
    reloaded.assert_status_ok();
    let reloaded: ApiResponse<Value> = reloaded.json();
    assert_eq!(reloaded.data["forecast"], record["forecast"]);
    assert_eq!(reloaded.data["request"]["businessType"], "Electronics Store");
}

#[tokio::test]
async fn test_forecast_uses_default_period() {
    let server = setup_test_server().await;
    let mut body = forecast_body();
    body.as_object_mut().unwrap().remove("forecastPeriod");

    let response = server.post("/api/demand/forecast").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    let body: ApiResponse<Value> = response.json();
    assert_eq!(body.data["request"]["forecastPeriod"], 6);
    assert_eq!(body.data["forecast"]["forecast_end"], "2026-03-14");
}

#[tokio::test]
async fn test_forecast_validation() {
    let server = setup_test_server().await;

    let mut low_sales = forecast_body();
    low_sales["currentSales"] = json!(500.0);
    let response = server.post("/api/demand/forecast").json(&low_sales).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let mut unknown_type = forecast_body();
    unknown_type["businessType"] = json!("Car Dealer");
    server
        .post("/api/demand/forecast")
        .json(&unknown_type)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut long_period = forecast_body();
    long_period["forecastPeriod"] = json!(48);
    let response = server.post("/api/demand/forecast").json(&long_period).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "VALIDATION_ERROR");

    let mut blank_location = forecast_body();
    blank_location["location"] = json!("   ");
    server
        .post("/api/demand/forecast")
        .json(&blank_location)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut zero_period = forecast_body();
    zero_period["forecastPeriod"] = json!(0);
    server
        .post("/api/demand/forecast")
        .json(&zero_period)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut missing = forecast_body();
    missing.as_object_mut().unwrap().remove("businessType");
    server
        .post("/api/demand/forecast")
        .json(&missing)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_forecast_period_limit_follows_config() {
    let config = AppConfig { max_forecast_months: 48, ..AppConfig::default() };
    let server = setup_test_server_with(config).await;

    let mut long_period = forecast_body();
    long_period["forecastPeriod"] = json!(48);
    let response = server.post("/api/demand/forecast").json(&long_period).await;
    response.assert_status(StatusCode::CREATED);
    let body: ApiResponse<Value> = response.json();
    assert_eq!(body.data["request"]["forecastPeriod"], 48);

    long_period["forecastPeriod"] = json!(49);
    let response = server.post("/api/demand/forecast").json(&long_period).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_forecast_is_not_found() {
    let server = setup_test_server().await;
    let response = server.get("/api/demand/forecast/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_code(&response), "NOT_FOUND");
}

#[tokio::test]
async fn test_forecast_history_newest_first_and_filtered() {
    let server = setup_test_server().await;

    server.post("/api/demand/forecast").json(&forecast_body()).await;
    let mut grocery = forecast_body();
    grocery["businessType"] = json!("Grocery Store");
    server.post("/api/demand/forecast").json(&grocery).await;

    let response = server.get("/api/demand/forecast-history").await;
    response.assert_status_ok();
    let body: ApiResponse<Vec<Value>> = response.json();
    assert_eq!(body.data.len(), 2);
    assert_eq!(body.data[0]["business_type"], "Grocery Store");

    let filtered: ApiResponse<Vec<Value>> = server
        .get("/api/demand/forecast-history")
        .add_query_param("business_type", "Electronics Store")
        .add_query_param("limit", 5)
        .await
        .json();
    assert_eq!(filtered.data.len(), 1);
    assert_eq!(filtered.data[0]["forecast_period"], 6);

    server
        .get("/api/demand/forecast-history")
        .add_query_param("limit", 0)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_business_types() {
    let server = setup_test_server().await;
    let body: ApiResponse<Value> = server.get("/api/demand/business-types").await.json();
    assert_eq!(body.data["business_types"].as_array().unwrap().len(), 6);
    assert_eq!(body.data["business_scales"], json!(["Micro", "Small", "Medium"]));
    assert_eq!(body.data["locations"].as_array().unwrap().len(), 33);
}

#[tokio::test]
async fn test_seasonal_patterns_and_festival_calendar() {
    let server = setup_test_server().await;

    let patterns = server
        .get("/api/demand/seasonal-patterns")
        .add_query_param("type", "Clothing Store")
        .add_query_param("location", "Maharashtra")
        .await;
    patterns.assert_status_ok();
    let patterns: ApiResponse<Value> = patterns.json();
    assert_eq!(patterns.data["location"], "Maharashtra");

    let first = server.get("/api/demand/festival-calendar").add_query_param("year", 2025).await;
    first.assert_status_ok();
    let second = server.get("/api/demand/festival-calendar").add_query_param("year", 2025).await;
    let first: ApiResponse<Value> = first.json();
    let second: ApiResponse<Value> = second.json();
    assert_eq!(first.data, second.data);
    assert!(!first.data["major_festivals"].as_array().unwrap().is_empty());

    server
        .get("/api/demand/festival-calendar")
        .add_query_param("year", 1990)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inventory_listing_and_filters() {
    let server = setup_test_server().await;

    let all: ApiResponse<Vec<Value>> = server.get("/api/inventory/").await.json();
    assert_eq!(all.data.len(), 6);
    let without_slash: ApiResponse<Vec<Value>> = server.get("/api/inventory").await.json();
    assert_eq!(without_slash.data.len(), 6);

    let medical: ApiResponse<Vec<Value>> = server
        .get("/api/inventory/")
        .add_query_param("category", "medical")
        .await
        .json();
    assert_eq!(medical.data.len(), 1);
    assert_eq!(medical.data[0]["status"], "critical");

    let by_sku: ApiResponse<Vec<Value>> = server
        .get("/api/inventory/")
        .add_query_param("search", "ele-001")
        .await
        .json();
    assert_eq!(by_sku.data[0]["name"], "Samsung Galaxy A54");

    let overstock: ApiResponse<Vec<Value>> = server
        .get("/api/inventory/")
        .add_query_param("status", "overstock")
        .await
        .json();
    assert_eq!(overstock.data.len(), 1);
    assert_eq!(overstock.data[0]["sku"], "COS-001");
}

#[tokio::test]
async fn test_inventory_low_stock_and_analytics() {
    let server = setup_test_server().await;

    let low: ApiResponse<Vec<Value>> = server.get("/api/inventory/low-stock").await.json();
    let mut skus: Vec<&str> = low.data.iter().map(|i| i["sku"].as_str().unwrap()).collect();
    skus.sort();
    assert_eq!(skus, vec!["ELE-001", "F&B-001", "MED-001"]);

    let analytics: ApiResponse<Value> = server.get("/api/inventory/analytics").await.json();
    assert_eq!(analytics.data["total_items"], 6);
    assert_eq!(analytics.data["total_value"], 337766.0);
    assert_eq!(analytics.data["reorder_alerts"], 3);
    assert_eq!(analytics.data["turnover_rate"], 6.4);
}

#[tokio::test]
async fn test_inventory_create_update_delete() {
    let server = setup_test_server().await;

    let created = server
        .post("/api/inventory/")
        .json(&json!({
            "name": "Diya Set",
            "category": "Festive",
            "sku": "FES-001",
            "current_stock": 10,
            "min_stock_level": 20,
            "max_stock_level": 100,
            "unit_cost": 40.0,
            "selling_price": 75.0
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created: ApiResponse<Value> = created.json();
    assert_eq!(created.data["status"], "critical");
    let id = created.data["id"].as_i64().unwrap();

    let updated = server
        .put(&format!("/api/inventory/{}", id))
        .json(&json!({ "current_stock": 60 }))
        .await;
    updated.assert_status_ok();
    let updated: ApiResponse<Value> = updated.json();
    assert_eq!(updated.data["status"], "healthy");
    assert_eq!(updated.data["name"], "Diya Set");

    server
        .put(&format!("/api/inventory/{}", id))
        .json(&json!({ "min_stock_level": 100 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server.delete(&format!("/api/inventory/{}", id)).await.assert_status_ok();
    let gone = server.delete(&format!("/api/inventory/{}", id)).await;
    gone.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(error_code(&gone), "NOT_FOUND");
}

#[tokio::test]
async fn test_inventory_create_rejections() {
    let server = setup_test_server().await;
    let base = json!({
        "name": "Tea",
        "category": "Grocery",
        "current_stock": 10,
        "min_stock_level": 5,
        "max_stock_level": 50
    });

    let mut empty_name = base.clone();
    empty_name["name"] = json!("");
    server.post("/api/inventory/").json(&empty_name).await.assert_status(StatusCode::BAD_REQUEST);

    let mut blank_name = base.clone();
    blank_name["name"] = json!("   ");
    server.post("/api/inventory/").json(&blank_name).await.assert_status(StatusCode::BAD_REQUEST);

    let mut blank_category = base.clone();
    blank_category["category"] = json!("\t ");
    server
        .post("/api/inventory/")
        .json(&blank_category)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .put("/api/inventory/1")
        .json(&json!({ "name": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut inverted = base.clone();
    inverted["min_stock_level"] = json!(50);
    server.post("/api/inventory/").json(&inverted).await.assert_status(StatusCode::BAD_REQUEST);

    let mut negative = base.clone();
    negative["current_stock"] = json!(-1);
    server
        .post("/api/inventory/")
        .json(&negative)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let mut duplicate = base.clone();
    duplicate["sku"] = json!("GRC-001");
    server.post("/api/inventory/").json(&duplicate).await.assert_status(StatusCode::BAD_REQUEST);

    server
        .put("/api/inventory/999")
        .json(&json!({ "current_stock": 1 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shipments_listing_and_lookup() {
    let server = setup_test_server().await;

    let all: ApiResponse<Vec<Value>> = server.get("/api/logistics/shipments").await.json();
    assert_eq!(all.data.len(), 4);

    let delivered: ApiResponse<Vec<Value>> = server
        .get("/api/logistics/shipments")
        .add_query_param("status", "delivered")
        .await
        .json();
    assert_eq!(delivered.data.len(), 2);

    let shipment: ApiResponse<Value> =
        server.get("/api/logistics/shipments/SHP-E5F6G7H8").await.json();
    assert_eq!(shipment.data["destination"], "Chennai");
    assert_eq!(shipment.data["status"], "In Transit");

    let tracking: ApiResponse<Value> = server
        .get("/api/logistics/shipments/SHP-E5F6G7H8/tracking")
        .await
        .json();
    assert_eq!(tracking.data["tracking"]["next_checkpoint"], "Chennai Hub");
    assert_eq!(tracking.data["shipment"]["id"], "SHP-E5F6G7H8");

    server
        .get("/api/logistics/shipments/SHP-00000000")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_shipment_and_update_status() {
    let server = setup_test_server().await;

    let created = server
        .post("/api/logistics/shipments")
        .json(&json!({ "destination": "Mumbai" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created: ApiResponse<Value> = created.json();
    let shipment = created.data;
    let id = shipment["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("SHP-"));
    assert_eq!(shipment["origin"], "Bangalore Distribution Center");
    assert_eq!(shipment["status"], "Processing");
    assert_eq!(shipment["cost"], 5175.0);
    assert_eq!(shipment["eta"], "2025-09-18");
    assert_eq!(shipment["tracking_info"]["next_checkpoint"], "Pune Hub");

    let moved = server
        .put(&format!("/api/logistics/shipments/{}/status", id))
        .json(&json!({ "status": "In Transit", "location": "Tumkur" }))
        .await;
    moved.assert_status_ok();
    let moved: ApiResponse<Value> = moved.json();
    assert_eq!(moved.data["shipped_date"], "2025-09-14");
    assert_eq!(moved.data["tracking_info"]["location"], "Tumkur");

    let delivered: ApiResponse<Value> = server
        .put(&format!("/api/logistics/shipments/{}/status", id))
        .json(&json!({ "status": "Delivered" }))
        .await
        .json();
    assert_eq!(delivered.data["actual_delivery"], "2025-09-14");
    assert_eq!(delivered.data["tracking_info"]["location"], "Mumbai");
    assert_eq!(delivered.data["tracking_info"]["status_history"].as_array().unwrap().len(), 3);

    let stored: ApiResponse<Value> =
        server.get(&format!("/api/logistics/shipments/{}", id)).await.json();
    assert_eq!(stored.data["status"], "Delivered");
}

#[tokio::test]
async fn test_shipment_rejections() {
    let server = setup_test_server().await;

    server
        .post("/api/logistics/shipments")
        .json(&json!({ "destination": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/logistics/shipments")
        .json(&json!({ "destination": "   " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/logistics/shipments")
        .json(&json!({ "destination": "Pune", "origin": " " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/logistics/routes/optimize")
        .json(&json!({ "origin": "Bangalore", "destination": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/logistics/weather/route?origin=%20&destination=Chennai")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/logistics/shipments")
        .json(&json!({ "destination": "Pune", "weight": 5000.0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/logistics/shipments")
        .json(&json!({ "destination": "Pune", "transport_mode": "rocket" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let invalid = server
        .put("/api/logistics/shipments/SHP-I9J0K1L2/status")
        .json(&json!({ "status": "Lost" }))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&invalid), "VALIDATION_ERROR");

    server
        .put("/api/logistics/shipments/SHP-00000000/status")
        .json(&json!({ "status": "Delivered" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logistics_analytics() {
    let server = setup_test_server().await;
    let analytics: ApiResponse<Value> = server.get("/api/logistics/analytics").await.json();
    let data = analytics.data;
    assert_eq!(data["total_shipments"], 4);
    assert_eq!(data["status_breakdown"]["Delivered"], 2);
    assert_eq!(data["on_time_delivery_rate"], 100.0);
    assert_eq!(data["average_delivery_time_days"], 1.5);
    assert_eq!(data["total_shipping_cost"], 15550.0);
    assert_eq!(data["average_cost_per_shipment"], 3887.5);
    assert_eq!(data["performance_trends"]["last_30_days"]["shipments"], 4);
}

#[tokio::test]
async fn test_route_optimization() {
    let server = setup_test_server().await;

    let response = server
        .post("/api/logistics/routes/optimize")
        .json(&json!(["Pune", "Mumbai", "Delhi"]))
        .await;
    response.assert_status_ok();
    let body: ApiResponse<Value> = response.json();
    assert_eq!(body.data["optimized_route"], json!(["Delhi", "Mumbai", "Pune"]));
    assert_eq!(body.data["total_destinations"], 3);
    assert_eq!(body.data["route_details"].as_array().unwrap().len(), 3);

    server
        .post("/api/logistics/routes/optimize")
        .json(&json!(["Pune"]))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_comparison_and_precise_analysis() {
    let server = setup_test_server().await;
    let route = json!({ "origin": "Bangalore", "destination": "Mumbai" });

    let providers: ApiResponse<Value> = server
        .post("/api/logistics/shipments/providers")
        .json(&route)
        .await
        .json();
    assert_eq!(providers.data["providers"].as_array().unwrap().len(), 4);
    assert_eq!(providers.data["fastest"], "FastShip");

    let precise = server
        .post("/api/logistics/routes/precise-analysis")
        .add_query_param("transport_mode", "rail")
        .add_query_param("weight", 25)
        .json(&route)
        .await;
    precise.assert_status_ok();
    let precise: ApiResponse<Value> = precise.json();
    assert_eq!(precise.data["transport_mode"], "rail");
    assert_eq!(precise.data["weight_kg"], 25.0);
    assert_eq!(precise.data["mode_scores"].as_array().unwrap().len(), 4);

    server
        .post("/api/logistics/routes/precise-analysis")
        .add_query_param("transport_mode", "teleport")
        .json(&route)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/logistics/shipments/providers")
        .json(&json!({ "origin": "", "destination": "Mumbai" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weather_endpoints() {
    let server = setup_test_server().await;

    let city: ApiResponse<Value> = server
        .get("/api/logistics/weather")
        .add_query_param("city", "Delhi")
        .await
        .json();
    assert_eq!(city.data["location"], "Delhi");
    assert_eq!(city.data["source"], "builtin");

    server
        .get("/api/logistics/weather")
        .add_query_param("lat", 19.07)
        .add_query_param("lng", 72.87)
        .await
        .assert_status_ok();
    server
        .get("/api/logistics/weather")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let route: ApiResponse<Value> = server
        .get("/api/logistics/weather/route")
        .add_query_param("origin", "Bangalore")
        .add_query_param("destination", "Chennai")
        .add_query_param("samples", 3)
        .await
        .json();
    assert_eq!(route.data["samples"].as_array().unwrap().len(), 3);

    server
        .get("/api/logistics/weather/route")
        .add_query_param("origin", "Bangalore")
        .add_query_param("destination", "Chennai")
        .add_query_param("samples", 11)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/logistics/weather/route")
        .add_query_param("origin", "Atlantis")
        .add_query_param("destination", "Chennai")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weather_analysis_and_news() {
    let server = setup_test_server().await;

    let analysis = server
        .post("/api/logistics/routes/weather-analysis")
        .json(&json!({ "origin": "Bangalore", "destination": "Chennai" }))
        .await;
    analysis.assert_status_ok();
    let analysis: ApiResponse<Value> = analysis.json();
    assert!(["low", "medium", "high"].contains(&analysis.data["risk_level"].as_str().unwrap()));

    let shipment: ApiResponse<Value> = server
        .get("/api/logistics/shipments/SHP-A1B2C3D4/weather-analysis")
        .await
        .json();
    assert_eq!(shipment.data["shipment_id"], "SHP-A1B2C3D4");
    assert_eq!(shipment.data["analysis"]["destination"], "Mumbai");
    assert_eq!(shipment.data["analysis"]["precise_distance"]["transport_mode"], "road");

    let news: ApiResponse<Value> = server
        .get("/api/logistics/news/route")
        .add_query_param("origin", "Bangalore")
        .add_query_param("destination", "Mumbai")
        .await
        .json();
    let items = news.data["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().any(|i| i["title"] == "Monsoon disruption watch"));
}

#[tokio::test]
async fn test_scenario_analysis() {
    let server = setup_test_server().await;

    let response = server
        .post("/api/scenarios/analyze")
        .json(&json!({
            "baseSales": 100000.0,
            "priceChange": 10.0,
            "marketingSpend": 5000.0,
            "seasonalFactor": 1.2
        }))
        .await;
    response.assert_status_ok();
    let body: ApiResponse<Value> = response.json();
    assert_eq!(body.data["breakdown"]["price"], -18.0);
    assert_eq!(body.data["breakdown"]["marketing"], 10.0);
    assert_eq!(body.data["breakdown"]["seasonal"], 20.0);
    assert_eq!(body.data["totalImpact"], 12.0);

    server
        .post("/api/scenarios/analyze")
        .json(&json!({ "baseSales": 100000.0, "priceChange": 150.0 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/scenarios/analyze")
        .json(&json!({ "baseSales": 100000.0, "priceChange": 0.0, "competitorAction": "hostile" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scenario_templates_compare_and_insights() {
    let server = setup_test_server().await;

    let templates: ApiResponse<Vec<Value>> = server.get("/api/scenarios/templates").await.json();
    assert_eq!(templates.data.len(), 5);

    let comparison = server
        .post("/api/scenarios/compare")
        .json(&json!({ "scenarios": [
            { "baseSales": 100000.0, "priceChange": -10.0 },
            { "baseSales": 100000.0, "priceChange": 20.0 }
        ]}))
        .await;
    comparison.assert_status_ok();
    let comparison: ApiResponse<Value> = comparison.json();
    assert_eq!(comparison.data["best_scenario"], "Scenario 1");
    assert_eq!(comparison.data["worst_scenario"], "Scenario 2");

    server
        .post("/api/scenarios/compare")
        .json(&json!({ "scenarios": [{ "baseSales": 100000.0, "priceChange": 0.0 }] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let insights: ApiResponse<Value> = server
        .get("/api/scenarios/insights/Electronics%20Store")
        .await
        .json();
    assert_eq!(insights.data["business_type"], "Electronics Store");
    assert_eq!(insights.data["location"], "Karnataka");

    let blank: ApiResponse<Value> = server
        .get("/api/scenarios/insights/Grocery%20Store?location=%20%20")
        .await
        .json();
    assert_eq!(blank.data["location"], "Karnataka");

    let given: ApiResponse<Value> = server
        .get("/api/scenarios/insights/Grocery%20Store?location=Delhi")
        .await
        .json();
    assert_eq!(given.data["location"], "Delhi");
}

#[tokio::test]
async fn test_reports() {
    let server = setup_test_server().await;

    let summary: ApiResponse<Value> = server.get("/api/reports/executive-summary").await.json();
    assert_eq!(summary.data["period"], "September 2025");

    let sales: ApiResponse<Value> = server.get("/api/reports/sales").await.json();
    assert_eq!(sales.data["data"].as_array().unwrap().len(), 9);
    let weekly: ApiResponse<Value> = server
        .get("/api/reports/sales")
        .add_query_param("period", "weekly")
        .await
        .json();
    assert!(weekly.data["data"].as_array().unwrap().is_empty());
    server
        .get("/api/reports/sales")
        .add_query_param("period", "daily")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    for path in [
        "/api/reports/inventory",
        "/api/reports/forecast-accuracy",
        "/api/reports/logistics",
    ] {
        server.get(path).await.assert_status_ok();
    }
    server
        .get("/api/reports/payroll")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_report() {
    let server = setup_test_server().await;

    let response = server
        .post("/api/reports/generate-pdf")
        .json(&json!({ "report_type": "inventory" }))
        .await;
    response.assert_status_ok();
    let body: ApiResponse<Value> = response.json();
    assert_eq!(body.data["file_name"], "report_inventory_20250914.pdf");
    assert_eq!(body.data["status"], "generated");

    server
        .post("/api/reports/generate-pdf")
        .json(&json!({ "report_type": "payroll" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/reports/generate-pdf")
        .json(&json!({
            "report_type": "sales",
            "start_date": "2025-09-30",
            "end_date": "2025-09-01"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
