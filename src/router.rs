use crate::handlers::{
    demand::{
        create_forecast, get_business_types, get_festival_calendar, get_forecast,
        get_forecast_history,
        get_seasonal_patterns,
    },
    health::{health_check, root},
    inventory::{
        create_inventory_item, delete_inventory_item, get_inventory, get_inventory_analytics,
        get_low_stock,
        update_inventory_item,
    },
    logistics::{
        routes::{compare_providers, optimize_routes, precise_analysis},
        shipments::{
            create_shipment, get_logistics_analytics, get_shipment, get_shipment_tracking,
            get_shipments, update_shipment_status,
        },
        weather::{
            get_route_news, get_route_weather, get_weather, route_weather_analysis,
            shipment_weather_analysis,
        },
    },
    reports::{
        generate_report, get_executive_summary, get_forecast_accuracy_report, get_inventory_report,
        get_logistics_report, get_sales_report,
    },
    scenarios::{analyze_scenario, compare_scenarios, get_insights, get_templates},
};
use crate::config::AppConfig;
use crate::schemas::{error_response, ApiDoc, AppState, HandlerError};
use axum::{
    http::{HeaderValue, StatusCode, Uri},
    routing::{get, post, put},
    Router,
};
use axum_prometheus::PrometheusMetricLayer;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{debug, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn not_found(uri: Uri) -> HandlerError {
    debug!("No route for {}", uri);
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", format!("No route for {}", uri.path()))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Demand forecasting
        .route("/api/demand/forecast", post(create_forecast))
        .route("/api/demand/forecast/:forecast_id", get(get_forecast))
        .route("/api/demand/forecast-history", get(get_forecast_history))
        .route("/api/demand/business-types", get(get_business_types))
        .route("/api/demand/seasonal-patterns", get(get_seasonal_patterns))
        .route("/api/demand/festival-calendar", get(get_festival_calendar))
        // Inventory, with and without the trailing slash
        .route("/api/inventory", get(get_inventory).post(create_inventory_item))
        .route("/api/inventory/", get(get_inventory).post(create_inventory_item))
        .route("/api/inventory/low-stock", get(get_low_stock))
        .route("/api/inventory/analytics", get(get_inventory_analytics))
        .route("/api/inventory/:item_id", put(update_inventory_item).delete(delete_inventory_item))
        // Shipments
        .route("/api/logistics/shipments", get(get_shipments).post(create_shipment))
        .route("/api/logistics/shipments/providers", post(compare_providers))
        .route("/api/logistics/shipments/:shipment_id", get(get_shipment))
        .route("/api/logistics/shipments/:shipment_id/status", put(update_shipment_status))
        .route("/api/logistics/shipments/:shipment_id/tracking", get(get_shipment_tracking))
        .route(
            "/api/logistics/shipments/:shipment_id/weather-analysis",
            get(shipment_weather_analysis),
        )
        .route("/api/logistics/analytics", get(get_logistics_analytics))
        // Routes and carriers
        .route("/api/logistics/routes/optimize", post(optimize_routes))
        .route("/api/logistics/routes/precise-analysis", post(precise_analysis))
        .route("/api/logistics/routes/weather-analysis", post(route_weather_analysis))
        // Weather and advisories
        .route("/api/logistics/weather", get(get_weather))
        .route("/api/logistics/weather/route", get(get_route_weather))
        .route("/api/logistics/news/route", get(get_route_news))
        // What-if scenarios
        .route("/api/scenarios/analyze", post(analyze_scenario))
        .route("/api/scenarios/templates", get(get_templates))
        .route("/api/scenarios/compare", post(compare_scenarios))
        .route("/api/scenarios/insights/:business_type", get(get_insights))
        // Reports
        .route("/api/reports/executive-summary", get(get_executive_summary))
        .route("/api/reports/sales", get(get_sales_report))
        .route("/api/reports/inventory", get(get_inventory_report))
        .route("/api/reports/forecast-accuracy", get(get_forecast_accuracy_report))
        .route("/api/reports/logistics", get(get_logistics_report))
        .route("/api/reports/generate-pdf", post(generate_report))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(cors),
        )
        .with_state(state)
}

/// Adds request metrics and the `/metrics` endpoint.
///
/// The recorder is process global, so this is applied once by `serve`.
pub fn with_metrics(router: Router) -> Router {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    router
        .route("/metrics", get(move || async move { metric_handle.render() }))
        .layer(prometheus_layer)
}
