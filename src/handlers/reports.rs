use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::reports::{
    ExecutiveSummary, ForecastAccuracyReport, GenerateReportRequest, InventoryReport,
    LogisticsReport,
    ReportReceipt, SalesReport, SalesReportQuery,
};
use compute::reports::{self, DEFAULT_SALES_PERIOD};
use tracing::{info, instrument};

use crate::schemas::{compute_error, ApiResponse, AppState, HandlerError};

/// Executive summary for the current month
#[utoipa::path(
    get,
    path = "/api/reports/executive-summary",
    tag = "reports",
    responses(
        (status = 200, description = "Executive summary", body = ApiResponse<ExecutiveSummary>)
    )
)]
#[instrument(skip(state))]
pub async fn get_executive_summary(
    State(state): State<AppState>,
) -> Json<ApiResponse<ExecutiveSummary>> {
    ApiResponse::ok(
        reports::executive_summary(state.now()),
        "Executive summary retrieved successfully",
    )
}

/// Sales performance by period
#[utoipa::path(
    get,
    path = "/api/reports/sales",
    tag = "reports",
    params(SalesReportQuery),
    responses(
        (status = 200, description = "Sales report", body = ApiResponse<SalesReport>),
        (status = 400, description = "Unknown period", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_sales_report(
    Valid(Query(query)): Valid<Query<SalesReportQuery>>,
) -> Json<ApiResponse<SalesReport>> {
    let period = query.period.as_deref().unwrap_or(DEFAULT_SALES_PERIOD);
    ApiResponse::ok(reports::sales(period), "Sales report retrieved successfully")
}

#[utoipa::path(
    get,
    path = "/api/reports/inventory",
    tag = "reports",
    responses(
        (status = 200, description = "Inventory report", body = ApiResponse<InventoryReport>)
    )
)]
#[instrument]
pub async fn get_inventory_report() -> Json<ApiResponse<InventoryReport>> {
    ApiResponse::ok(reports::inventory(), "Inventory report retrieved successfully")
}

#[utoipa::path(
    get,
    path = "/api/reports/forecast-accuracy",
    tag = "reports",
    responses(
        (
            status = 200,
            description = "Forecast accuracy report",
            body = ApiResponse<ForecastAccuracyReport>
        )
    )
)]
#[instrument]
pub async fn get_forecast_accuracy_report() -> Json<ApiResponse<ForecastAccuracyReport>> {
    ApiResponse::ok(
        reports::forecast_accuracy(),
        "Forecast accuracy report retrieved successfully",
    )
}

#[utoipa::path(
    get,
    path = "/api/reports/logistics",
    tag = "reports",
    responses(
        (status = 200, description = "Logistics report", body = ApiResponse<LogisticsReport>)
    )
)]
#[instrument]
pub async fn get_logistics_report() -> Json<ApiResponse<LogisticsReport>> {
    ApiResponse::ok(reports::logistics(), "Logistics report retrieved successfully")
}

/// Issue a report document receipt
#[utoipa::path(
    post,
    path = "/api/reports/generate-pdf",
    tag = "reports",
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Report generated", body = ApiResponse<ReportReceipt>),
        (
            status = 400,
            description = "Unknown report type or reversed date range",
            body = ErrorResponse
        )
    )
)]
#[instrument(skip(state))]
pub async fn generate_report(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<GenerateReportRequest>>,
) -> Result<Json<ApiResponse<ReportReceipt>>, HandlerError> {
    let receipt = reports::generate(&request, state.now()).map_err(compute_error)?;
    info!("Report {} ready at {}", receipt.report_id, receipt.download_url);
    Ok(ApiResponse::ok(receipt, "Report generated successfully"))
}
