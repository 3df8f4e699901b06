use common::reports::{ExecutiveSummary, GenerateReportRequest, ReportKind, ReportReceipt};
use serde_json::Value;

use crate::api_client;

/// Any report document, kept as raw JSON for display
pub async fn get_report(kind: ReportKind) -> Result<Value, String> {
    log::trace!("Fetching {} report", kind);
    api_client::get(&format!("/reports/{}", kind.slug())).await
}

pub async fn get_executive_summary() -> Result<ExecutiveSummary, String> {
    api_client::get("/reports/executive-summary").await
}

pub async fn generate_report(request: &GenerateReportRequest) -> Result<ReportReceipt, String> {
    let result: Result<ReportReceipt, String> =
        api_client::post("/reports/generate-pdf", request).await;
    if let Ok(receipt) = &result {
        log::info!("Report {} generated as {}", receipt.report_id, receipt.file_name);
    }
    result
}
