use crate::shared::api_utils::{get_json, post_json};
use contracts::domain::loans::{BulkDisbursementRequest, DisbursementRequest};
use contracts::shared::bulk::BulkActionResponse;
use serde_json::Value;

/// The loan list endpoint returns raw records in whichever schema produced
/// them; normalization happens client-side.
pub async fn fetch_loans() -> Result<Vec<Value>, String> {
    get_json("/api/loans").await
}

pub async fn fetch_loan(id: &str) -> Result<Value, String> {
    get_json(&format!("/api/loans/{}", urlencoding::encode(id))).await
}

pub async fn trigger_disbursement(loan_id: &str) -> Result<(), String> {
    let request = DisbursementRequest {
        loan_id: loan_id.to_string(),
    };
    let _: Value = post_json("/api/loans/disbursements", &request).await?;
    Ok(())
}

/// Bulk disbursement. The response schema is validated before the caller
/// sees it; counts that do not add up are treated as a failed call.
pub async fn trigger_bulk_disbursement(loan_ids: Vec<String>) -> Result<BulkActionResponse, String> {
    let requested = loan_ids.len();
    let request = BulkDisbursementRequest::new(loan_ids);
    let response: BulkActionResponse =
        post_json("/api/loans/disbursements/bulk", &request).await?;
    response
        .validate(requested)
        .map_err(|e| format!("Malformed bulk response: {}", e))?;
    Ok(response)
}
