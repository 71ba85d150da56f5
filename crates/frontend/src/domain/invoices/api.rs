use crate::shared::api_utils::get_json;
use serde_json::Value;

pub async fn fetch_invoices() -> Result<Vec<Value>, String> {
    get_json("/api/invoices").await
}
