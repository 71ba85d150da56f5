use crate::shared::api_utils::{delete, get_json};
use serde_json::Value;

pub async fn fetch_telemarketers() -> Result<Vec<Value>, String> {
    get_json("/api/telemarketers").await
}

pub async fn delete_telemarketer(id: &str) -> Result<(), String> {
    delete(&format!("/api/telemarketers/{}", urlencoding::encode(id))).await
}
