use crate::shared::api_utils::{get_json, post_json};
use contracts::domain::repair_orders::{DeviceAction, DeviceActionRequest};
use serde_json::Value;

pub async fn fetch_repair_orders() -> Result<Vec<Value>, String> {
    get_json("/api/repair-orders").await
}

/// Remote lock/release of the financed device on a repair ticket.
pub async fn device_action(id: &str, action: DeviceAction) -> Result<(), String> {
    let request = DeviceActionRequest { action };
    let _: Value = post_json(
        &format!("/api/repair-orders/{}/device", urlencoding::encode(id)),
        &request,
    )
    .await?;
    Ok(())
}
