use serde::{Deserialize, Serialize};

/// Change the status of a repayment record (e.g. "pending" -> "confirmed").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
