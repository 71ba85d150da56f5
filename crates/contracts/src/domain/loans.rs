use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trigger disbursement for a single loan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisbursementRequest {
    pub loan_id: String,
}

/// Trigger disbursement for a batch of loans.
///
/// `request_id` is the idempotency key: retrying the same batch must not
/// disburse twice on the server side.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkDisbursementRequest {
    pub request_id: Uuid,
    pub loan_ids: Vec<String>,
}

impl BulkDisbursementRequest {
    pub fn new(loan_ids: Vec<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            loan_ids,
        }
    }
}
