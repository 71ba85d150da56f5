use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Per-item outcome inside a bulk mutation response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkItemResult {
    pub id: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response shape for bulk mutations (bulk disbursement, bulk status change).
///
/// The backend reports per-item outcomes; the client never infers partial
/// success on its own. `validate` is called before the counts are shown to
/// the operator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkActionResponse {
    pub successful: usize,
    pub failed: usize,
    #[serde(default)]
    pub details: Vec<BulkItemResult>,
}

impl BulkActionResponse {
    /// Check the response against the set of ids that were submitted.
    ///
    /// The counts must add up to the number of requested items, and when
    /// per-item details are present they must agree with the counts.
    pub fn validate(&self, requested: usize) -> Result<()> {
        if self.successful + self.failed != requested {
            bail!(
                "bulk response counts {}+{} do not match {} requested items",
                self.successful,
                self.failed,
                requested
            );
        }
        if !self.details.is_empty() {
            let ok_count = self.details.iter().filter(|d| d.ok).count();
            if ok_count != self.successful || self.details.len() != requested {
                bail!("bulk response details disagree with counts");
            }
        }
        Ok(())
    }

    /// Operator-facing summary line, always carrying both counts.
    pub fn summary(&self) -> String {
        format!("{} succeeded, {} failed", self.successful, self.failed)
    }

    pub fn is_full_failure(&self) -> bool {
        self.successful == 0 && self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_counts() {
        let resp = BulkActionResponse {
            successful: 3,
            failed: 1,
            details: vec![],
        };
        assert!(resp.validate(4).is_ok());
        assert!(resp.validate(5).is_err());
    }

    #[test]
    fn test_validate_details_mismatch() {
        let resp = BulkActionResponse {
            successful: 2,
            failed: 0,
            details: vec![
                BulkItemResult {
                    id: "a".into(),
                    ok: true,
                    message: None,
                },
                BulkItemResult {
                    id: "b".into(),
                    ok: false,
                    message: Some("no unpaid invoice".into()),
                },
            ],
        };
        assert!(resp.validate(2).is_err());
    }

    #[test]
    fn test_summary_carries_both_counts() {
        let resp = BulkActionResponse {
            successful: 3,
            failed: 1,
            details: vec![],
        };
        assert_eq!(resp.summary(), "3 succeeded, 1 failed");
    }
}
