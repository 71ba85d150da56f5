//! Field-fallback extraction over raw API records.
//!
//! Several backends feed the same lists (the legacy loan book and the
//! integrated-partner schema), so the same logical field arrives under
//! different names and nesting. Each view's normalizer declares a prioritized
//! list of source paths per canonical field and a type-appropriate default;
//! records are never rejected for missing optional fields.

use serde_json::Value;

/// Dotted-path lookup: `"state.saleDt"` resolves nested objects.
pub fn pick<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for key in path.split('.') {
        current = current.get(key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// First path that resolves to a string. Numbers are accepted and rendered,
/// since legacy records serialize some identifiers as JSON numbers.
pub fn pick_str(value: &Value, paths: &[&str]) -> Option<String> {
    for path in paths {
        match pick(value, path) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First path that resolves to a number. String-encoded numbers are parsed,
/// the partner API quotes its amounts.
pub fn pick_f64(value: &Value, paths: &[&str]) -> Option<f64> {
    for path in paths {
        match pick(value, path) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.trim().parse::<f64>() {
                    return Some(parsed);
                }
            }
            _ => {}
        }
    }
    None
}

/// First path that resolves to a non-negative integer count.
pub fn pick_u64(value: &Value, paths: &[&str]) -> Option<u64> {
    for path in paths {
        match pick(value, path) {
            Some(Value::Number(n)) => return n.as_u64(),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.trim().parse::<u64>() {
                    return Some(parsed);
                }
            }
            _ => {}
        }
    }
    None
}

pub fn u64_or(value: &Value, paths: &[&str]) -> u64 {
    pick_u64(value, paths).unwrap_or(0)
}

pub fn pick_bool(value: &Value, paths: &[&str]) -> Option<bool> {
    for path in paths {
        if let Some(Value::Bool(b)) = pick(value, path) {
            return Some(*b);
        }
    }
    None
}

/// String field with the display default.
pub fn str_or(value: &Value, paths: &[&str], default: &str) -> String {
    pick_str(value, paths).unwrap_or_else(|| default.to_string())
}

/// Amount field; missing resolves to 0.
pub fn f64_or(value: &Value, paths: &[&str]) -> f64 {
    pick_f64(value, paths).unwrap_or(0.0)
}

pub const NA: &str = "N/A";
pub const UNASSIGNED: &str = "Unassigned";

/// What to do with a record whose identifier does not resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissingIdPolicy {
    /// Drop the record (logged and counted, never silent).
    #[default]
    Drop,
    /// Keep it under a synthetic `row-{index}` id so it still renders;
    /// synthetic rows are not eligible for bulk actions.
    Flag,
}

/// Per-batch data-quality tally, logged after normalization so upstream
/// regressions surface without crashing the view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchReport {
    pub total: usize,
    pub missing_id: usize,
    pub dropped: usize,
}

impl BatchReport {
    pub fn log(&self, resource: &str) {
        if self.missing_id > 0 {
            log::warn!(
                "{}: {} of {} records missing an identifier ({} dropped)",
                resource,
                self.missing_id,
                self.total,
                self.dropped
            );
        } else {
            log::debug!("{}: normalized {} records", resource, self.total);
        }
    }
}

/// Normalize a raw batch with one `map` closure returning `(id, row)` where
/// the id is whatever the per-view fallback chain resolved (empty string when
/// nothing did). Applies the missing-id policy and produces the report.
pub fn normalize_batch<T>(
    raw: &[Value],
    policy: MissingIdPolicy,
    mut map: impl FnMut(&Value) -> (String, T),
    mut assign_id: impl FnMut(&mut T, String),
) -> (Vec<T>, BatchReport) {
    let mut report = BatchReport {
        total: raw.len(),
        ..Default::default()
    };
    if let Some(first) = raw.first() {
        log::debug!("first raw record: {}", first);
    }
    let mut rows = Vec::with_capacity(raw.len());
    for (index, value) in raw.iter().enumerate() {
        let (id, mut row) = map(value);
        if id.is_empty() {
            report.missing_id += 1;
            match policy {
                MissingIdPolicy::Drop => {
                    report.dropped += 1;
                    log::warn!("record {} has no identifier, dropped", index);
                    continue;
                }
                MissingIdPolicy::Flag => {
                    assign_id(&mut row, format!("row-{}", index));
                }
            }
        }
        rows.push(row);
    }
    (rows, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pick_nested_path() {
        let v = json!({"state": {"saleDt": "2026-03-01"}});
        assert_eq!(
            pick(&v, "state.saleDt").and_then(|x| x.as_str()),
            Some("2026-03-01")
        );
        assert!(pick(&v, "state.missing").is_none());
        assert!(pick(&v, "other").is_none());
    }

    #[test]
    fn test_amount_fallback_chain() {
        // First present source wins.
        let v = json!({"loanAmount": 5000});
        assert_eq!(
            f64_or(&v, &["amountRequested", "loanAmount", "principalAmount"]),
            5000.0
        );

        // Neither present: amount defaults to 0.
        let empty = json!({});
        assert_eq!(
            f64_or(&empty, &["amountRequested", "loanAmount", "principalAmount"]),
            0.0
        );

        // Earlier source takes priority even when both resolve.
        let both = json!({"amountRequested": 1200, "loanAmount": 5000});
        assert_eq!(f64_or(&both, &["amountRequested", "loanAmount"]), 1200.0);
    }

    #[test]
    fn test_string_encoded_amount() {
        let v = json!({"principalAmount": "7500.50"});
        assert_eq!(f64_or(&v, &["principalAmount"]), 7500.5);
    }

    #[test]
    fn test_str_defaults() {
        let v = json!({"agentName": null});
        assert_eq!(str_or(&v, &["agentName", "agent.name"], UNASSIGNED), "Unassigned");
        assert_eq!(str_or(&json!({}), &["productName"], NA), "N/A");
    }

    #[test]
    fn test_numeric_identifier_rendered_as_string() {
        let v = json!({"loanId": 88123});
        assert_eq!(pick_str(&v, &["id", "loanId"]), Some("88123".to_string()));
    }

    #[test]
    fn test_normalize_batch_drop_policy() {
        let raw = vec![json!({"id": "a"}), json!({}), json!({"id": "b"})];
        let (rows, report) = normalize_batch(
            &raw,
            MissingIdPolicy::Drop,
            |v| {
                let id = str_or(v, &["id"], "");
                (id.clone(), id)
            },
            |row, id| *row = id,
        );
        assert_eq!(rows, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(report.total, 3);
        assert_eq!(report.missing_id, 1);
        assert_eq!(report.dropped, 1);
    }

    #[test]
    fn test_normalize_batch_flag_policy() {
        let raw = vec![json!({"id": "a"}), json!({})];
        let (rows, report) = normalize_batch(
            &raw,
            MissingIdPolicy::Flag,
            |v| {
                let id = str_or(v, &["id"], "");
                (id.clone(), id)
            },
            |row, id| *row = id,
        );
        assert_eq!(rows, vec!["a".to_string(), "row-1".to_string()]);
        assert_eq!(report.dropped, 0);
        assert_eq!(report.missing_id, 1);
    }
}
