//! Canonical repayment row.
//!
//! Repayments arrive from the payments gateway in a single schema, plus a
//! legacy shape for records migrated from the old ledger (`txnRef`,
//! `payerName`, amounts as strings).

use crate::shared::components::table::number_format::format_money;
use crate::shared::date_utils::format_datetime;
use crate::shared::export::ExcelExportable;
use crate::shared::list_utils::{cmp_f64, cmp_opt_str, cmp_str, Searchable, Sortable};
use crate::shared::normalize::{
    f64_or, normalize_batch, pick_str, str_or, BatchReport, MissingIdPolicy, NA,
};
use crate::shared::table_state::ListRow;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
pub struct RepaymentRow {
    pub id: String,
    pub reference: String,
    pub payer: String,
    pub amount: f64,
    pub channel: String,
    pub status: String,
    pub paid_at: Option<String>,
}

impl RepaymentRow {
    pub fn from_value(value: &Value) -> (String, Self) {
        let id = str_or(value, &["id", "repaymentId"], "");
        let row = Self {
            id: id.clone(),
            reference: str_or(value, &["reference", "txnRef", "transactionId"], NA),
            payer: str_or(value, &["payerName", "customerName", "payer.name"], NA),
            amount: f64_or(value, &["amount", "amountPaid", "txnAmount"]),
            channel: str_or(value, &["channel", "paymentChannel", "source"], NA),
            status: str_or(value, &["status", "txnStatus"], NA),
            paid_at: pick_str(value, &["paidAt", "transactionDate", "createdAt"]),
        };
        (id, row)
    }
}

pub fn normalize_repayments(raw: &[Value]) -> (Vec<RepaymentRow>, BatchReport) {
    let (rows, report) = normalize_batch(
        raw,
        MissingIdPolicy::Drop,
        |value| RepaymentRow::from_value(value),
        |row, id| row.id = id,
    );
    report.log("repayments");
    (rows, report)
}

impl Searchable for RepaymentRow {
    fn matches_filter(&self, filter: &str) -> bool {
        self.reference.to_lowercase().contains(filter)
            || self.id.to_lowercase().contains(filter)
            || self.payer.to_lowercase().contains(filter)
            || self.channel.to_lowercase().contains(filter)
            || self.status.to_lowercase().contains(filter)
            || format!("{}", self.amount).contains(filter)
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "reference" => Some(self.reference.clone()),
            "payer" => Some(self.payer.clone()),
            "channel" => Some(self.channel.clone()),
            "status" => Some(self.status.clone()),
            "amount" => Some(format!("{}", self.amount)),
            _ => None,
        }
    }
}

impl Sortable for RepaymentRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "reference" => cmp_str(&self.reference, &other.reference),
            "payer" => cmp_str(&self.payer, &other.payer),
            "amount" => cmp_f64(self.amount, other.amount),
            "channel" => cmp_str(&self.channel, &other.channel),
            "status" => cmp_str(&self.status, &other.status),
            "paid_at" => cmp_opt_str(self.paid_at.as_deref(), other.paid_at.as_deref()),
            _ => Ordering::Equal,
        }
    }
}

impl ListRow for RepaymentRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn date_field(&self) -> Option<&str> {
        self.paid_at.as_deref()
    }
}

impl ExcelExportable for RepaymentRow {
    fn headers() -> Vec<&'static str> {
        vec!["Reference", "Payer", "Amount", "Channel", "Paid At"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.reference.clone(),
            self.payer.clone(),
            format_money(self.amount),
            self.channel.clone(),
            self.paid_at
                .as_deref()
                .map(format_datetime)
                .unwrap_or_else(|| "—".to_string()),
        ]
    }

    fn status_cell(&self) -> Option<String> {
        Some(self.status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_ledger_shape() {
        let (id, row) = RepaymentRow::from_value(&json!({
            "repaymentId": "R-100",
            "txnRef": "MPE77QX1",
            "payerName": "Alice Njoroge",
            "txnAmount": "2500",
            "source": "mpesa",
            "txnStatus": "confirmed",
            "transactionDate": "2026-04-11T07:45:12Z"
        }));
        assert_eq!(id, "R-100");
        assert_eq!(row.reference, "MPE77QX1");
        assert_eq!(row.amount, 2500.0);
        assert_eq!(row.channel, "mpesa");
    }

    #[test]
    fn test_defaults() {
        let (_, row) = RepaymentRow::from_value(&json!({"id": "R-1"}));
        assert_eq!(row.amount, 0.0);
        assert_eq!(row.payer, "N/A");
        assert!(row.paid_at.is_none());
    }
}
