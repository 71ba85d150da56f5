//! Canonical loan row.
//!
//! The loan book is fed by two backends: the legacy servicing system and the
//! integrated-partner API. The same logical field arrives under different
//! names (`amountRequested` vs `loanAmount` vs `principalAmount`), so every
//! canonical field resolves through a prioritized fallback chain.

use crate::shared::components::table::number_format::format_money;
use crate::shared::date_utils::format_date;
use crate::shared::export::ExcelExportable;
use crate::shared::list_utils::{cmp_f64, cmp_opt_str, cmp_str, Searchable, Sortable};
use crate::shared::normalize::{
    f64_or, normalize_batch, pick_bool, str_or, BatchReport, MissingIdPolicy, NA, UNASSIGNED,
};
use crate::shared::table_state::ListRow;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
pub struct LoanRow {
    pub id: String,
    pub borrower_name: String,
    pub phone: String,
    pub product: String,
    pub amount: f64,
    pub amount_paid: f64,
    pub agent: String,
    pub status: String,
    pub date_applied: Option<String>,
    /// Eligibility for bulk disbursement.
    pub has_unpaid_invoice: bool,
}

impl LoanRow {
    pub fn from_value(value: &Value) -> (String, Self) {
        let id = str_or(value, &["id", "loanId", "loan.id"], "");
        let row = Self {
            id: id.clone(),
            borrower_name: str_or(value, &["customerName", "borrower.name", "clientName"], NA),
            phone: str_or(value, &["phoneNumber", "msisdn", "borrower.phone"], NA),
            product: str_or(value, &["productName", "device.model", "product"], NA),
            amount: f64_or(
                value,
                &["amountRequested", "loanAmount", "principalAmount"],
            ),
            amount_paid: f64_or(value, &["amountPaid", "totalPaid", "repaidAmount"]),
            agent: str_or(value, &["agentName", "agent.name"], UNASSIGNED),
            status: str_or(value, &["status", "loanStatus", "state.status"], NA),
            date_applied: crate::shared::normalize::pick_str(
                value,
                &["dateApplied", "createdAt", "applicationDate"],
            ),
            has_unpaid_invoice: pick_bool(value, &["hasUnpaidInvoice", "unpaidInvoice"])
                .unwrap_or(false),
        };
        (id, row)
    }
}

/// Records without a resolvable loan id are dropped (and logged); a loan the
/// operator cannot address by id cannot be serviced from this screen.
pub fn normalize_loans(raw: &[Value]) -> (Vec<LoanRow>, BatchReport) {
    let (rows, report) = normalize_batch(
        raw,
        MissingIdPolicy::Drop,
        |value| LoanRow::from_value(value),
        |row, id| row.id = id,
    );
    report.log("loans");
    (rows, report)
}

impl Searchable for LoanRow {
    fn matches_filter(&self, filter: &str) -> bool {
        self.borrower_name.to_lowercase().contains(filter)
            || self.id.to_lowercase().contains(filter)
            || self.phone.to_lowercase().contains(filter)
            || self.product.to_lowercase().contains(filter)
            || self.agent.to_lowercase().contains(filter)
            || self.status.to_lowercase().contains(filter)
            || format!("{}", self.amount).contains(filter)
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "borrower_name" => Some(self.borrower_name.clone()),
            "phone" => Some(self.phone.clone()),
            "product" => Some(self.product.clone()),
            "agent" => Some(self.agent.clone()),
            "status" => Some(self.status.clone()),
            "amount" => Some(format!("{}", self.amount)),
            _ => None,
        }
    }
}

impl Sortable for LoanRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "borrower_name" => cmp_str(&self.borrower_name, &other.borrower_name),
            "phone" => self.phone.cmp(&other.phone),
            "product" => cmp_str(&self.product, &other.product),
            "amount" => cmp_f64(self.amount, other.amount),
            "amount_paid" => cmp_f64(self.amount_paid, other.amount_paid),
            "agent" => cmp_str(&self.agent, &other.agent),
            "status" => cmp_str(&self.status, &other.status),
            "date_applied" => {
                cmp_opt_str(self.date_applied.as_deref(), other.date_applied.as_deref())
            }
            _ => Ordering::Equal,
        }
    }
}

impl ListRow for LoanRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn date_field(&self) -> Option<&str> {
        self.date_applied.as_deref()
    }
}

impl ExcelExportable for LoanRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Loan ID",
            "Borrower",
            "Phone",
            "Product",
            "Amount",
            "Paid",
            "Agent",
            "Date Applied",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.borrower_name.clone(),
            self.phone.clone(),
            self.product.clone(),
            format_money(self.amount),
            format_money(self.amount_paid),
            self.agent.clone(),
            self.date_applied
                .as_deref()
                .map(format_date)
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
    fn test_amount_fallback_order() {
        let legacy = json!({"id": "L1", "loanAmount": 5000});
        let (_, row) = LoanRow::from_value(&legacy);
        assert_eq!(row.amount, 5000.0);

        let bare = json!({"id": "L2"});
        let (_, row) = LoanRow::from_value(&bare);
        assert_eq!(row.amount, 0.0);
        assert_eq!(row.borrower_name, "N/A");
        assert_eq!(row.agent, "Unassigned");
    }

    #[test]
    fn test_partner_schema_nested_fields() {
        let partner = json!({
            "loanId": 77001,
            "borrower": {"name": "Grace Wanjiru", "phone": "+254700111222"},
            "device": {"model": "A16 Pro"},
            "principalAmount": "12500.00",
            "agent": {"name": "J. Otieno"},
            "loanStatus": "Active",
            "createdAt": "2026-05-02T09:14:00Z",
            "hasUnpaidInvoice": true
        });
        let (id, row) = LoanRow::from_value(&partner);
        assert_eq!(id, "77001");
        assert_eq!(row.borrower_name, "Grace Wanjiru");
        assert_eq!(row.phone, "+254700111222");
        assert_eq!(row.amount, 12500.0);
        assert_eq!(row.agent, "J. Otieno");
        assert!(row.has_unpaid_invoice);
    }

    #[test]
    fn test_missing_id_dropped_and_counted() {
        let raw = vec![
            json!({"id": "L1", "loanAmount": 100}),
            json!({"loanAmount": 200}),
        ];
        let (rows, report) = normalize_loans(&raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(report.missing_id, 1);
        assert_eq!(report.dropped, 1);
    }

    #[test]
    fn test_export_row_formatting() {
        let (_, row) = LoanRow::from_value(&json!({
            "id": "L9",
            "customerName": "Peter Kamau",
            "amountRequested": 1234567.5,
            "dateApplied": "2026-03-15"
        }));
        let cells = row.to_csv_row();
        assert_eq!(cells[4], "1,234,567.50");
        assert_eq!(cells[7], "15/03/2026");
    }
}
