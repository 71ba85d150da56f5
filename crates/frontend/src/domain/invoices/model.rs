//! Canonical invoice row.

use crate::shared::components::table::number_format::format_money;
use crate::shared::date_utils::format_date;
use crate::shared::export::ExcelExportable;
use crate::shared::list_utils::{cmp_f64, cmp_opt_str, cmp_str, Searchable, Sortable};
use crate::shared::normalize::{
    f64_or, normalize_batch, pick_str, str_or, BatchReport, MissingIdPolicy, NA,
};
use crate::shared::table_state::ListRow;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceRow {
    pub id: String,
    pub invoice_no: String,
    pub loan_id: String,
    pub customer: String,
    pub amount: f64,
    pub status: String,
    pub due_date: Option<String>,
}

impl InvoiceRow {
    pub fn from_value(value: &Value) -> (String, Self) {
        let id = str_or(value, &["id", "invoiceId"], "");
        let row = Self {
            id: id.clone(),
            invoice_no: str_or(value, &["invoiceNumber", "invoiceNo", "number"], NA),
            loan_id: str_or(value, &["loanId", "loan.id"], NA),
            customer: str_or(value, &["customerName", "borrower.name"], NA),
            amount: f64_or(value, &["amountDue", "amount", "totalAmount"]),
            status: str_or(value, &["status", "invoiceStatus"], NA),
            due_date: pick_str(value, &["dueDate", "dueAt", "due_date"]),
        };
        (id, row)
    }
}

pub fn normalize_invoices(raw: &[Value]) -> (Vec<InvoiceRow>, BatchReport) {
    let (rows, report) = normalize_batch(
        raw,
        MissingIdPolicy::Drop,
        |value| InvoiceRow::from_value(value),
        |row, id| row.id = id,
    );
    report.log("invoices");
    (rows, report)
}

impl Searchable for InvoiceRow {
    fn matches_filter(&self, filter: &str) -> bool {
        self.invoice_no.to_lowercase().contains(filter)
            || self.id.to_lowercase().contains(filter)
            || self.loan_id.to_lowercase().contains(filter)
            || self.customer.to_lowercase().contains(filter)
            || self.status.to_lowercase().contains(filter)
            || format!("{}", self.amount).contains(filter)
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "invoice_no" => Some(self.invoice_no.clone()),
            "loan_id" => Some(self.loan_id.clone()),
            "customer" => Some(self.customer.clone()),
            "status" => Some(self.status.clone()),
            "amount" => Some(format!("{}", self.amount)),
            _ => None,
        }
    }
}

impl Sortable for InvoiceRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "invoice_no" => cmp_str(&self.invoice_no, &other.invoice_no),
            "loan_id" => self.loan_id.cmp(&other.loan_id),
            "customer" => cmp_str(&self.customer, &other.customer),
            "amount" => cmp_f64(self.amount, other.amount),
            "status" => cmp_str(&self.status, &other.status),
            "due_date" => cmp_opt_str(self.due_date.as_deref(), other.due_date.as_deref()),
            _ => Ordering::Equal,
        }
    }
}

impl ListRow for InvoiceRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn date_field(&self) -> Option<&str> {
        self.due_date.as_deref()
    }
}

impl ExcelExportable for InvoiceRow {
    fn headers() -> Vec<&'static str> {
        vec!["Invoice №", "Loan ID", "Customer", "Amount", "Due Date"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.invoice_no.clone(),
            self.loan_id.clone(),
            self.customer.clone(),
            format_money(self.amount),
            self.due_date
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
    fn test_fallbacks_and_defaults() {
        let (id, row) = InvoiceRow::from_value(&json!({
            "invoiceId": "INV-9",
            "number": "0009",
            "amount": "450.25",
            "invoiceStatus": "unpaid"
        }));
        assert_eq!(id, "INV-9");
        assert_eq!(row.invoice_no, "0009");
        assert_eq!(row.amount, 450.25);
        assert_eq!(row.status, "unpaid");
        assert_eq!(row.customer, "N/A");
        assert!(row.due_date.is_none());
    }

    #[test]
    fn test_missing_id_dropped() {
        let raw = vec![json!({"number": "1"}), json!({"id": "a", "number": "2"})];
        let (rows, report) = normalize_invoices(&raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(report.dropped, 1);
    }
}
