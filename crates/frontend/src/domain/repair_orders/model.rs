//! Canonical repair-order row.

use crate::shared::date_utils::format_date;
use crate::shared::export::ExcelExportable;
use crate::shared::list_utils::{cmp_opt_str, cmp_str, Searchable, Sortable};
use crate::shared::normalize::{
    normalize_batch, pick_bool, pick_str, str_or, BatchReport, MissingIdPolicy, NA,
};
use crate::shared::table_state::ListRow;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
pub struct RepairOrderRow {
    pub id: String,
    pub ticket_no: String,
    pub imei: String,
    pub customer: String,
    pub fault: String,
    pub status: String,
    pub opened_at: Option<String>,
    /// Current remote-lock state of the financed device.
    pub device_locked: bool,
}

impl RepairOrderRow {
    pub fn from_value(value: &Value) -> (String, Self) {
        let id = str_or(value, &["id", "ticketId", "repairOrderId"], "");
        let row = Self {
            id: id.clone(),
            ticket_no: str_or(value, &["ticketNumber", "ticketNo"], NA),
            imei: str_or(value, &["imei", "device.imei", "deviceImei"], NA),
            customer: str_or(value, &["customerName", "owner.name"], NA),
            fault: str_or(value, &["faultDescription", "fault", "issue"], NA),
            status: str_or(value, &["status", "repairStatus"], NA),
            opened_at: pick_str(value, &["openedAt", "createdAt", "receivedDate"]),
            device_locked: pick_bool(value, &["deviceLocked", "device.locked"]).unwrap_or(false),
        };
        (id, row)
    }
}

pub fn normalize_repair_orders(raw: &[Value]) -> (Vec<RepairOrderRow>, BatchReport) {
    let (rows, report) = normalize_batch(
        raw,
        MissingIdPolicy::Drop,
        |value| RepairOrderRow::from_value(value),
        |row, id| row.id = id,
    );
    report.log("repair_orders");
    (rows, report)
}

impl Searchable for RepairOrderRow {
    fn matches_filter(&self, filter: &str) -> bool {
        self.ticket_no.to_lowercase().contains(filter)
            || self.id.to_lowercase().contains(filter)
            || self.imei.to_lowercase().contains(filter)
            || self.customer.to_lowercase().contains(filter)
            || self.fault.to_lowercase().contains(filter)
            || self.status.to_lowercase().contains(filter)
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "ticket_no" => Some(self.ticket_no.clone()),
            "imei" => Some(self.imei.clone()),
            "customer" => Some(self.customer.clone()),
            "fault" => Some(self.fault.clone()),
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }
}

impl Sortable for RepairOrderRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "ticket_no" => cmp_str(&self.ticket_no, &other.ticket_no),
            "customer" => cmp_str(&self.customer, &other.customer),
            "status" => cmp_str(&self.status, &other.status),
            "opened_at" => cmp_opt_str(self.opened_at.as_deref(), other.opened_at.as_deref()),
            _ => Ordering::Equal,
        }
    }
}

impl ListRow for RepairOrderRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn date_field(&self) -> Option<&str> {
        self.opened_at.as_deref()
    }
}

impl ExcelExportable for RepairOrderRow {
    fn headers() -> Vec<&'static str> {
        vec!["Ticket №", "IMEI", "Customer", "Fault", "Opened", "Device Locked"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.ticket_no.clone(),
            self.imei.clone(),
            self.customer.clone(),
            self.fault.clone(),
            self.opened_at
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| "—".to_string()),
            if self.device_locked { "yes" } else { "no" }.to_string(),
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
    fn test_nested_device_fields() {
        let (id, row) = RepairOrderRow::from_value(&json!({
            "ticketId": "RO-55",
            "ticketNumber": "2026-0055",
            "device": {"imei": "350000000000001", "locked": true},
            "owner": {"name": "Brian Oduya"},
            "issue": "screen replacement",
            "repairStatus": "in_repair",
            "receivedDate": "2026-06-20"
        }));
        assert_eq!(id, "RO-55");
        assert_eq!(row.imei, "350000000000001");
        assert!(row.device_locked);
        assert_eq!(row.fault, "screen replacement");
    }

    #[test]
    fn test_defaults() {
        let (_, row) = RepairOrderRow::from_value(&json!({"id": "RO-1"}));
        assert_eq!(row.ticket_no, "N/A");
        assert!(!row.device_locked);
        assert!(row.opened_at.is_none());
    }
}
