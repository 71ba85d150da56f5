//! Canonical telemarketer row.
//!
//! The telesales roster is the data-quality canary: records occasionally
//! arrive without ids from the upstream CRM sync, so this view keeps them
//! visible under a synthetic id instead of dropping them.

use crate::shared::export::ExcelExportable;
use crate::shared::list_utils::{cmp_str, Searchable, Sortable};
use crate::shared::normalize::{
    normalize_batch, str_or, u64_or, BatchReport, MissingIdPolicy, NA,
};
use crate::shared::table_state::ListRow;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq)]
pub struct TelemarketerRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub region: String,
    pub leads_assigned: u64,
    pub sales_closed: u64,
    pub status: String,
    /// True when the id was synthesized because the record had none.
    /// Synthetic rows cannot be deleted from this screen.
    pub synthetic: bool,
}

impl TelemarketerRow {
    pub fn from_value(value: &Value) -> (String, Self) {
        let id = str_or(value, &["id", "teleMarketerId", "agentId"], "");
        let row = Self {
            id: id.clone(),
            name: str_or(value, &["name", "fullName", "agentName"], NA),
            phone: str_or(value, &["phoneNumber", "msisdn"], NA),
            region: str_or(value, &["region", "territory"], NA),
            leads_assigned: u64_or(value, &["leadsAssigned", "assignedLeads"]),
            sales_closed: u64_or(value, &["salesClosed", "closedSales", "conversions"]),
            status: str_or(value, &["status"], NA),
            synthetic: false,
        };
        (id, row)
    }
}

pub fn normalize_telemarketers(raw: &[Value]) -> (Vec<TelemarketerRow>, BatchReport) {
    let (rows, report) = normalize_batch(
        raw,
        MissingIdPolicy::Flag,
        |value| TelemarketerRow::from_value(value),
        |row, id| {
            row.id = id;
            row.synthetic = true;
        },
    );
    report.log("telemarketers");
    (rows, report)
}

impl Searchable for TelemarketerRow {
    fn matches_filter(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(filter)
            || self.id.to_lowercase().contains(filter)
            || self.phone.to_lowercase().contains(filter)
            || self.region.to_lowercase().contains(filter)
            || self.status.to_lowercase().contains(filter)
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "phone" => Some(self.phone.clone()),
            "region" => Some(self.region.clone()),
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }
}

impl Sortable for TelemarketerRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => cmp_str(&self.name, &other.name),
            "region" => cmp_str(&self.region, &other.region),
            "leads_assigned" => self.leads_assigned.cmp(&other.leads_assigned),
            "sales_closed" => self.sales_closed.cmp(&other.sales_closed),
            "status" => cmp_str(&self.status, &other.status),
            _ => Ordering::Equal,
        }
    }
}

impl ListRow for TelemarketerRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &str {
        &self.status
    }
}

impl ExcelExportable for TelemarketerRow {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Phone", "Region", "Leads", "Closed"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.phone.clone(),
            self.region.clone(),
            self.leads_assigned.to_string(),
            self.sales_closed.to_string(),
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
    fn test_flag_policy_keeps_idless_records() {
        let raw = vec![
            json!({"teleMarketerId": "T1", "name": "Joy", "leadsAssigned": 14}),
            json!({"name": "Unknown CRM import", "leadsAssigned": "3"}),
        ];
        let (rows, report) = normalize_telemarketers(&raw);
        assert_eq!(rows.len(), 2);
        assert_eq!(report.missing_id, 1);
        assert_eq!(report.dropped, 0);
        assert_eq!(rows[1].id, "row-1");
        assert!(rows[1].synthetic);
        assert_eq!(rows[1].leads_assigned, 3);
    }

    #[test]
    fn test_count_defaults_to_zero() {
        let (_, row) = TelemarketerRow::from_value(&json!({"id": "T2", "name": "Sam"}));
        assert_eq!(row.leads_assigned, 0);
        assert_eq!(row.sales_closed, 0);
    }
}
