use crate::domain::loans::model::LoanRow;
use crate::shared::table_state::ListState;
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct LoansState {
    pub loans: Vec<LoanRow>,
    pub list: ListState,
    pub selected_ids: HashSet<String>,
    pub is_loaded: bool,
}

impl Default for LoansState {
    fn default() -> Self {
        Self {
            loans: Vec::new(),
            // Newest applications first.
            list: ListState::new("date_applied", false),
            selected_ids: HashSet::new(),
            is_loaded: false,
        }
    }
}

// Create state within component scope instead of thread-local so it is
// disposed when the view unmounts.
pub fn create_state() -> RwSignal<LoansState> {
    RwSignal::new(LoansState::default())
}

/// Statuses offered by the filter panel. The backend vocabulary is larger,
/// these are the ones operators actually triage by.
pub const STATUS_OPTIONS: &[&str] = &["active", "pending", "overdue", "defaulted", "closed"];
