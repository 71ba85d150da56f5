use crate::domain::invoices::model::InvoiceRow;
use crate::shared::table_state::ListState;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct InvoicesState {
    pub invoices: Vec<InvoiceRow>,
    pub list: ListState,
    pub is_loaded: bool,
}

impl Default for InvoicesState {
    fn default() -> Self {
        Self {
            invoices: Vec::new(),
            // Soonest due first.
            list: ListState::new("due_date", true),
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<InvoicesState> {
    RwSignal::new(InvoicesState::default())
}

pub const STATUS_OPTIONS: &[&str] = &["paid", "unpaid", "overdue"];
