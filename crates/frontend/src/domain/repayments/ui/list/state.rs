use crate::domain::repayments::model::RepaymentRow;
use crate::shared::date_utils::current_month_range;
use crate::shared::table_state::ListState;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct RepaymentsState {
    pub repayments: Vec<RepaymentRow>,
    pub list: ListState,
    /// Total from the server envelope. `None` means the endpoint returned a
    /// bare array and the view falls back to client-side paging.
    pub server_total: Option<usize>,
    pub is_loaded: bool,
}

impl Default for RepaymentsState {
    fn default() -> Self {
        // Default period: current month.
        let (date_from, date_to) = current_month_range();
        let mut list = ListState::new("paid_at", false);
        list.filter.date_from = Some(date_from);
        list.filter.date_to = Some(date_to);
        Self {
            repayments: Vec::new(),
            list,
            server_total: None,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<RepaymentsState> {
    RwSignal::new(RepaymentsState::default())
}

pub const STATUS_OPTIONS: &[&str] = &["pending", "confirmed", "failed"];
