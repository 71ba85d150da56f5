use crate::domain::repair_orders::model::RepairOrderRow;
use crate::shared::table_state::ListState;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct RepairOrdersState {
    pub orders: Vec<RepairOrderRow>,
    pub list: ListState,
    pub is_loaded: bool,
}

impl Default for RepairOrdersState {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            // Most recently opened tickets first.
            list: ListState::new("opened_at", false),
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<RepairOrdersState> {
    RwSignal::new(RepairOrdersState::default())
}

pub const STATUS_OPTIONS: &[&str] = &["in_repair", "awaiting_parts", "closed"];
