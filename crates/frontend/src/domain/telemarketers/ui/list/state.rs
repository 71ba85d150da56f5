use crate::domain::telemarketers::model::TelemarketerRow;
use crate::shared::table_state::ListState;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct TelemarketersState {
    pub telemarketers: Vec<TelemarketerRow>,
    pub list: ListState,
    pub is_loaded: bool,
}

impl Default for TelemarketersState {
    fn default() -> Self {
        Self {
            telemarketers: Vec::new(),
            list: ListState::new("name", true),
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<TelemarketersState> {
    RwSignal::new(TelemarketersState::default())
}

pub const STATUS_OPTIONS: &[&str] = &["active", "inactive"];
