//! URL query-string mirroring for list filters.
//!
//! Views that want shareable links read their initial `ListState` from
//! `window.location.search` at mount and write changes back with
//! `history.replace_state`, so copy-pasting the address reproduces the
//! filtered view. Parsing is default-on-missing, same as field
//! normalization: a malformed query never breaks the view.

use crate::shared::table_state::ListState;
use serde::{Deserialize, Serialize};
use web_sys::window;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Comma-joined status keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    /// 1-indexed in the URL for human readability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        *self == ListQuery::default()
    }

    /// Parse a query string, tolerating junk. A leading `?` is accepted.
    pub fn parse(query: &str) -> Self {
        serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default()
    }

    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(self).unwrap_or_default()
    }

    /// Capture the shareable axes of a list state.
    pub fn from_state(state: &ListState) -> Self {
        let search = state.filter.search_text.trim();
        let mut statuses: Vec<&str> = state.filter.statuses.iter().map(|s| s.as_str()).collect();
        statuses.sort_unstable();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            status: (!statuses.is_empty()).then(|| statuses.join(",")),
            date_from: state.filter.date_from.clone(),
            date_to: state.filter.date_to.clone(),
            page: (state.page > 0).then_some(state.page + 1),
        }
    }

    /// Overlay the query onto a freshly-defaulted state.
    pub fn apply_to(&self, state: &mut ListState) {
        if let Some(search) = &self.search {
            state.filter.search_text = search.clone();
        }
        if let Some(status) = &self.status {
            state.filter.statuses = status
                .split(',')
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase())
                .collect();
        }
        state.filter.date_from = self.date_from.clone().filter(|s| !s.is_empty());
        state.filter.date_to = self.date_to.clone().filter(|s| !s.is_empty());
        if let Some(page) = self.page {
            state.page = page.saturating_sub(1);
        }
    }
}

/// Read the current location's query.
pub fn read_from_location() -> ListQuery {
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    ListQuery::parse(&search)
}

/// Mirror the query into the address bar without a navigation.
pub fn write_to_location(query: &ListQuery) {
    let Some(w) = window() else {
        return;
    };
    let qs = query.to_query_string();
    let path = w.location().pathname().unwrap_or_default();
    let new_url = if qs.is_empty() {
        path
    } else {
        format!("{}?{}", path, qs)
    };
    let current = w.location().search().unwrap_or_default();
    let target = if qs.is_empty() {
        String::new()
    } else {
        format!("?{}", qs)
    };
    if current == target {
        return;
    }
    if let Ok(history) = w.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::table_state::ListState;

    #[test]
    fn test_parse_defaults_on_missing() {
        let q = ListQuery::parse("");
        assert!(q.is_empty());

        let q = ListQuery::parse("?status=active,overdue&page=3");
        assert_eq!(q.status.as_deref(), Some("active,overdue"));
        assert_eq!(q.page, Some(3));
        assert!(q.search.is_none());
    }

    #[test]
    fn test_roundtrip_through_state() {
        let mut state = ListState::new("date_applied", false);
        state.set_search("kamau".to_string());
        state.toggle_status("Active");
        state.toggle_status("overdue");
        state.set_date_range(Some("2026-01-01".to_string()), Some("2026-01-31".to_string()));
        state.set_page(4);

        let q = ListQuery::from_state(&state);
        assert_eq!(q.page, Some(5)); // 1-indexed in the URL
        assert_eq!(q.status.as_deref(), Some("active,overdue"));

        let reparsed = ListQuery::parse(&q.to_query_string());
        let mut restored = ListState::new("date_applied", false);
        reparsed.apply_to(&mut restored);
        assert_eq!(restored.filter.search_text, "kamau");
        assert_eq!(restored.filter.statuses, state.filter.statuses);
        assert_eq!(restored.filter.date_from.as_deref(), Some("2026-01-01"));
        assert_eq!(restored.page, 4);
    }

    #[test]
    fn test_apply_ignores_junk() {
        let q = ListQuery::parse("?bogus=1&page=notanumber");
        let mut state = ListState::new("amount", true);
        q.apply_to(&mut state);
        assert_eq!(state.page, 0);
        assert!(state.filter.search_text.is_empty());
    }

    #[test]
    fn test_empty_state_produces_empty_query() {
        let state = ListState::new("amount", true);
        let q = ListQuery::from_state(&state);
        assert!(q.is_empty());
        assert_eq!(q.to_query_string(), "");
    }
}
