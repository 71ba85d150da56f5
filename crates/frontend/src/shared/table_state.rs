//! Local table-state pipeline shared by every list view.
//!
//! A view owns a `ListState` value object inside its state signal and mutates
//! it only through the reducer methods below. `visible_rows` then computes the
//! exact slice to render: status filter -> text filter -> date-range filter ->
//! sort -> paginate. Keeping the whole computation pure keeps it testable
//! without a browser.

use crate::shared::list_utils::{sort_list, Searchable, Sortable};
use std::collections::HashSet;

/// Row interface the pipeline needs on top of search/sort.
pub trait ListRow: Searchable + Sortable {
    fn id(&self) -> &str;

    /// Canonical status value used by the status filter.
    fn status(&self) -> &str;

    /// ISO date string the date-range filter applies to. Views without a
    /// range filter leave the default.
    fn date_field(&self) -> Option<&str> {
        None
    }
}

/// What to do with rows whose date field is missing while a range filter is
/// active. Default keeps them visible; views whose report semantics depend on
/// the date column opt into `Exclude`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissingDatePolicy {
    #[default]
    Include,
    Exclude,
}

/// Whether this view pages locally or the backend already paged the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaginationMode {
    Client,
    /// The fetched rows are exactly one page; `total` comes from the
    /// response envelope.
    Server { total: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListFilter {
    pub search_text: String,
    /// When set, the text search matches only this field instead of the
    /// row's whole OR-list.
    pub search_field: Option<String>,
    /// Lower-cased status keys. Empty set means "no status filter".
    pub statuses: HashSet<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl ListFilter {
    /// Number of active filter axes, for the filter-panel badge.
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.search_text.trim().is_empty() {
            count += 1;
        }
        if !self.statuses.is_empty() {
            count += 1;
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            count += 1;
        }
        count
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    pub filter: ListFilter,
    pub sort_field: String,
    pub sort_ascending: bool,
    /// 0-indexed; displayed as `page + 1`.
    pub page: usize,
    pub page_size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 50;

impl ListState {
    pub fn new(sort_field: &str, sort_ascending: bool) -> Self {
        Self {
            filter: ListFilter::default(),
            sort_field: sort_field.to_string(),
            sort_ascending,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    // Reducers. Every filter change jumps back to the first page so the
    // operator never lands on a page that no longer exists.

    pub fn set_search(&mut self, text: String) {
        self.filter.search_text = text;
        self.page = 0;
    }

    pub fn set_search_field(&mut self, field: Option<String>) {
        self.filter.search_field = field;
        self.page = 0;
    }

    pub fn toggle_status(&mut self, status: &str) {
        let key = status.to_lowercase();
        if !self.filter.statuses.remove(&key) {
            self.filter.statuses.insert(key);
        }
        self.page = 0;
    }

    pub fn clear_statuses(&mut self) {
        self.filter.statuses.clear();
        self.page = 0;
    }

    pub fn set_date_range(&mut self, from: Option<String>, to: Option<String>) {
        self.filter.date_from = from.filter(|s| !s.is_empty());
        self.filter.date_to = to.filter(|s| !s.is_empty());
        self.page = 0;
    }

    /// Clicking the active column flips direction; a new column starts
    /// ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, size: usize) {
        if size > 0 {
            self.page_size = size;
            self.page = 0;
        }
    }
}

/// Output of the pipeline: the rows to render plus the page math the
/// pagination controls need.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleRows<T> {
    pub rows: Vec<T>,
    /// Filtered count (client mode) or the server-reported total.
    pub total_count: usize,
    pub total_pages: usize,
    /// The page actually shown, after clamping.
    pub page: usize,
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if total == 0 || page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

fn status_matches(row_status: &str, statuses: &HashSet<String>) -> bool {
    statuses.is_empty() || statuses.contains(&row_status.to_lowercase())
}

fn text_matches<T: Searchable>(row: &T, filter: &ListFilter) -> bool {
    let query = filter.search_text.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    match &filter.search_field {
        Some(field) => row
            .get_field_value(field)
            .map(|v| v.to_lowercase().contains(&query))
            .unwrap_or(false),
        None => row.matches_filter(&query),
    }
}

/// Inclusive range check on the `YYYY-MM-DD` date prefix. ISO dates compare
/// correctly as strings, which is also how the backend emits them.
fn date_in_range(
    date: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    policy: MissingDatePolicy,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let day = match date {
        Some(d) if !d.is_empty() => &d[..d.len().min(10)],
        _ => return policy == MissingDatePolicy::Include,
    };
    if let Some(from) = from {
        if day < &from[..from.len().min(10)] {
            return false;
        }
    }
    if let Some(to) = to {
        if day > &to[..to.len().min(10)] {
            return false;
        }
    }
    true
}

/// Stages 1-3: the filter predicates, intersected.
pub fn apply_filters<T: ListRow + Clone>(
    rows: &[T],
    filter: &ListFilter,
    policy: MissingDatePolicy,
) -> Vec<T> {
    let before = rows.len();
    let filtered: Vec<T> = rows
        .iter()
        .filter(|row| status_matches(row.status(), &filter.statuses))
        .filter(|row| text_matches(*row, filter))
        .filter(|row| {
            date_in_range(
                row.date_field(),
                filter.date_from.as_deref(),
                filter.date_to.as_deref(),
                policy,
            )
        })
        .cloned()
        .collect();
    if policy == MissingDatePolicy::Exclude
        && (filter.date_from.is_some() || filter.date_to.is_some())
    {
        let undated = rows.iter().filter(|r| r.date_field().is_none()).count();
        if undated > 0 {
            log::debug!(
                "date filter excluded {} undated rows out of {}",
                undated,
                before
            );
        }
    }
    filtered
}

/// The full pipeline. In `Server` mode the received rows already are one
/// page, so the local slice step is skipped and page math comes from the
/// envelope total.
pub fn visible_rows<T: ListRow + Clone>(
    rows: &[T],
    state: &ListState,
    mode: PaginationMode,
    policy: MissingDatePolicy,
) -> VisibleRows<T> {
    let mut filtered = apply_filters(rows, &state.filter, policy);
    sort_list(&mut filtered, &state.sort_field, state.sort_ascending);

    match mode {
        PaginationMode::Server { total } => {
            let total_pages = page_count(total, state.page_size);
            VisibleRows {
                rows: filtered,
                total_count: total,
                total_pages,
                page: state.page,
            }
        }
        PaginationMode::Client => {
            let total_count = filtered.len();
            let total_pages = page_count(total_count, state.page_size);
            // Clamp after the filtered set shrinks.
            let page = state.page.min(total_pages.saturating_sub(1));
            let start = page * state.page_size;
            let end = (start + state.page_size).min(total_count);
            let rows = if start < total_count {
                filtered[start..end].to_vec()
            } else {
                Vec::new()
            };
            VisibleRows {
                rows,
                total_count,
                total_pages,
                page,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: String,
        agent: String,
        amount: f64,
        status: String,
        date: Option<String>,
    }

    fn row(id: &str, agent: &str, amount: f64, status: &str, date: Option<&str>) -> Row {
        Row {
            id: id.to_string(),
            agent: agent.to_string(),
            amount,
            status: status.to_string(),
            date: date.map(|d| d.to_string()),
        }
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            self.agent.to_lowercase().contains(filter)
                || self.id.to_lowercase().contains(filter)
                || self.status.to_lowercase().contains(filter)
                || format!("{}", self.amount).contains(filter)
        }

        fn get_field_value(&self, field: &str) -> Option<String> {
            match field {
                "id" => Some(self.id.clone()),
                "agent" => Some(self.agent.clone()),
                "amount" => Some(format!("{}", self.amount)),
                "status" => Some(self.status.clone()),
                _ => None,
            }
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "agent" => crate::shared::list_utils::cmp_str(&self.agent, &other.agent),
                "amount" => crate::shared::list_utils::cmp_f64(self.amount, other.amount),
                "date" => self.date.cmp(&other.date),
                _ => Ordering::Equal,
            }
        }
    }

    impl ListRow for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn status(&self) -> &str {
            &self.status
        }
        fn date_field(&self) -> Option<&str> {
            self.date.as_deref()
        }
    }

    fn state(sort_field: &str, ascending: bool) -> ListState {
        let mut s = ListState::new(sort_field, ascending);
        s.page_size = 10;
        s
    }

    #[test]
    fn test_empty_status_set_keeps_all() {
        let rows = vec![row("1", "a", 1.0, "active", None), row("2", "b", 2.0, "closed", None)];
        let s = state("amount", true);
        let out = visible_rows(&rows, &s, PaginationMode::Client, MissingDatePolicy::Include);
        assert_eq!(out.total_count, 2);
    }

    #[test]
    fn test_filter_commutativity() {
        // Status filter and text filter are independent predicates; the
        // pipeline result equals applying them in either order by hand.
        let rows: Vec<Row> = (0..20)
            .map(|i| {
                row(
                    &format!("L{:02}", i),
                    &format!("agent{}", i % 7),
                    i as f64,
                    if i % 2 == 0 { "active" } else { "closed" },
                    None,
                )
            })
            .collect();

        let mut filter = ListFilter::default();
        filter.statuses.insert("active".to_string());
        filter.search_text = "agent2".to_string();

        let status_first: Vec<&Row> = rows
            .iter()
            .filter(|r| r.status == "active")
            .filter(|r| r.agent.contains("agent2"))
            .collect();
        let text_first: Vec<&Row> = rows
            .iter()
            .filter(|r| r.agent.contains("agent2"))
            .filter(|r| r.status == "active")
            .collect();
        assert_eq!(status_first, text_first);

        let piped = apply_filters(&rows, &filter, MissingDatePolicy::Include);
        let piped_refs: Vec<&Row> = piped.iter().collect();
        assert_eq!(piped_refs, status_first);
    }

    #[test]
    fn test_sort_reversal_and_stability() {
        let rows = vec![
            row("1", "c", 5.0, "active", None),
            row("2", "a", 3.0, "active", None),
            row("3", "b", 5.0, "active", None),
            row("4", "d", 1.0, "active", None),
        ];
        let mut asc = state("amount", true);
        asc.page_size = 100;
        let up = visible_rows(&rows, &asc, PaginationMode::Client, MissingDatePolicy::Include);
        let up_ids: Vec<&str> = up.rows.iter().map(|r| r.id.as_str()).collect();
        // Ties (ids 1 and 3, both 5.0) keep their incoming order.
        assert_eq!(up_ids, vec!["4", "2", "1", "3"]);

        let mut desc = asc.clone();
        desc.toggle_sort("amount");
        let down = visible_rows(&rows, &desc, PaginationMode::Client, MissingDatePolicy::Include);
        let down_ids: Vec<&str> = down.rows.iter().map(|r| r.id.as_str()).collect();
        // Reversed comparator, not reversed array: ties still keep incoming
        // order, non-tied elements reverse.
        assert_eq!(down_ids, vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_toggle_sort_new_column_starts_ascending() {
        let mut s = state("amount", false);
        s.toggle_sort("agent");
        assert_eq!(s.sort_field, "agent");
        assert!(s.sort_ascending);
        s.toggle_sort("agent");
        assert!(!s.sort_ascending);
    }

    #[test]
    fn test_pagination_coverage() {
        let rows: Vec<Row> = (0..23)
            .map(|i| row(&format!("{:02}", i), "a", i as f64, "active", None))
            .collect();
        let mut s = state("amount", true);
        s.page_size = 10;

        let mut seen: Vec<String> = Vec::new();
        let pages = page_count(rows.len(), s.page_size);
        assert_eq!(pages, 3);
        for p in 0..pages {
            s.page = p;
            let out = visible_rows(&rows, &s, PaginationMode::Client, MissingDatePolicy::Include);
            if p == pages - 1 {
                assert_eq!(out.rows.len(), 3); // 23 mod 10
            } else {
                assert_eq!(out.rows.len(), 10);
            }
            seen.extend(out.rows.iter().map(|r| r.id.clone()));
        }
        let all: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_page_clamped_when_filter_shrinks_set() {
        let rows: Vec<Row> = (0..30)
            .map(|i| row(&format!("{:02}", i), "agent1", i as f64, "active", None))
            .collect();
        let mut s = state("amount", true);
        s.page = 2;
        // Narrow to 3 rows; page 2 no longer exists.
        s.filter.search_text = "agent1".to_string();
        let narrow: Vec<Row> = rows.into_iter().take(3).collect();
        let out = visible_rows(&narrow, &s, PaginationMode::Client, MissingDatePolicy::Include);
        assert_eq!(out.page, 0);
        assert_eq!(out.rows.len(), 3);
    }

    #[test]
    fn test_date_range_policies() {
        let rows = vec![
            row("1", "a", 1.0, "active", Some("2026-01-10")),
            row("2", "b", 2.0, "active", Some("2026-02-10T08:30:00Z")),
            row("3", "c", 3.0, "active", None),
        ];
        let mut filter = ListFilter::default();
        filter.date_from = Some("2026-02-01".to_string());
        filter.date_to = Some("2026-02-28".to_string());

        let kept = apply_filters(&rows, &filter, MissingDatePolicy::Include);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);

        let strict = apply_filters(&rows, &filter, MissingDatePolicy::Exclude);
        let ids: Vec<&str> = strict.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_server_mode_skips_local_slice() {
        let rows: Vec<Row> = (0..50)
            .map(|i| row(&format!("{:02}", i), "a", i as f64, "active", None))
            .collect();
        let mut s = state("amount", true);
        s.page = 3;
        s.page_size = 50;
        let out = visible_rows(
            &rows,
            &s,
            PaginationMode::Server { total: 480 },
            MissingDatePolicy::Include,
        );
        assert_eq!(out.rows.len(), 50);
        assert_eq!(out.total_count, 480);
        assert_eq!(out.total_pages, 10);
        assert_eq!(out.page, 3);
    }

    #[test]
    fn test_end_to_end_scenario() {
        // 25 rows, page size 10. 12 are "active"; of those, 2 match "agent5".
        let mut rows: Vec<Row> = Vec::new();
        for i in 0..25 {
            let status = if i < 12 { "active" } else { "written_off" };
            let agent = match i {
                3 => "agent5",
                7 => "agent5",
                20 => "agent5", // matches text but not status
                _ => "agent1",
            };
            rows.push(row(&format!("L{:02}", i), agent, (25 - i) as f64, status, None));
        }

        let mut s = state("amount", true);
        s.filter.statuses.insert("active".to_string());
        s.filter.search_text = "agent5".to_string();

        let out = visible_rows(&rows, &s, PaginationMode::Client, MissingDatePolicy::Include);
        assert_eq!(out.total_count, 2);
        assert_eq!(out.total_pages, 1);
        assert_eq!(out.page, 0);
        let ids: Vec<&str> = out.rows.iter().map(|r| r.id.as_str()).collect();
        // L07 has amount 18, L03 has amount 22: ascending by amount.
        assert_eq!(ids, vec!["L07", "L03"]);
    }

    #[test]
    fn test_search_field_narrows_match() {
        let rows = vec![
            row("agent5", "someone", 1.0, "active", None),
            row("1", "agent5", 2.0, "active", None),
        ];
        let mut s = state("amount", true);
        s.filter.search_text = "agent5".to_string();
        s.filter.search_field = Some("agent".to_string());
        let out = visible_rows(&rows, &s, PaginationMode::Client, MissingDatePolicy::Include);
        assert_eq!(out.total_count, 1);
        assert_eq!(out.rows[0].id, "1");
    }

    #[test]
    fn test_numeric_search_uses_string_form() {
        let rows = vec![row("1", "a", 5000.0, "active", None)];
        let mut s = state("amount", true);
        s.filter.search_text = "500".to_string();
        let out = visible_rows(&rows, &s, PaginationMode::Client, MissingDatePolicy::Include);
        assert_eq!(out.total_count, 1);
    }
}
