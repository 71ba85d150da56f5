use crate::shared::api_utils::{get_json, post_json};
use crate::shared::table_state::ListState;
use contracts::domain::repayments::StatusChangeRequest;
use contracts::shared::pagination::Paginated;
use serde_json::Value;

/// The repayments endpoint pages on the server; filters are forwarded as
/// query parameters and the envelope carries the total.
pub fn build_query(list: &ListState) -> String {
    let mut params: Vec<String> = vec![
        format!("page={}", list.page + 1),
        format!("page_size={}", list.page_size),
    ];
    let search = list.filter.search_text.trim();
    if !search.is_empty() {
        params.push(format!("search={}", urlencoding::encode(search)));
    }
    if !list.filter.statuses.is_empty() {
        let mut statuses: Vec<&str> = list.filter.statuses.iter().map(|s| s.as_str()).collect();
        statuses.sort_unstable();
        params.push(format!("status={}", statuses.join(",")));
    }
    if let Some(from) = &list.filter.date_from {
        params.push(format!("date_from={}", from));
    }
    if let Some(to) = &list.filter.date_to {
        params.push(format!("date_to={}", to));
    }
    params.join("&")
}

pub async fn fetch_repayments(list: &ListState) -> Result<Paginated<Value>, String> {
    get_json(&format!("/api/repayments?{}", build_query(list))).await
}

pub async fn update_status(id: &str, status: &str) -> Result<(), String> {
    let request = StatusChangeRequest {
        status: status.to_string(),
        note: None,
    };
    let _: Value = post_json(
        &format!("/api/repayments/{}/status", urlencoding::encode(id)),
        &request,
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_defaults() {
        let list = ListState::new("paid_at", false);
        assert_eq!(build_query(&list), "page=1&page_size=50");
    }

    #[test]
    fn test_build_query_with_filters() {
        let mut list = ListState::new("paid_at", false);
        list.set_search("alice njoroge".to_string());
        list.toggle_status("confirmed");
        list.set_date_range(Some("2026-04-01".to_string()), Some("2026-04-30".to_string()));
        list.set_page(2);

        let query = build_query(&list);
        assert!(query.contains("page=3"));
        assert!(query.contains("search=alice%20njoroge"));
        assert!(query.contains("status=confirmed"));
        assert!(query.contains("date_from=2026-04-01"));
        assert!(query.contains("date_to=2026-04-30"));
    }
}
