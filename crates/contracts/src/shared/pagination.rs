use serde::{Deserialize, Serialize};

/// Pagination metadata attached by list endpoints that page on the server.
///
/// Endpoints that return the full dataset omit the envelope and the client
/// pages locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl PageInfo {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }
}

/// List response envelope. `pagination` present means the server already
/// paged the data and `items` is exactly one page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let info = PageInfo {
            total: 25,
            page: 0,
            page_size: 10,
        };
        assert_eq!(info.total_pages(), 3);

        let exact = PageInfo {
            total: 30,
            page: 0,
            page_size: 10,
        };
        assert_eq!(exact.total_pages(), 3);

        let empty = PageInfo {
            total: 0,
            page: 0,
            page_size: 10,
        };
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_envelope_roundtrip() {
        let json = r#"{"items":[1,2,3],"pagination":{"total":3,"page":0,"page_size":50}}"#;
        let env: Paginated<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(env.items, vec![1, 2, 3]);
        assert_eq!(env.pagination.unwrap().total, 3);

        let bare = r#"{"items":[1,2,3]}"#;
        let env: Paginated<i32> = serde_json::from_str(bare).unwrap();
        assert!(env.pagination.is_none());
    }
}
