//! Paginated list envelopes and page accumulation for "load more" lists.

use serde::{Deserialize, Serialize};

/// Wire format of every paginated list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginationResponse<T> {
    #[serde(default)]
    pub count: u32,
    /// Number of the next page, `None` on the last page.
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub previous: Option<u32>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for PaginationResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// Pages fetched so far for one list, in request order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pages<T> {
    pages: Vec<PaginationResponse<T>>,
}

impl<T> Default for Pages<T> {
    fn default() -> Self {
        Self { pages: Vec::new() }
    }
}

impl<T: Clone> Pages<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, page: PaginationResponse<T>) {
        self.pages.push(page);
    }

    /// Page number to request next. The first page is 1.
    pub fn next_page(&self) -> Option<u32> {
        match self.pages.last() {
            None => Some(1),
            Some(last) => last.next,
        }
    }

    pub fn has_next_page(&self) -> bool {
        !self.pages.is_empty() && self.next_page().is_some()
    }

    /// All results across pages, flattened.
    pub fn items(&self) -> Vec<T> {
        self.pages
            .iter()
            .flat_map(|page| page.results.iter().cloned())
            .collect()
    }

    /// Total count reported by the server, or 0 before the first page.
    pub fn total(&self) -> u32 {
        self.pages.first().map(|p| p.count).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.results.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(results: Vec<i32>, next: Option<u32>) -> PaginationResponse<i32> {
        PaginationResponse {
            count: 5,
            next,
            previous: None,
            results,
        }
    }

    #[test]
    fn test_accumulates_pages_in_order() {
        let mut pages = Pages::new();
        assert_eq!(pages.next_page(), Some(1));
        assert!(!pages.has_next_page());
        assert!(pages.is_empty());

        pages.push(page(vec![1, 2, 3], Some(2)));
        assert_eq!(pages.next_page(), Some(2));
        assert!(pages.has_next_page());

        pages.push(page(vec![4, 5], None));
        assert_eq!(pages.next_page(), None);
        assert!(!pages.has_next_page());
        assert_eq!(pages.items(), vec![1, 2, 3, 4, 5]);
        assert_eq!(pages.total(), 5);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_parses_server_envelope() {
        let json = r#"{"count": 1, "next": null, "previous": null, "results": [{"id": 1}]}"#;
        let parsed: PaginationResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.count, 1);
        assert!(parsed.next.is_none());
        assert_eq!(parsed.results.len(), 1);
    }

    #[test]
    fn test_missing_fields_default() {
        let parsed: PaginationResponse<i32> = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, PaginationResponse::default());
    }
}
