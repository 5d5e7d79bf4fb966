//! # Cache keys
//!
//! Every fetched resource is stored in the [`crate::QueryCache`] under a
//! [`QueryKey`]: an ordered list of [`KeyPart`]s such as
//! `["event", 42, "registrations", {page=1}]`. Keys form a hierarchy, and
//! invalidation works on prefixes: invalidating `["event", 42]` marks the event
//! itself, its statistics and every registration list stale in one call.
//!
//! [`Filters`] carries the query-string filters of list requests. It is an
//! ordered map so two filter sets with the same content always produce the
//! same key, regardless of insertion order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered set of list filters (`search`, `page`, `expired`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Empty values are dropped so an empty search box
    /// does not create a distinct cache entry.
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        if value.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), value);
        }
    }

    /// Copy of these filters with the `page` parameter set.
    pub fn page(&self, page: u32) -> Self {
        self.clone().with("page", page)
    }

    /// The same filters without paging, used for list keys.
    pub fn without_page(&self) -> Self {
        let mut filters = self.clone();
        filters.0.remove("page");
        filters
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Filters as a JSON object, the shape the fetch wrapper turns into a
    /// query string.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

/// One segment of a [`QueryKey`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyPart {
    Str(String),
    Int(i64),
    Filters(Filters),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Str(s) => write!(f, "{s}"),
            KeyPart::Int(i) => write!(f, "{i}"),
            KeyPart::Filters(filters) => {
                write!(f, "{{")?;
                for (i, (k, v)) in filters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Composite identifier of a cached query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
    /// Start a key at a resource root, e.g. `QueryKey::new("event")`.
    pub fn new(root: &str) -> Self {
        Self(vec![KeyPart::Str(root.to_string())])
    }

    pub fn push_str(mut self, part: &str) -> Self {
        self.0.push(KeyPart::Str(part.to_string()));
        self
    }

    pub fn push_int(mut self, part: i64) -> Self {
        self.0.push(KeyPart::Int(part));
        self
    }

    /// Append a filter set. Nothing is appended for empty filters, so
    /// `list()` and `list(&Filters::new())` address the same entry.
    pub fn push_filters(mut self, filters: &Filters) -> Self {
        if !filters.is_empty() {
            self.0.push(KeyPart::Filters(filters.clone()));
        }
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Whether `prefix` addresses this key or one of its ancestors.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let all = QueryKey::new("event");
        let detail = QueryKey::new("event").push_int(7);
        let regs = detail.clone().push_str("registrations");

        assert!(regs.starts_with(&all));
        assert!(regs.starts_with(&detail));
        assert!(regs.starts_with(&regs));
        assert!(!detail.starts_with(&regs));
        assert!(!QueryKey::new("events").starts_with(&all));
        assert!(!QueryKey::new("event").push_int(8).starts_with(&detail));
    }

    #[test]
    fn test_empty_filters_are_not_appended() {
        let plain = QueryKey::new("news").push_str("list");
        let with_empty = QueryKey::new("news").push_str("list").push_filters(&Filters::new());
        assert_eq!(plain, with_empty);

        let filtered = plain.clone().push_filters(&Filters::new().with("search", "bedpres"));
        assert_ne!(plain, filtered);
        assert!(filtered.starts_with(&plain));
    }

    #[test]
    fn test_filters_are_order_independent() {
        let a = Filters::new().with("expired", true).with("category", 3);
        let b = Filters::new().with("category", 3).with("expired", true);
        assert_eq!(a, b);
        assert_eq!(
            QueryKey::new("event").push_filters(&a),
            QueryKey::new("event").push_filters(&b)
        );
    }

    #[test]
    fn test_empty_filter_value_removes_key() {
        let filters = Filters::new().with("search", "abc").with("search", "");
        assert!(filters.is_empty());
    }

    #[test]
    fn test_page_helpers() {
        let filters = Filters::new().with("search", "x");
        let paged = filters.page(3);
        assert_eq!(paged.get("page"), Some("3"));
        assert_eq!(paged.without_page(), filters);
    }

    #[test]
    fn test_display() {
        let key = QueryKey::new("gallery")
            .push_int(2)
            .push_str("pictures")
            .push_filters(&Filters::new().with("page", 1).with("a", "b"));
        assert_eq!(key.to_string(), "gallery/2/pictures/{a=b,page=1}");
    }
}
