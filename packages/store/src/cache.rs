//! # Query cache
//!
//! [`QueryCache`] is the client-side store for fetched resources. Entries are
//! addressed by [`QueryKey`] and hold the JSON representation of the response,
//! so one cache serves every resource type.
//!
//! The lifecycle is the usual fetch/invalidate loop:
//!
//! 1. a view asks for a key; a fresh entry is served directly, a missing or
//!    stale one is (re)fetched and written back with [`QueryCache::set`];
//! 2. after a successful mutation the caller invalidates the affected key
//!    prefixes, which marks entries stale but keeps their data for display;
//! 3. entries are dropped with [`QueryCache::remove`] (e.g. on logout).
//!
//! Every change bumps [`QueryCache::generation`], which also stamps each
//! write so old entries can be aged out with
//! [`QueryCache::expire_older_than`]. Writes are last-write-wins; there is
//! no ordering between concurrent refetches.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::key::QueryKey;

#[derive(Clone, Debug)]
struct Entry {
    data: serde_json::Value,
    stale: bool,
    /// Generation at which the data was written.
    written_at: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    generation: u64,
}

/// Cache changes to apply after a successful mutation.
///
/// Resource modules return one of these from their `invalidates_after_*`
/// functions; the UI applies it to the shared cache.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Invalidation {
    pub invalidate: Vec<QueryKey>,
    pub remove: Vec<QueryKey>,
}

impl Invalidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(mut self, key: QueryKey) -> Self {
        self.invalidate.push(key);
        self
    }

    pub fn remove(mut self, key: QueryKey) -> Self {
        self.remove.push(key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.invalidate.is_empty() && self.remove.is_empty()
    }
}

/// Shared in-memory query cache. Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    inner: Arc<Mutex<Inner>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached data for `key`, fresh or stale.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.lock();
        let entry = inner.entries.get(key)?;
        match serde_json::from_value(entry.data.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("cache entry {key} has unexpected shape: {e}");
                None
            }
        }
    }

    /// Whether `key` holds data that has not been invalidated.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.lock().entries.get(key).is_some_and(|e| !e.stale)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Store `value` under `key` and mark it fresh.
    pub fn set<T: Serialize>(&self, key: QueryKey, value: &T) {
        let data = match serde_json::to_value(value) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("refusing to cache {key}: {e}");
                return;
            }
        };
        let mut inner = self.lock();
        inner.generation += 1;
        let written_at = inner.generation;
        inner.entries.insert(
            key,
            Entry {
                data,
                stale: false,
                written_at,
            },
        );
    }

    /// Mark every entry under `prefix` stale. Returns how many were hit.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut inner = self.lock();
        let mut hit = 0;
        for (key, entry) in inner.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                hit += 1;
            }
        }
        inner.generation += 1;
        tracing::debug!("invalidated {hit} entries under {prefix}");
        hit
    }

    /// Evict every entry under `prefix`. Returns how many were removed.
    pub fn remove(&self, prefix: &QueryKey) -> usize {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - inner.entries.len();
        inner.generation += 1;
        removed
    }

    /// Apply a post-mutation [`Invalidation`]. Removals run after
    /// invalidations.
    pub fn apply(&self, changes: &Invalidation) {
        for key in &changes.invalidate {
            self.invalidate(key);
        }
        for key in &changes.remove {
            self.remove(key);
        }
    }

    /// Drop everything.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.generation += 1;
    }

    /// Entries written before `generation` are treated as stale as well. Used
    /// to expire data by age without a clock in the cache.
    pub fn expire_older_than(&self, generation: u64) -> usize {
        let mut inner = self.lock();
        let mut hit = 0;
        for entry in inner.entries.values_mut() {
            if entry.written_at < generation && !entry.stale {
                entry.stale = true;
                hit += 1;
            }
        }
        if hit > 0 {
            inner.generation += 1;
        }
        hit
    }

    /// Monotonic change counter.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Filters;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: i64,
        title: String,
    }

    fn item(id: i64) -> Item {
        Item {
            id,
            title: format!("item {id}"),
        }
    }

    #[test]
    fn test_set_and_get() {
        let cache = QueryCache::new();
        let key = QueryKey::new("news").push_int(1);

        assert!(cache.get::<Item>(&key).is_none());
        assert!(!cache.is_fresh(&key));

        cache.set(key.clone(), &item(1));
        assert_eq!(cache.get::<Item>(&key), Some(item(1)));
        assert!(cache.is_fresh(&key));
    }

    #[test]
    fn test_invalidate_prefix_keeps_data_but_marks_stale() {
        let cache = QueryCache::new();
        let detail = QueryKey::new("event").push_int(1);
        let stats = detail.clone().push_str("statistics");
        let other = QueryKey::new("news").push_int(1);

        cache.set(detail.clone(), &item(1));
        cache.set(stats.clone(), &item(2));
        cache.set(other.clone(), &item(3));

        assert_eq!(cache.invalidate(&QueryKey::new("event")), 2);

        assert!(!cache.is_fresh(&detail));
        assert!(!cache.is_fresh(&stats));
        assert!(cache.is_fresh(&other));
        // Stale data is still served until refetched
        assert_eq!(cache.get::<Item>(&detail), Some(item(1)));

        // Refetch makes it fresh again
        cache.set(detail.clone(), &item(10));
        assert!(cache.is_fresh(&detail));
        assert_eq!(cache.get::<Item>(&detail), Some(item(10)));
    }

    #[test]
    fn test_invalidate_filtered_lists() {
        let cache = QueryCache::new();
        let list = QueryKey::new("event").push_str("list");
        let searched = list
            .clone()
            .push_filters(&Filters::new().with("search", "fest"));
        cache.set(list.clone(), &vec![item(1)]);
        cache.set(searched.clone(), &vec![item(2)]);

        assert_eq!(cache.invalidate(&list), 2);
        assert!(!cache.is_fresh(&searched));
    }

    #[test]
    fn test_remove_prefix() {
        let cache = QueryCache::new();
        cache.set(QueryKey::new("user"), &item(1));
        cache.set(QueryKey::new("user").push_str("abc"), &item(2));
        cache.set(QueryKey::new("users"), &item(3));

        assert_eq!(cache.remove(&QueryKey::new("user")), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&QueryKey::new("users")));
    }

    #[test]
    fn test_generation_moves_on_every_change() {
        let cache = QueryCache::new();
        let g0 = cache.generation();
        cache.set(QueryKey::new("a"), &1);
        let g1 = cache.generation();
        cache.invalidate(&QueryKey::new("missing"));
        let g2 = cache.generation();
        cache.remove(&QueryKey::new("a"));
        let g3 = cache.generation();
        assert!(g0 < g1 && g1 < g2 && g2 < g3);
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = QueryCache::new();
        let other = cache.clone();
        other.set(QueryKey::new("toddel"), &vec![item(1)]);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_expire_older_than() {
        let cache = QueryCache::new();
        cache.set(QueryKey::new("old"), &1);
        let cutoff = cache.generation() + 1;
        cache.set(QueryKey::new("new"), &2);

        assert_eq!(cache.expire_older_than(cutoff), 1);
        assert!(!cache.is_fresh(&QueryKey::new("old")));
        assert!(cache.is_fresh(&QueryKey::new("new")));
    }

    #[test]
    fn test_apply_invalidation() {
        let cache = QueryCache::new();
        cache.set(QueryKey::new("event").push_int(1), &item(1));
        cache.set(QueryKey::new("user"), &item(2));
        cache.set(QueryKey::new("news").push_int(1), &item(3));

        let changes = Invalidation::new()
            .invalidate(QueryKey::new("event"))
            .remove(QueryKey::new("user"));
        assert!(!changes.is_empty());
        cache.apply(&changes);

        assert!(!cache.is_fresh(&QueryKey::new("event").push_int(1)));
        assert!(!cache.contains(&QueryKey::new("user")));
        assert!(cache.is_fresh(&QueryKey::new("news").push_int(1)));
    }

    #[test]
    fn test_wrong_shape_reads_as_missing() {
        let cache = QueryCache::new();
        let key = QueryKey::new("badge").push_int(1);
        cache.set(key.clone(), &"not an item");
        assert!(cache.get::<Item>(&key).is_none());
    }
}
