//! # Query client
//!
//! Components read server data through [`use_query`] and [`use_paginated`].
//! Both serve fresh entries straight from the shared [`QueryCache`] and fetch
//! missing or stale ones, writing the result back for the next reader.
//!
//! Every live query registers a watcher for the key it currently reads.
//! [`QueryClient::set`], [`QueryClient::apply`] and friends bump only the
//! watchers whose key is affected, so a write to one key never restarts a
//! query reading another.
//!
//! Fetches are shared per key: while a request for a key is in flight, other
//! readers of that key await the same request instead of starting their own.
//!
//! Entries also go stale by age: [`QueryProvider`] expires, once per
//! `stale_after_secs`, everything written before its previous tick.

use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use api::ApiError;
use dioxus::prelude::*;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{CacheConfig, Invalidation, Pages, PaginationResponse, QueryCache, QueryKey};

use crate::time::sleep;

/// An in-flight request. It resolves once its result is in the cache.
type PendingFetch = Shared<LocalBoxFuture<'static, Result<(), ApiError>>>;

struct Watcher {
    id: u64,
    key: Option<QueryKey>,
    version: Signal<u64>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    watchers: Vec<Watcher>,
    pending: HashMap<QueryKey, (u64, PendingFetch)>,
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Copyable handle to the shared query cache.
#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: CopyValue<QueryCache>,
    registry: CopyValue<Registry>,
}

impl QueryClient {
    pub fn cache(&self) -> QueryCache {
        self.cache.cloned()
    }

    /// Cached data for `key` if it has not gone stale.
    pub fn fresh<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let cache = self.cache();
        if cache.is_fresh(key) {
            cache.get(key)
        } else {
            None
        }
    }

    /// Cached data for `key`, fresh or stale.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.cache().get(key)
    }

    /// Store `value` and wake the queries reading `key`.
    pub fn set<T: Serialize>(&self, key: QueryKey, value: &T) {
        self.cache().set(key.clone(), value);
        self.notify(|watched| watched == &key);
    }

    pub fn apply(&self, changes: &Invalidation) {
        if changes.is_empty() {
            return;
        }
        tracing::debug!(
            invalidate = changes.invalidate.len(),
            remove = changes.remove.len(),
            "applying cache changes"
        );
        self.cache().apply(changes);
        let prefixes: Vec<&QueryKey> = changes.invalidate.iter().chain(&changes.remove).collect();
        self.drop_pending(|key| prefixes.iter().any(|prefix| key.starts_with(prefix)));
        self.notify(|key| prefixes.iter().any(|prefix| key.starts_with(prefix)));
    }

    pub fn invalidate(&self, prefix: &QueryKey) {
        self.cache().invalidate(prefix);
        self.drop_pending(|key| key.starts_with(prefix));
        self.notify(|key| key.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.cache().clear();
        self.drop_pending(|_| true);
        self.notify(|_| true);
    }

    /// Bump the version of every watcher whose key matches.
    fn notify(&self, affected: impl Fn(&QueryKey) -> bool) {
        let versions: Vec<Signal<u64>> = match self.registry.try_read() {
            Ok(registry) => registry
                .watchers
                .iter()
                .filter(|w| w.key.as_ref().is_some_and(&affected))
                .map(|w| w.version)
                .collect(),
            Err(_) => return,
        };
        for mut version in versions {
            *version.write() += 1;
        }
    }

    /// Forget in-flight requests whose answer is already outdated. Readers
    /// restarted afterwards start a new request.
    fn drop_pending(&self, affected: impl Fn(&QueryKey) -> bool) {
        let mut handle = self.registry;
        if let Ok(mut registry) = handle.try_write() {
            registry.pending.retain(|key, _| !affected(key));
        };
    }

    fn register(&self, version: Signal<u64>) -> u64 {
        let mut handle = self.registry;
        let mut registry = handle.write();
        let id = registry.next_id();
        registry.watchers.push(Watcher {
            id,
            key: None,
            version,
        });
        id
    }

    fn watch(&self, id: u64, key: &QueryKey) {
        let mut handle = self.registry;
        let mut registry = handle.write();
        if let Some(watcher) = registry.watchers.iter_mut().find(|w| w.id == id) {
            if watcher.key.as_ref() != Some(key) {
                watcher.key = Some(key.clone());
            }
        }
    }

    fn unregister(&self, id: u64) {
        let mut handle = self.registry;
        if let Ok(mut registry) = handle.try_write() {
            registry.watchers.retain(|w| w.id != id);
        };
    }

    /// The in-flight request for `key`, started with `start` if there is none.
    fn join(
        &self,
        key: &QueryKey,
        start: impl FnOnce() -> LocalBoxFuture<'static, Result<(), ApiError>>,
    ) -> PendingFetch {
        let mut handle = self.registry;
        let mut registry = handle.write();
        if let Some((_, pending)) = registry.pending.get(key) {
            return pending.clone();
        }
        let id = registry.next_id();
        let client = *self;
        let done = key.clone();
        let work = start();
        let pending = async move {
            let result = work.await;
            client.finish(&done, id);
            result
        }
        .boxed_local()
        .shared();
        registry.pending.insert(key.clone(), (id, pending.clone()));
        pending
    }

    fn finish(&self, key: &QueryKey, id: u64) {
        let mut handle = self.registry;
        if let Ok(mut registry) = handle.try_write() {
            if registry.pending.get(key).is_some_and(|(pending, _)| *pending == id) {
                registry.pending.remove(key);
            }
        };
    }

    /// Expire entries written before `generation` and wake their readers.
    fn expire_older_than(&self, generation: u64) -> usize {
        let cache = self.cache();
        let expired = cache.expire_older_than(generation);
        if expired > 0 {
            self.notify(|key| !cache.is_fresh(key));
        }
        expired
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}

/// Provides the shared cache and runs the staleness timer.
#[component]
pub fn QueryProvider(#[props(default)] config: CacheConfig, children: Element) -> Element {
    let client = use_context_provider(|| QueryClient {
        cache: CopyValue::new(QueryCache::new()),
        registry: CopyValue::new(Registry::default()),
    });
    let stale_after = config.stale_after_secs;

    use_effect(move || {
        if stale_after == 0 {
            return;
        }
        spawn(async move {
            let mut last_tick = client.cache().generation();
            loop {
                sleep(Duration::from_secs(u64::from(stale_after))).await;
                let expired = client.expire_older_than(last_tick);
                last_tick = client.cache().generation();
                if expired > 0 {
                    tracing::debug!("{} cache entries went stale", expired);
                }
            }
        });
    });

    rsx! {
        {children}
    }
}

/// Watcher for the calling component. Returns its id and the version signal
/// that changes whenever its key is written or invalidated.
fn use_watcher(client: QueryClient) -> (u64, Signal<u64>) {
    let version = use_signal(|| 0u64);
    let id = use_hook(|| client.register(version));
    use_drop(move || client.unregister(id));
    (id, version)
}

/// Cached fetch of a single resource.
///
/// `key` and `fetch` run inside the resource, so signals they read (route
/// parameters, the session token) restart it.
pub fn use_query<T, K, F, Fut>(key: K, fetch: F) -> Resource<Result<T, ApiError>>
where
    T: Serialize + DeserializeOwned + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let (watcher, version) = use_watcher(client);

    use_resource(move || {
        let key = key();
        client.watch(watcher, &key);
        let _ = version();
        let request = fetch();
        async move {
            if let Some(data) = client.fresh::<T>(&key) {
                return Ok(data);
            }
            let cache = client.cache();
            let target = key.clone();
            let pending = client.join(&key, move || {
                async move {
                    let data = request.await?;
                    cache.set(target, &data);
                    Ok(())
                }
                .boxed_local()
            });
            pending.await?;
            client
                .get::<T>(&key)
                .ok_or_else(|| ApiError::Decode(format!("no cached data for {key}")))
        }
    })
}

/// A paginated list that grows a page at a time.
pub struct PaginatedQuery<T: 'static> {
    key: Memo<QueryKey>,
    wanted: Signal<(QueryKey, u32)>,
    fetching: Signal<bool>,
    resource: Resource<Result<Pages<T>, ApiError>>,
}

impl<T> Clone for PaginatedQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PaginatedQuery<T> {}

/// Number of pages to hold for `key`. A changed key (new filters) starts
/// over from the first page.
fn pages_wanted(wanted: &(QueryKey, u32), key: &QueryKey) -> u32 {
    if &wanted.0 == key {
        wanted.1.max(1)
    } else {
        1
    }
}

impl<T: Clone + 'static> PaginatedQuery<T> {
    /// Items of every loaded page, in order.
    pub fn items(&self) -> Vec<T> {
        match &*self.resource.read() {
            Some(Ok(pages)) => pages.items(),
            _ => Vec::new(),
        }
    }

    /// Total item count reported by the server.
    pub fn total(&self) -> u32 {
        match &*self.resource.read() {
            Some(Ok(pages)) => pages.total(),
            _ => 0,
        }
    }

    pub fn error(&self) -> Option<ApiError> {
        match &*self.resource.read() {
            Some(Err(e)) => Some(e.clone()),
            _ => None,
        }
    }

    /// Nothing loaded yet.
    pub fn is_loading(&self) -> bool {
        self.resource.read().is_none()
    }

    /// A page request is in flight.
    pub fn is_fetching(&self) -> bool {
        (self.fetching)()
    }

    /// Loaded, and the list is empty.
    pub fn is_empty(&self) -> bool {
        matches!(&*self.resource.read(), Some(Ok(pages)) if pages.items().is_empty())
    }

    pub fn has_next_page(&self) -> bool {
        match &*self.resource.read() {
            Some(Ok(pages)) => pages.has_next_page(),
            _ => false,
        }
    }

    pub fn load_more(&self) {
        if !self.has_next_page() || self.is_fetching() {
            return;
        }
        let key: QueryKey = (*self.key.peek()).clone();
        let mut wanted = self.wanted;
        let count = pages_wanted(&wanted.peek(), &key);
        wanted.set((key, count + 1));
    }
}

/// Cached "load more" list.
///
/// `fetch_page` gets the 1-based page number. Pages are kept in the cache
/// under `key`, so a remounted list shows everything loaded before.
pub fn use_paginated<T, K, F, Fut>(key: K, fetch_page: F) -> PaginatedQuery<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn(u32) -> Fut + 'static,
    Fut: Future<Output = Result<PaginationResponse<T>, ApiError>> + 'static,
{
    let client = use_query_client();
    let (watcher, version) = use_watcher(client);
    let key = use_memo(key);
    let wanted = use_signal(|| ((*key.peek()).clone(), 1u32));
    let mut fetching = use_signal(|| false);
    let fetch_page = use_hook(|| Rc::new(fetch_page));

    let resource = use_resource(move || {
        let key = key();
        let count = pages_wanted(&wanted.read(), &key) as usize;
        client.watch(watcher, &key);
        let _ = version();
        let fetch_page = fetch_page.clone();
        async move {
            loop {
                let pages: Pages<T> = client.fresh(&key).unwrap_or_default();
                if pages.len() >= count {
                    return Ok(pages);
                }
                let Some(next) = pages.next_page() else {
                    return Ok(pages);
                };
                let loaded = pages.len();
                let cache = client.cache();
                let target = key.clone();
                let fetch_page = fetch_page.clone();
                let pending = client.join(&key, move || {
                    async move {
                        let mut pages = pages;
                        pages.push((*fetch_page)(next).await?);
                        cache.set(target, &pages);
                        Ok(())
                    }
                    .boxed_local()
                });
                fetching.set(true);
                let result = pending.await;
                fetching.set(false);
                result?;

                let grown = client.fresh::<Pages<T>>(&key).map_or(0, |p| p.len());
                if grown <= loaded {
                    return Err(ApiError::Decode(format!("page {next} of {key} was not stored")));
                }
            }
        }
    });

    PaginatedQuery {
        key,
        wanted,
        fetching,
        resource,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use dioxus::dioxus_core::{NoOpMutations, VirtualDom};

    #[test]
    fn test_pages_wanted_follows_key() {
        let events = QueryKey::new("events");
        let filtered = QueryKey::new("events").push_str("open");

        assert_eq!(pages_wanted(&(events.clone(), 3), &events), 3);
        assert_eq!(pages_wanted(&(events.clone(), 3), &filtered), 1);
        assert_eq!(pages_wanted(&(events.clone(), 0), &events), 1);
    }

    #[derive(Default)]
    struct Log {
        starts: HashMap<&'static str, usize>,
        seen: HashMap<&'static str, String>,
        requests: Vec<(&'static str, u32)>,
        items: Vec<String>,
    }

    /// What the mounted components fetched and rendered.
    #[derive(Clone, Default)]
    struct FetchLog(Rc<RefCell<Log>>);

    impl FetchLog {
        fn started(&self, name: &'static str) -> usize {
            let mut log = self.0.borrow_mut();
            let count = log.starts.entry(name).or_default();
            *count += 1;
            *count
        }

        fn starts(&self, name: &str) -> usize {
            self.0.borrow().starts.get(name).copied().unwrap_or_default()
        }

        fn saw(&self, name: &'static str, value: &str) {
            self.0.borrow_mut().seen.insert(name, value.to_string());
        }

        fn seen(&self, name: &str) -> Option<String> {
            self.0.borrow().seen.get(name).cloned()
        }
    }

    fn no_expiry() -> CacheConfig {
        CacheConfig { stale_after_secs: 0 }
    }

    /// Run the dom until nothing has happened for a while.
    async fn settle(dom: &mut VirtualDom) {
        dom.rebuild_in_place();
        loop {
            tokio::select! {
                _ = dom.wait_for_work() => {}
                _ = tokio::time::sleep(Duration::from_millis(300)) => break,
            };
            dom.render_immediate(&mut NoOpMutations);
        }
    }

    #[component]
    fn Reader(name: &'static str, delay_ms: u64) -> Element {
        let log = use_context::<FetchLog>();
        let fetch_log = log.clone();
        let value = use_query(
            move || QueryKey::new(name),
            move || {
                let log = fetch_log.clone();
                async move {
                    let attempt = log.started(name);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Ok::<_, ApiError>(format!("{name}:{attempt}"))
                }
            },
        );
        if let Some(Ok(text)) = &*value.read() {
            log.saw(name, text);
        }
        rsx! {
            p { "{name}" }
        }
    }

    #[component]
    fn Seed(name: &'static str, value: String) -> Element {
        let client = use_query_client();
        use_hook(|| client.set(QueryKey::new(name), &value));
        rsx! {}
    }

    #[component]
    fn SetAfter(name: &'static str, after_ms: u64) -> Element {
        let client = use_query_client();
        use_future(move || async move {
            tokio::time::sleep(Duration::from_millis(after_ms)).await;
            client.set(QueryKey::new(name), &after_ms);
        });
        rsx! {}
    }

    #[component]
    fn InvalidateAfter(prefix: &'static str, after_ms: u64) -> Element {
        let client = use_query_client();
        use_future(move || async move {
            tokio::time::sleep(Duration::from_millis(after_ms)).await;
            client.apply(&Invalidation::new().invalidate(QueryKey::new(prefix)));
        });
        rsx! {}
    }

    fn mount(root: fn(FetchLog) -> Element) -> (VirtualDom, FetchLog) {
        let log = FetchLog::default();
        (VirtualDom::new_with_props(root, log.clone()), log)
    }

    #[tokio::test]
    async fn test_writes_only_wake_their_own_key() {
        fn app(log: FetchLog) -> Element {
            use_context_provider(|| log.clone());
            rsx! {
                QueryProvider { config: no_expiry(),
                    Reader { name: "a", delay_ms: 10 }
                    Reader { name: "b", delay_ms: 80 }
                    SetAfter { name: "unrelated", after_ms: 30 }
                }
            }
        }
        let (mut dom, log) = mount(app);
        settle(&mut dom).await;

        assert_eq!(log.starts("a"), 1);
        assert_eq!(log.starts("b"), 1);
        assert_eq!(log.seen("b").as_deref(), Some("b:1"));
    }

    #[tokio::test]
    async fn test_readers_of_one_key_share_a_request() {
        fn app(log: FetchLog) -> Element {
            use_context_provider(|| log.clone());
            rsx! {
                QueryProvider { config: no_expiry(),
                    Reader { name: "c", delay_ms: 40 }
                    Reader { name: "c", delay_ms: 40 }
                }
            }
        }
        let (mut dom, log) = mount(app);
        settle(&mut dom).await;

        assert_eq!(log.starts("c"), 1);
        assert_eq!(log.seen("c").as_deref(), Some("c:1"));
    }

    #[tokio::test]
    async fn test_fresh_entry_is_served_without_request() {
        fn app(log: FetchLog) -> Element {
            use_context_provider(|| log.clone());
            rsx! {
                QueryProvider { config: no_expiry(),
                    Seed { name: "a", value: "cached" }
                    Reader { name: "a", delay_ms: 10 }
                }
            }
        }
        let (mut dom, log) = mount(app);
        settle(&mut dom).await;

        assert_eq!(log.starts("a"), 0);
        assert_eq!(log.seen("a").as_deref(), Some("cached"));
    }

    #[tokio::test]
    async fn test_apply_refetches_invalidated_queries() {
        fn app(log: FetchLog) -> Element {
            use_context_provider(|| log.clone());
            rsx! {
                QueryProvider { config: no_expiry(),
                    Reader { name: "a", delay_ms: 10 }
                    Reader { name: "b", delay_ms: 10 }
                    InvalidateAfter { prefix: "a", after_ms: 60 }
                }
            }
        }
        let (mut dom, log) = mount(app);
        settle(&mut dom).await;

        assert_eq!(log.starts("a"), 2);
        assert_eq!(log.seen("a").as_deref(), Some("a:2"));
        assert_eq!(log.starts("b"), 1);
    }

    #[component]
    fn Lister() -> Element {
        let log = use_context::<FetchLog>();
        let mut filter = use_signal(|| "x");
        let fetch_log = log.clone();
        let list = use_paginated(
            move || QueryKey::new("list").push_str(filter()),
            move |page| {
                let log = fetch_log.clone();
                let filter = *filter.peek();
                async move {
                    log.0.borrow_mut().requests.push((filter, page));
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Ok::<_, ApiError>(PaginationResponse {
                        count: 6,
                        next: (page < 3).then_some(page + 1),
                        previous: None,
                        results: vec![format!("{filter}{page}a"), format!("{filter}{page}b")],
                    })
                }
            },
        );
        log.0.borrow_mut().items = list.items();

        use_future(move || async move {
            tokio::time::sleep(Duration::from_millis(60)).await;
            list.load_more();
            tokio::time::sleep(Duration::from_millis(60)).await;
            filter.set("y");
        });
        rsx! {}
    }

    #[tokio::test]
    async fn test_paginated_grows_and_restarts_on_new_filter() {
        fn app(log: FetchLog) -> Element {
            use_context_provider(|| log.clone());
            rsx! {
                QueryProvider { config: no_expiry(), Lister {} }
            }
        }
        let (mut dom, log) = mount(app);
        settle(&mut dom).await;

        let log = log.0.borrow();
        assert_eq!(log.requests, vec![("x", 1), ("x", 2), ("y", 1)]);
        assert_eq!(log.items, vec!["y1a".to_string(), "y1b".to_string()]);
    }
}
