//! One browsing view: filter store, URL, facets and results kept in sync.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};
use turbo_catalog::CatalogService;
use turbo_filter::catalog::{FacetCatalog, FacetOption};
use turbo_filter::present::DisplayList;
use turbo_filter::{url, FacetKind, FilterState, FilterStore, StateChange};

use crate::config::BrowseConfig;
use crate::debounce::Debouncer;
use crate::fetcher::{CommitOutcome, ResultFetcher};
use crate::loader::{FacetCache, FacetLoader};
use crate::lock;
use crate::sink::{NoopUrlSink, UrlSink};
use crate::status::ResourceStatus;

/// Debounce key for URL reflection.
pub const URL_KEY: &str = "url";
/// Debounce key for search-as-you-type fetches.
pub const SEARCH_KEY: &str = "search";

/// Everything a view needs to render, published after each change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub state: FilterState,
    pub url: String,
    pub status: ResourceStatus,
    pub display: Option<DisplayList>,
    pub error: Option<String>,
    pub models: Vec<FacetOption>,
}

/// Builder for `BrowseSession`.
pub struct BrowseSessionBuilder {
    service: Arc<dyn CatalogService>,
    cache: Option<Arc<FacetCache>>,
    sink: Arc<dyn UrlSink>,
    config: BrowseConfig,
}

impl BrowseSessionBuilder {
    /// Share a facet cache with other sessions.
    pub fn with_cache(mut self, cache: Arc<FacetCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_url_sink(mut self, sink: Arc<dyn UrlSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_config(mut self, config: BrowseConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode `url` and load facets, models and the first result page.
    pub async fn open(self, url: &str) -> BrowseSession {
        let state = url::decode(url);
        let page_size = self.config.catalog.page_size();
        let cache = self.cache.unwrap_or_default();
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());

        let inner = Arc::new(SessionInner {
            store: Mutex::new(FilterStore::from_state(state)),
            facets: Mutex::new(FacetCatalog::empty()),
            loader: FacetLoader::new(Arc::clone(&self.service), cache),
            fetcher: ResultFetcher::new(self.service, page_size),
            debouncer: Debouncer::new(),
            sink: self.sink,
            snapshot_tx,
            closed: AtomicBool::new(false),
            config: self.config,
        });

        let brand = inner.state().brand;
        info!(url, brand = ?brand, page_size, "opening browse session");
        let (facets, _, _) = tokio::join!(
            inner.loader.load_global_facets(),
            inner.loader.load_models_for_brand(brand.as_ref()),
            inner.fetch_latest(),
        );
        *lock(&inner.facets) = facets;
        inner.publish();

        BrowseSession { inner }
    }
}

struct SessionInner {
    config: BrowseConfig,
    store: Mutex<FilterStore>,
    facets: Mutex<FacetCatalog>,
    loader: FacetLoader,
    fetcher: ResultFetcher,
    debouncer: Debouncer,
    sink: Arc<dyn UrlSink>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    closed: AtomicBool,
}

impl SessionInner {
    fn state(&self) -> FilterState {
        lock(&self.store).state().clone()
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn mutate(&self, f: impl FnOnce(&mut FilterStore) -> Option<StateChange>) -> Option<StateChange> {
        if self.is_closed() {
            debug!("ignoring mutation on closed session");
            return None;
        }
        f(&mut *lock(&self.store))
    }

    async fn react(self: &Arc<Self>, change: StateChange) {
        debug!(cause = ?change.cause, revision = change.revision, "filter state changed");
        if change.is_search_edit() {
            self.on_search_edit();
            return;
        }

        self.schedule_url_write();
        // A discrete change supersedes any half-typed search.
        self.debouncer.cancel(SEARCH_KEY);
        if change.brand_changed {
            let brand = change.state.brand.as_ref();
            tokio::join!(self.loader.load_models_for_brand(brand), self.fetch_latest());
        } else {
            self.fetch_latest().await;
        }
        self.publish();
    }

    fn on_search_edit(self: &Arc<Self>) {
        self.fetcher.track(&self.state());
        self.schedule_url_write();
        self.schedule_search_fetch();
        self.publish();
    }

    async fn fetch_latest(&self) -> CommitOutcome {
        let ticket = self.fetcher.begin(&self.state());
        self.publish();
        self.fetcher.run(&ticket).await
    }

    fn schedule_url_write(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        self.debouncer
            .schedule(URL_KEY, self.config.debounce.url_delay(), async move {
                let Some(inner) = weak.upgrade() else { return };
                let url = url::encode(&inner.state());
                debug!(url = %url, "reflecting state into url");
                inner.sink.replace(&url);
            });
    }

    fn schedule_search_fetch(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        self.debouncer
            .schedule(SEARCH_KEY, self.config.debounce.search_delay(), async move {
                let Some(inner) = weak.upgrade() else { return };
                if inner.is_closed() {
                    return;
                }
                inner.fetch_latest().await;
                inner.publish();
            });
    }

    fn snapshot(&self) -> SessionSnapshot {
        let (state, revision) = {
            let store = lock(&self.store);
            (store.state().clone(), store.revision())
        };
        let fetch = self.fetcher.snapshot();
        SessionSnapshot {
            revision,
            url: url::encode(&state),
            state,
            display: fetch.display(),
            status: fetch.status,
            error: fetch.error,
            models: self.loader.models(),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

/// A browsing view over a remote catalog.
///
/// Mutations update the filter state synchronously and then drive the
/// side effects: a debounced URL write, a model reload on brand change and
/// a result fetch (debounced for free-text search, immediate otherwise).
/// Fetch failures are reported through `status` and `error`, never returned.
pub struct BrowseSession {
    inner: Arc<SessionInner>,
}

impl BrowseSession {
    /// Start building a session on `service`.
    pub fn builder(service: Arc<dyn CatalogService>) -> BrowseSessionBuilder {
        BrowseSessionBuilder {
            service,
            cache: None,
            sink: Arc::new(NoopUrlSink),
            config: BrowseConfig::default(),
        }
    }

    /// Select a facet value; an empty value clears it.
    pub async fn select_facet(&self, kind: FacetKind, value: impl AsRef<str>) -> Option<StateChange> {
        let change = self.inner.mutate(|store| store.set_facet(kind, value))?;
        self.inner.react(change.clone()).await;
        Some(change)
    }

    /// Update the search text. The fetch runs once typing pauses.
    pub fn type_search(&self, text: impl Into<String>) -> Option<StateChange> {
        let text = text.into();
        let change = self.inner.mutate(|store| store.set_search(text))?;
        debug!(revision = change.revision, "search edited");
        self.inner.on_search_edit();
        Some(change)
    }

    pub async fn go_to_page(&self, page: u32) -> Option<StateChange> {
        let change = self.inner.mutate(|store| store.set_page(page))?;
        self.inner.react(change.clone()).await;
        Some(change)
    }

    /// Clear every facet and the search text.
    pub async fn reset(&self) -> Option<StateChange> {
        let change = self.inner.mutate(FilterStore::reset)?;
        self.inner.react(change.clone()).await;
        Some(change)
    }

    /// Refetch global facets.
    pub async fn revalidate_facets(&self) -> FacetCatalog {
        let facets = self.inner.loader.revalidate().await;
        *lock(&self.inner.facets) = facets.clone();
        facets
    }

    /// Stop timers and ignore responses still in flight.
    ///
    /// Later mutations are ignored.
    pub fn close(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.debouncer.cancel_all();
        self.inner.fetcher.invalidate();
        self.inner.publish();
        info!("browse session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn state(&self) -> FilterState {
        self.inner.state()
    }

    /// Canonical URL of the current state. May be ahead of the last write.
    pub fn current_url(&self) -> String {
        url::encode(&self.inner.state())
    }

    pub fn facets(&self) -> FacetCatalog {
        lock(&self.inner.facets).clone()
    }

    /// Model options for the selected brand.
    pub fn models(&self) -> Vec<FacetOption> {
        self.inner.loader.models()
    }

    pub fn status(&self) -> ResourceStatus {
        self.inner.fetcher.status()
    }

    /// Latest successful page, projected for display.
    pub fn display(&self) -> Option<DisplayList> {
        self.inner.fetcher.snapshot().display()
    }

    /// Error of the latest fetch, if it failed.
    pub fn error(&self) -> Option<String> {
        self.inner.fetcher.snapshot().error
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.snapshot()
    }

    /// Receive a snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.inner.config
    }
}

impl Drop for BrowseSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for BrowseSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowseSession")
            .field("state", &self.state())
            .field("status", &self.status())
            .field("closed", &self.is_closed())
            .finish()
    }
}
