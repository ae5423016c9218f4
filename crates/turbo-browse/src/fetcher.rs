//! Product fetches with last-intent-wins commits.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, warn};
use turbo_catalog::{CatalogService, FetchError, ProductQuery, ProductsResponse};
use turbo_filter::catalog::ResultPage;
use turbo_filter::present::{project, DisplayList};
use turbo_filter::{Fingerprint, FilterState};

use crate::lock;
use crate::status::ResourceStatus;

/// Identity of one issued product request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Issue order, strictly increasing per fetcher.
    pub seq: u64,
    /// Intent the request was issued for.
    pub fingerprint: Fingerprint,
    /// Request parameters.
    pub query: ProductQuery,
}

/// What `commit` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A result page was stored.
    Committed,
    /// An error was stored; the previous page is kept.
    Failed,
    /// The response no longer matches the latest intent and was dropped.
    Discarded,
}

/// Observable state of a `ResultFetcher`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchSnapshot {
    pub status: ResourceStatus,
    /// Last committed page; survives later failures.
    pub page: Option<ResultPage>,
    pub error: Option<String>,
}

impl FetchSnapshot {
    /// Check if a request for the current intent is in flight.
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Display list of the committed page.
    pub fn display(&self) -> Option<DisplayList> {
        self.page.as_ref().map(project)
    }
}

#[derive(Debug, Default)]
struct FetchState {
    next_seq: u64,
    latest: Option<Fingerprint>,
    committed_seq: u64,
    snapshot: FetchSnapshot,
}

/// Fetches result pages and commits only responses for the latest intent.
///
/// A response is committed when its fingerprint equals the most recently
/// issued one and it was issued after the last committed response.
/// Everything else is discarded, so a slow response for an abandoned
/// filter never overwrites a newer one.
pub struct ResultFetcher {
    service: Arc<dyn CatalogService>,
    page_size: u32,
    state: Mutex<FetchState>,
}

impl ResultFetcher {
    pub fn new(service: Arc<dyn CatalogService>, page_size: u32) -> Self {
        Self {
            service,
            page_size: page_size.max(1),
            state: Mutex::new(FetchState::default()),
        }
    }

    /// Page size sent with every request.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Record a new intent and mark the resource pending.
    pub fn begin(&self, filter: &FilterState) -> Ticket {
        let fingerprint = Fingerprint::of(filter, self.page_size);
        let query = ProductQuery::from_state(filter, self.page_size);

        let mut state = lock(&self.state);
        state.next_seq += 1;
        state.latest = Some(fingerprint.clone());
        state.snapshot.status = ResourceStatus::Pending;

        Ticket {
            seq: state.next_seq,
            fingerprint,
            query,
        }
    }

    /// Record `filter` as the latest intent without issuing a request.
    ///
    /// Used while a fetch for it is still being debounced, so responses for
    /// the state the user already left are discarded.
    pub fn track(&self, filter: &FilterState) {
        let fingerprint = Fingerprint::of(filter, self.page_size);
        lock(&self.state).latest = Some(fingerprint);
    }

    /// Check whether a ticket still represents the latest intent.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        let state = lock(&self.state);
        state.latest.as_ref() == Some(&ticket.fingerprint) && ticket.seq > state.committed_seq
    }

    /// Apply a response to the ticket it was issued for.
    pub fn commit(
        &self,
        ticket: &Ticket,
        result: Result<ProductsResponse, FetchError>,
    ) -> CommitOutcome {
        let mut state = lock(&self.state);
        if state.latest.as_ref() != Some(&ticket.fingerprint) || ticket.seq <= state.committed_seq {
            debug!(seq = ticket.seq, fingerprint = %ticket.fingerprint, "discarding stale product response");
            return CommitOutcome::Discarded;
        }

        state.committed_seq = ticket.seq;
        match result {
            Ok(response) => {
                let page = response.into_page(&ticket.query, ticket.fingerprint.clone());
                debug!(seq = ticket.seq, items = page.items.len(), total = page.total_count, "committed product page");
                state.snapshot = FetchSnapshot {
                    status: ResourceStatus::Settled,
                    page: Some(page),
                    error: None,
                };
                CommitOutcome::Committed
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "product fetch failed");
                let message = e.to_string();
                state.snapshot.status = ResourceStatus::Failed(message.clone());
                state.snapshot.error = Some(message);
                CommitOutcome::Failed
            }
        }
    }

    /// Issue a request for `filter`, await it and commit the response.
    pub async fn fetch(&self, filter: &FilterState) -> CommitOutcome {
        let ticket = self.begin(filter);
        self.run(&ticket).await
    }

    /// Send the request for an issued ticket and commit the response.
    pub async fn run(&self, ticket: &Ticket) -> CommitOutcome {
        let result = self.service.products(&ticket.query).await;
        self.commit(ticket, result)
    }

    /// Forget the latest intent so every in-flight response is discarded.
    pub fn invalidate(&self) {
        let mut state = lock(&self.state);
        state.latest = None;
        state.snapshot.status = ResourceStatus::Idle;
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        lock(&self.state).snapshot.clone()
    }

    pub fn status(&self) -> ResourceStatus {
        lock(&self.state).snapshot.status.clone()
    }
}

impl std::fmt::Debug for ResultFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultFetcher")
            .field("page_size", &self.page_size)
            .field("status", &self.status())
            .finish()
    }
}
