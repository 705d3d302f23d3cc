//! Paginated data source.
//!
//! Turns repeated [`load_next()`](PaginatedDataSource::load_next) calls into
//! one growing list of items.  State is published as immutable
//! [`DataSourceState`] snapshots over a [`tokio::sync::watch`] channel, so
//! observers always see a complete before- or after-state.
//!
//! ## Lifecycle
//!
//! ```text
//! idle ──load_next──► loading ──ok──► loaded (more | exhausted)
//!                        │
//!                        └──err──► failed ──load_next──► loading (same query)
//! ```
//!
//! * At most one fetch is in flight.  `load_next()` while loading, or after
//!   the last page, does nothing.
//! * The loading check and the `is_loading = true` write happen under the
//!   watch channel's lock, so concurrent callers cannot both pass the guard.
//! * A failed fetch leaves the accumulated items and the pending cursor
//!   untouched; the next `load_next()` asks for the same page again.
//! * The transport call runs in its own task.  If it panics, the fetch is
//!   reported as failed like any other error and loading ends.
//! * In-flight fetches are not cancelled.  Dropping the data source while a
//!   fetch runs keeps the shared state alive until that fetch completes.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::query::{build_request, LaunchesQuery, SortOptions};
use crate::source::{decode_page, LaunchItem, ResponsePage, Transport};

/// Everything merged so far.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedListResult<Item> {
    /// Query that produced the most recently merged page.
    pub query: LaunchesQuery,
    /// Query for the following page; `None` once exhausted.
    pub next: Option<LaunchesQuery>,
    /// Items in page-arrival order.
    pub items: Vec<Item>,
}

impl<Item: Clone> PaginatedListResult<Item> {
    /// Append `page` to `previous`.
    ///
    /// No de-duplication and no re-sorting: the result is always
    /// `previous.items ++ page.items`.
    pub fn merged(
        previous: Option<&Self>,
        query: LaunchesQuery,
        page: ResponsePage<Item>,
    ) -> Self {
        let next = page.next_cursor().map(|n| query.with_page(n));

        let mut items = Vec::with_capacity(
            previous.map_or(0, |p| p.items.len()) + page.items.len(),
        );
        if let Some(previous) = previous {
            items.extend_from_slice(&previous.items);
        }
        items.extend(page.items);

        Self { query, next, items }
    }
}

/// One observable snapshot of a data source.
#[derive(Debug)]
pub struct DataSourceState<Item> {
    pub is_loading: bool,
    pub last_request_failed: bool,
    /// `None` until the first page has been merged.
    pub launches: Option<Arc<PaginatedListResult<Item>>>,
}

// Manual impls: `Item` itself does not need to be `Clone` or `Default`.
impl<Item> Clone for DataSourceState<Item> {
    fn clone(&self) -> Self {
        Self {
            is_loading: self.is_loading,
            last_request_failed: self.last_request_failed,
            launches: self.launches.clone(),
        }
    }
}

impl<Item> Default for DataSourceState<Item> {
    fn default() -> Self {
        Self {
            is_loading: false,
            last_request_failed: false,
            launches: None,
        }
    }
}

impl<Item> DataSourceState<Item> {
    /// Query the next fetch would issue, given the configured first query.
    pub fn pending_query(&self, initial: &LaunchesQuery) -> Option<LaunchesQuery> {
        match &self.launches {
            Some(result) => result.next,
            None => Some(*initial),
        }
    }

    pub fn items(&self) -> &[Item] {
        self.launches
            .as_deref()
            .map(|r| r.items.as_slice())
            .unwrap_or_default()
    }

    /// True once a page without a next cursor has been merged.
    pub fn is_exhausted(&self) -> bool {
        self.launches.as_ref().is_some_and(|r| r.next.is_none())
    }
}

/// Pages through one query series against a [`Transport`].
pub struct PaginatedDataSource<Item> {
    inner: Arc<Inner<Item>>,
}

/// The data source used by the application.
pub type LaunchesDataSource = PaginatedDataSource<LaunchItem>;

struct Inner<Item> {
    initial_query: LaunchesQuery,
    sort_options: SortOptions,
    transport: Arc<dyn Transport>,
    state: watch::Sender<DataSourceState<Item>>,
    _item: PhantomData<fn() -> Item>,
}

impl<Item> Clone for PaginatedDataSource<Item> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Item> PaginatedDataSource<Item>
where
    Item: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(
        initial_query: LaunchesQuery,
        sort_options: SortOptions,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (state, _) = watch::channel(DataSourceState::default());
        Self {
            inner: Arc::new(Inner {
                initial_query,
                sort_options,
                transport,
                state,
                _item: PhantomData,
            }),
        }
    }

    /// Current state by value.
    pub fn snapshot(&self) -> DataSourceState<Item> {
        self.inner.state.borrow().clone()
    }

    /// Receive every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<DataSourceState<Item>> {
        self.inner.state.subscribe()
    }

    /// What the next [`load_next()`](Self::load_next) would request.
    pub fn pending_query(&self) -> Option<LaunchesQuery> {
        self.inner.state.borrow().pending_query(&self.inner.initial_query)
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.state.borrow().is_exhausted()
    }

    /// Fetch the next page, unless one is already loading or there is none.
    ///
    /// Returns the handle of the spawned fetch, or `None` when the call was
    /// a no-op.  Must be called within a tokio runtime.
    pub fn load_next(&self) -> Option<JoinHandle<()>> {
        let query = self.inner.begin_load()?;
        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            let fetch = {
                let inner = Arc::clone(&inner);
                tokio::spawn(async move { inner.fetch(&query).await })
            };
            let outcome = match fetch.await {
                Ok(outcome) => outcome,
                Err(error) => Err(FetchError::from(error)),
            };
            inner.complete(query, outcome);
        }))
    }
}

impl<Item> Inner<Item>
where
    Item: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Check the guard and mark loading, atomically.
    fn begin_load(&self) -> Option<LaunchesQuery> {
        let mut claimed = None;
        self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            let Some(query) = state.pending_query(&self.initial_query) else {
                return false;
            };
            state.is_loading = true;
            state.last_request_failed = false;
            claimed = Some(query);
            true
        });

        match &claimed {
            Some(query) => debug!(page = ?query.page(), "loading launches"),
            None => debug!("load_next ignored: in flight or exhausted"),
        }
        claimed
    }

    async fn fetch(&self, query: &LaunchesQuery) -> Result<ResponsePage<Item>, FetchError> {
        let request = build_request(query, &self.sort_options);
        let bytes = self.transport.execute(&request).await?;
        Ok(decode_page(&bytes)?)
    }

    fn complete(&self, query: LaunchesQuery, outcome: Result<ResponsePage<Item>, FetchError>) {
        match outcome {
            Ok(page) => {
                let received = page.items.len();
                self.state.send_modify(|state| {
                    let merged =
                        PaginatedListResult::merged(state.launches.as_deref(), query, page);
                    info!(
                        page = ?query.page(),
                        received,
                        total = merged.items.len(),
                        next = ?merged.next.and_then(|q| q.page()),
                        "merged launch page"
                    );
                    state.launches = Some(Arc::new(merged));
                    state.is_loading = false;
                });
            }
            Err(error) => {
                warn!(
                    transport = self.transport.name(),
                    page = ?query.page(),
                    kind = error.kind(),
                    %error,
                    "launch request failed"
                );
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.last_request_failed = true;
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
