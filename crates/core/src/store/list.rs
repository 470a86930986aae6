use std::fmt::Display;
use std::future::Future;

use tokio::sync::watch;

use super::InFlight;
use crate::pagination::{effective_page_size, page_count, PageRequest};

/// One page of results plus the size of the whole result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total: usize,
}

/// Fetches a single page
///
/// Any `Fn(PageRequest) -> impl Future<Output = Result<Page<T>, E>>` closure
/// implements this trait.
pub trait FetchPage<T> {
    type Error: Display;

    fn fetch(&self, request: PageRequest) -> impl Future<Output = Result<Page<T>, Self::Error>>;
}

impl<T, E, F, Fut> FetchPage<T> for F
where
    F: Fn(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    E: Display,
{
    type Error = E;

    fn fetch(&self, request: PageRequest) -> impl Future<Output = Result<Page<T>, E>> {
        self(request)
    }
}

/// Snapshot of a paginated list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub is_loading_more: bool,
    pub results: Vec<T>,
    pub total: usize,
    pub pagination: PageRequest,
}

impl<T> ListState<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            is_loading: false,
            is_refreshing: false,
            is_loading_more: false,
            results: Vec::new(),
            total: 0,
            pagination: PageRequest::first(page_size),
        }
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total, self.pagination.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.results.len() < self.total
    }
}

#[derive(Debug, Clone, Copy)]
enum Merge {
    Replace,
    Append,
}

/// Paginated list with load / refresh / load-more semantics
///
/// - `load` and `refresh` fetch page 1 and replace the results.
/// - `load_more` fetches the next page and appends it. It does nothing while
///   another `load_more` is in flight or when every result is loaded.
///
/// Overlapping `load`/`refresh` calls are not coordinated: whichever fetch
/// resolves last wins.
pub struct ListStore<T, F> {
    state: watch::Sender<ListState<T>>,
    fetcher: F,
}

impl<T, F> ListStore<T, F>
where
    T: Clone,
    F: FetchPage<T>,
{
    pub fn new(fetcher: F, page_size: usize) -> Self {
        Self {
            state: watch::Sender::new(ListState::new(page_size)),
            fetcher,
        }
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    /// Borrow the current state
    ///
    /// Do not hold the returned guard across an `.await`.
    pub fn state(&self) -> watch::Ref<'_, ListState<T>> {
        self.state.borrow()
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    /// Fetch the first page, replacing whatever was loaded
    pub async fn load(&self) -> Result<(), F::Error> {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.pagination.page = 1;
        });
        let _in_flight = InFlight::new(&self.state, |state: &mut ListState<T>| {
            state.is_loading = false
        });

        let request = self.state.borrow().pagination;
        log::debug!("load: requesting page 1 (page size {})", request.page_size);

        let page = self
            .fetcher
            .fetch(request)
            .await
            .inspect_err(|err| log::warn!("load failed: {err}"))?;

        self.apply(page, Merge::Replace);
        Ok(())
    }

    /// Re-fetch the first page (pull-to-refresh)
    pub async fn refresh(&self) -> Result<(), F::Error> {
        self.state.send_modify(|state| {
            state.pagination.page = 1;
            state.is_refreshing = true;
        });
        let _in_flight = InFlight::new(&self.state, |state: &mut ListState<T>| {
            state.is_refreshing = false
        });

        let request = self.state.borrow().pagination;
        log::debug!("refresh: requesting page 1 (page size {})", request.page_size);

        let page = self
            .fetcher
            .fetch(request)
            .await
            .inspect_err(|err| log::warn!("refresh failed: {err}"))?;

        self.apply(page, Merge::Replace);
        Ok(())
    }

    /// Fetch and append the next page (infinite scroll)
    ///
    /// Returns `Ok(false)` without fetching when a `load_more` is already in
    /// flight or there is nothing left to load. A failed fetch keeps the page
    /// counter advanced and leaves the loaded results untouched.
    pub async fn load_more(&self) -> Result<bool, F::Error> {
        let mut next = None;
        self.state.send_if_modified(|state| {
            if state.is_loading_more || !state.has_more() {
                return false;
            }
            state.pagination.page += 1;
            state.is_loading_more = true;
            next = Some(state.pagination);
            true
        });

        let Some(request) = next else {
            log::debug!("load_more: skipped, already loading or nothing left");
            return Ok(false);
        };
        let _in_flight = InFlight::new(&self.state, |state: &mut ListState<T>| {
            state.is_loading_more = false
        });

        log::debug!(
            "load_more: requesting page {} (page size {})",
            request.page,
            request.page_size
        );

        match self.fetcher.fetch(request).await {
            Ok(page) => {
                self.apply(page, Merge::Append);
                Ok(true)
            }
            Err(err) => {
                log::warn!("load_more: page {} failed: {err}", request.page);
                Err(err)
            }
        }
    }

    /// Back to an empty first page
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            state.pagination.page = 1;
            state.results.clear();
            state.total = 0;
        });
    }

    /// Change the page size used by subsequent fetches
    pub fn set_page_size(&self, page_size: usize) {
        self.state.send_modify(|state| {
            state.pagination.page_size = effective_page_size(page_size);
        });
    }

    fn apply(&self, page: Page<T>, merge: Merge) {
        let received = page.results.len();

        self.state.send_modify(|state| {
            match merge {
                Merge::Replace => state.results = page.results,
                Merge::Append => state.results.extend(page.results),
            }
            state.total = page.total;

            if state.results.len() > state.total {
                log::warn!(
                    "holding {} results but the server reports a total of {}",
                    state.results.len(),
                    state.total
                );
            }
        });

        log::debug!("{merge:?}: received {received} results");
    }
}
