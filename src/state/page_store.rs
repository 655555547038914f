//! Single-page cache with stale-response suppression (pure).
//!
//! The store never fetches anything itself. A caller announces a request with
//! [`PageStore::begin_load`], runs the fetch however it likes, and hands the
//! result back with [`PageStore::resolve`]. Only the result for the most
//! recently issued token is applied; anything older is dropped.

use crate::model::{FetchError, FetchedPage, Page, PageIndex};
use tracing::{debug, info, warn};

/// Monotonically increasing id of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A page request issued by [`PageStore::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    /// Token to pass back to [`PageStore::resolve`].
    pub token: RequestToken,
    /// The page being requested.
    pub index: PageIndex,
}

/// What [`PageStore::resolve`] did with a result.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The page replaced the previously held page.
    Applied {
        /// Index of the page now held.
        index: PageIndex,
    },
    /// The latest request failed; the previous page stays in place.
    Failed {
        /// Index that was requested.
        index: PageIndex,
        /// Provider error.
        error: FetchError,
    },
    /// A newer request was issued after this one; the result was discarded.
    Stale {
        /// Token of the superseded request.
        token: RequestToken,
    },
}

/// Holds at most one page of records.
#[derive(Debug, Default)]
pub struct PageStore {
    page: Option<Page>,
    latest: Option<LoadRequest>,
    in_flight: bool,
    issued: u64,
    last_error: Option<FetchError>,
}

impl PageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request for `index`, superseding any request in flight.
    pub fn begin_load(&mut self, index: PageIndex) -> LoadRequest {
        self.issued += 1;
        let request = LoadRequest {
            token: RequestToken(self.issued),
            index,
        };
        if let Some(previous) = self.latest.filter(|_| self.in_flight) {
            debug!(
                superseded = previous.token.get(),
                page = %previous.index,
                "request superseded"
            );
        }
        self.latest = Some(request);
        self.in_flight = true;
        self.last_error = None;
        debug!(token = request.token.get(), page = %index, "page requested");
        request
    }

    /// Hand back the result of a request.
    ///
    /// Results whose token is not the latest issued are dropped without any
    /// state change, whether they succeeded or failed. An applied page takes
    /// its index from the request the store issued.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<FetchedPage, FetchError>,
    ) -> LoadOutcome {
        let latest = match self.latest {
            Some(latest) if latest.token == token && self.in_flight => latest,
            _ => {
                debug!(token = token.get(), "dropping stale page response");
                return LoadOutcome::Stale { token };
            }
        };

        let index = latest.index;
        self.in_flight = false;
        match result {
            Ok(fetched) => {
                let page = Page::from_fetched(index, fetched);
                info!(
                    page = %index,
                    records = page.len(),
                    total = page.total_count(),
                    "page loaded"
                );
                self.page = Some(page);
                LoadOutcome::Applied { index }
            }
            Err(error) => {
                warn!(page = %index, %error, "page fetch failed");
                self.last_error = Some(error.clone());
                LoadOutcome::Failed { index, error }
            }
        }
    }

    /// The page currently held, if any has loaded.
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Whether the latest request is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Page index of the most recent request.
    pub fn requested_index(&self) -> Option<PageIndex> {
        self.latest.map(|r| r.index)
    }

    /// Error from the most recent request, cleared when a new request starts.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}
