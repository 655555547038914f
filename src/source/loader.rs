//! Background page fetching (impure shell).
//!
//! Each request runs the provider on its own worker thread and reports back
//! over a channel. Results are applied to the [`PageStore`] only when the
//! event loop drains the channel, so the store is touched from one thread.
//! Superseded fetches are never cancelled; they run to completion and the
//! store discards their results.

use super::RecordProvider;
use crate::model::{FetchError, FetchedPage, Page, PageIndex};
use crate::state::page_store::{LoadOutcome, LoadRequest, PageStore, RequestToken};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Message sent from a worker thread when its fetch completes.
#[derive(Debug)]
pub struct LoadResponse {
    /// Token of the request this answers.
    pub token: RequestToken,
    /// Page that was requested.
    pub index: PageIndex,
    /// Provider result.
    pub result: Result<FetchedPage, FetchError>,
}

/// Runs page fetches for a [`PageStore`] on worker threads.
pub struct PageLoader {
    provider: Arc<dyn RecordProvider>,
    tx: Sender<LoadResponse>,
    rx: Receiver<LoadResponse>,
}

impl std::fmt::Debug for PageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLoader").finish_non_exhaustive()
    }
}

impl PageLoader {
    /// Create a loader for `provider`.
    pub fn new(provider: Arc<dyn RecordProvider>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { provider, tx, rx }
    }

    /// Start fetching `index`, superseding any fetch in flight.
    ///
    /// Returns immediately; the result arrives through [`poll`](Self::poll)
    /// or [`wait`](Self::wait).
    pub fn request(&self, store: &mut PageStore, index: PageIndex) -> LoadRequest {
        let request = store.begin_load(index);
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();

        let spawned = thread::Builder::new()
            .name(format!("pagesel-fetch-{}", request.token.get()))
            .spawn(move || {
                let result = provider.fetch_page(request.index);
                // Receiver gone means the app shut down; nothing to report to
                let _ = tx.send(LoadResponse {
                    token: request.token,
                    index: request.index,
                    result,
                });
            });

        if let Err(err) = spawned {
            warn!(%err, "failed to spawn fetch worker, fetching inline");
            let result = self.provider.fetch_page(index);
            let _ = self.tx.send(LoadResponse {
                token: request.token,
                index,
                result,
            });
        }
        request
    }

    /// Apply every response that has already arrived. Never blocks.
    pub fn poll(&self, store: &mut PageStore) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(response) => outcomes.push(Self::apply(store, response)),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        outcomes
    }

    /// Block for up to `timeout` until one response arrives, then apply it.
    ///
    /// Returns `None` if nothing arrived in time.
    pub fn wait(&self, store: &mut PageStore, timeout: Duration) -> Option<LoadOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(response) => Some(Self::apply(store, response)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Wait until the store is no longer loading, or `timeout` elapses.
    ///
    /// Returns every outcome applied on the way, stale ones included.
    pub fn settle(&self, store: &mut PageStore, timeout: Duration) -> Vec<LoadOutcome> {
        let deadline = Instant::now() + timeout;
        let mut outcomes = self.poll(store);
        while store.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.wait(store, remaining) {
                Some(outcome) => outcomes.push(outcome),
                None => break,
            }
        }
        outcomes
    }

    /// Fetch `index` and block until it resolves.
    ///
    /// Any older responses that arrive first are applied (and dropped as
    /// stale) on the way.
    ///
    /// # Errors
    ///
    /// Returns the provider error if the fetch fails; the previous page stays
    /// in the store.
    pub fn load<'s>(
        &self,
        store: &'s mut PageStore,
        index: PageIndex,
    ) -> Result<&'s Page, FetchError> {
        let request = self.request(store, index);
        loop {
            let response = self.rx.recv().map_err(|_| FetchError::Disconnected)?;
            let token = response.token;
            let outcome = Self::apply(store, response);
            if token != request.token {
                continue;
            }
            return match outcome {
                LoadOutcome::Applied { .. } => store.page().ok_or(FetchError::Disconnected),
                LoadOutcome::Failed { error, .. } => Err(error),
                LoadOutcome::Stale { .. } => Err(FetchError::Disconnected),
            };
        }
    }

    fn apply(store: &mut PageStore, response: LoadResponse) -> LoadOutcome {
        debug!(token = response.token.get(), page = %response.index, "fetch completed");
        store.resolve(response.token, response.result)
    }
}
