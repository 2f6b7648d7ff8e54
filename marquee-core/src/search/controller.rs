//! Debounced, generation-tagged catalog search.

use std::sync::Arc;
use std::time::Duration;

use marquee_model::MovieSummary;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::types::{SearchPhase, SearchState};
use crate::config::SearchConfig;
use crate::error::CatalogError;
use crate::providers::CatalogService;

/// Owns the current query and the lifecycle of its catalog fetch.
///
/// Every query change bumps the state's generation. A fetch only writes
/// back into the observable state while its generation is still current, so
/// a slow response for an old query can never replace newer results.
///
/// Methods that start a fetch spawn onto the ambient Tokio runtime and must
/// be called from within one.
#[derive(Debug)]
pub struct SearchController {
    catalog: Arc<dyn CatalogService>,
    config: SearchConfig,
    fetch_timeout: Duration,
    state: Arc<watch::Sender<SearchState>>,
    task: Option<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        config: SearchConfig,
        fetch_timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            catalog,
            config,
            fetch_timeout,
            state: Arc::new(state),
            task: None,
        }
    }

    /// Replace the query. Searchable queries are fetched once the debounce
    /// interval passes without another edit.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        let debounce = self.config.debounce();
        self.start(query, Some(debounce));
    }

    /// Reset to an empty query.
    pub fn clear(&mut self) {
        self.start(String::new(), None);
    }

    /// Re-issue the current query immediately, skipping the debounce.
    pub fn refresh(&mut self) {
        let query = self.state.borrow().query.clone();
        self.start(query, None);
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Whether `query` is long enough to be sent to the catalog.
    pub fn is_searchable(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.config.min_query_len
    }

    fn start(&mut self, query: String, debounce: Option<Duration>) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let searchable = self.is_searchable(&query);
        let term = query.trim().to_string();
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.query = query;
            state.is_loading = false;
            if searchable {
                state.phase = SearchPhase::Debouncing;
            } else {
                state.phase = SearchPhase::Idle;
                state.reset_results();
            }
        });

        if !searchable {
            debug!(generation, "Query below minimum length; search cleared");
            return;
        }

        let state = Arc::clone(&self.state);
        let catalog = Arc::clone(&self.catalog);
        let fetch_timeout = self.fetch_timeout;
        self.task = Some(tokio::spawn(async move {
            if let Some(delay) = debounce.filter(|d| !d.is_zero()) {
                tokio::time::sleep(delay).await;
            }
            run_fetch(&state, catalog.as_ref(), generation, &term, fetch_timeout)
                .await;
        }));
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_fetch(
    state: &watch::Sender<SearchState>,
    catalog: &dyn CatalogService,
    generation: u64,
    term: &str,
    fetch_timeout: Duration,
) {
    if !begin_fetch(state, generation) {
        debug!(generation, "Search superseded before it was issued");
        return;
    }

    info!(generation, "Searching catalog for {:?}", term);
    let outcome = match tokio::time::timeout(fetch_timeout, catalog.search(term)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(CatalogError::Timeout),
    };

    match &outcome {
        Ok(results) => info!(generation, "Search returned {} results", results.len()),
        Err(err) => info!(generation, "Search failed: {}", err),
    }

    if !finish_fetch(state, generation, outcome) {
        debug!(generation, query = term, "Discarded stale search response");
    }
}

/// Move a still-current generation into `Fetching`.
fn begin_fetch(state: &watch::Sender<SearchState>, generation: u64) -> bool {
    state.send_if_modified(|state| {
        if state.generation != generation {
            return false;
        }
        state.phase = SearchPhase::Fetching;
        state.is_loading = true;
        state.error = None;
        true
    })
}

/// Apply a fetch outcome if `generation` is still current.
fn finish_fetch(
    state: &watch::Sender<SearchState>,
    generation: u64,
    outcome: Result<Vec<MovieSummary>, CatalogError>,
) -> bool {
    state.send_if_modified(move |state| {
        if state.generation != generation {
            return false;
        }
        state.is_loading = false;
        match outcome {
            Ok(results) => {
                state.phase = SearchPhase::Succeeded;
                state.results = results;
                state.error = None;
            }
            Err(err) => {
                state.phase = SearchPhase::Failed;
                state.results = Vec::new();
                state.error = Some(err.user_message());
            }
        }
        true
    })
}
