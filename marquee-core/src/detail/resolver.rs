use std::sync::Arc;
use std::time::Duration;

use marquee_model::{MovieDetail, MovieId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::selection::Selection;
use crate::error::CatalogError;
use crate::providers::CatalogService;

/// Observable detail state for the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub selected: Selection,
    /// Bumped on every resolve; fetches carry the value they were issued under
    pub generation: u64,
    pub detail: Option<MovieDetail>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl DetailState {
    /// True once nothing is loading for the current selection.
    pub fn is_settled(&self) -> bool {
        !self.is_loading
    }
}

/// Fetches the full record for whichever movie is selected.
///
/// Must be driven from within a Tokio runtime.
#[derive(Debug)]
pub struct DetailResolver {
    catalog: Arc<dyn CatalogService>,
    fetch_timeout: Duration,
    state: Arc<watch::Sender<DetailState>>,
    task: Option<JoinHandle<()>>,
}

impl DetailResolver {
    pub fn new(catalog: Arc<dyn CatalogService>, fetch_timeout: Duration) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            catalog,
            fetch_timeout,
            state: Arc::new(state),
            task: None,
        }
    }

    /// Point the resolver at `selection`, discarding any fetch for the
    /// previous one.
    pub fn resolve(&mut self, selection: &Selection) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.selected = selection.clone();
            state.detail = None;
            state.error = None;
            state.is_loading = matches!(selection, Selection::Selected(_));
        });

        let Selection::Selected(id) = selection else {
            debug!(generation, "Selection cleared");
            return;
        };

        let state = Arc::clone(&self.state);
        let catalog = Arc::clone(&self.catalog);
        let fetch_timeout = self.fetch_timeout;
        let id = id.clone();
        self.task = Some(tokio::spawn(async move {
            info!(generation, "Loading detail for {}", id);
            let outcome = match tokio::time::timeout(fetch_timeout, catalog.detail(&id)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(CatalogError::Timeout),
            };
            if let Err(err) = &outcome {
                info!(generation, "Detail for {} failed: {}", id, err);
            }
            if !apply_detail(&state, generation, outcome) {
                debug!(generation, movie = %id, "Discarded stale detail response");
            }
        }));
    }

    pub fn snapshot(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    /// The loaded record, if it belongs to `id`.
    pub fn loaded(&self, id: &MovieId) -> Option<MovieDetail> {
        self.state
            .borrow()
            .detail
            .as_ref()
            .filter(|detail| detail.id() == id)
            .cloned()
    }
}

impl Drop for DetailResolver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn apply_detail(
    state: &watch::Sender<DetailState>,
    generation: u64,
    outcome: Result<MovieDetail, CatalogError>,
) -> bool {
    state.send_if_modified(move |state| {
        if state.generation != generation {
            return false;
        }
        state.is_loading = false;
        match outcome {
            Ok(detail) => {
                state.detail = Some(detail);
                state.error = None;
            }
            Err(err) => {
                state.detail = None;
                state.error = Some(err.user_message());
            }
        }
        true
    })
}
