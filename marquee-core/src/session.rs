//! Single entry point for a UI layer: intents in, observable state out.

use std::sync::Arc;

use marquee_model::{MovieId, WatchedItem, WatchedSummary};
use tokio::sync::watch;
use tracing::info;

use crate::config::MarqueeConfig;
use crate::detail::{DetailResolver, DetailState, Selection, SelectionState};
use crate::error::{ConfigError, WatchlistError};
use crate::persistence::{FileStore, PersistentStore};
use crate::providers::{CatalogService, OmdbCatalog};
use crate::search::{SearchController, SearchState};
use crate::watchlist::WatchedCollection;

/// Wires search, selection, detail resolution and the watched list together.
///
/// Intent methods that start a fetch must run inside a Tokio runtime.
#[derive(Debug)]
pub struct Session {
    search: SearchController,
    selection: SelectionState,
    detail: DetailResolver,
    watched: WatchedCollection,
}

impl Session {
    pub fn new(
        config: &MarqueeConfig,
        catalog: Arc<dyn CatalogService>,
        store: Arc<dyn PersistentStore>,
    ) -> Self {
        let timeout = config.catalog.timeout();
        let watched = WatchedCollection::hydrate(store);
        info!("Session ready with {} watched movies", watched.len());
        Self {
            search: SearchController::new(
                Arc::clone(&catalog),
                config.search.clone(),
                timeout,
            ),
            selection: SelectionState::new(),
            detail: DetailResolver::new(catalog, timeout),
            watched,
        }
    }

    /// Build a session against OMDb with the watched list stored under
    /// `config.storage.data_dir`.
    pub fn from_config(config: &MarqueeConfig) -> Result<Self, ConfigError> {
        let catalog = Arc::new(OmdbCatalog::new(&config.catalog)?);
        let store = Arc::new(FileStore::new(config.storage.data_dir.clone()));
        Ok(Self::new(config, catalog, store))
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    pub fn clear_query(&mut self) {
        self.search.clear();
    }

    pub fn refresh_search(&mut self) {
        self.search.refresh();
    }

    /// Open `id`. Re-selecting the open movie does nothing.
    pub fn select(&mut self, id: MovieId) {
        if self.selection.select(id) {
            self.detail.resolve(self.selection.current());
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.detail.resolve(self.selection.current());
        }
    }

    /// Open `id`, or close it if it is already open.
    pub fn toggle_selection(&mut self, id: MovieId) {
        if self.selection.toggle(id) {
            self.detail.resolve(self.selection.current());
        }
    }

    /// Mark the open movie as watched with `user_rating`.
    pub fn add_watched(&mut self, user_rating: f32) -> Result<(), WatchlistError> {
        let detail = self
            .selection
            .selected_id()
            .and_then(|id| self.detail.loaded(id))
            .ok_or(WatchlistError::NoDetailLoaded)?;
        let item = WatchedItem::from_detail(&detail, user_rating)?;
        self.watched.add(item)?;
        info!("Marked {} as watched", detail.id());
        Ok(())
    }

    pub fn remove_watched(&mut self, id: &MovieId) -> bool {
        self.watched.remove(id)
    }

    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    pub fn search(&self) -> SearchState {
        self.search.snapshot()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<SearchState> {
        self.search.subscribe()
    }

    pub fn detail(&self) -> DetailState {
        self.detail.snapshot()
    }

    pub fn subscribe_detail(&self) -> watch::Receiver<DetailState> {
        self.detail.subscribe()
    }

    pub fn watched(&self) -> &[WatchedItem] {
        self.watched.items()
    }

    pub fn watched_summary(&self) -> WatchedSummary {
        self.watched.summary()
    }

    /// The user's rating for `id` if it is already on the watched list.
    pub fn watched_rating(&self, id: &MovieId) -> Option<f32> {
        self.watched.user_rating(id)
    }
}
