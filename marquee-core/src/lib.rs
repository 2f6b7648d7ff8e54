//! # Marquee Core
//!
//! Client-side core for searching a movie catalog and keeping a personal
//! list of watched movies.
//!
//! ## Overview
//!
//! `marquee-core` holds every piece of behaviour below the UI:
//!
//! - **Search**: debounced title search with stale-response protection
//! - **Detail**: selection state and lazy loading of full movie records
//! - **Watched list**: a duplicate-free list with user ratings, persisted
//!   through a pluggable byte store
//! - **Catalog access**: an OMDb client behind the [`CatalogService`] trait
//!
//! ## Architecture
//!
//! - [`session`]: the facade a UI drives with intents
//! - [`search`]: [`SearchController`] and its observable state
//! - [`detail`]: [`SelectionState`] and [`DetailResolver`]
//! - [`watchlist`]: [`WatchedCollection`]
//! - [`providers`]: catalog trait and the OMDb implementation
//! - [`persistence`]: key/value stores for the watched list
//! - [`config`]: layered configuration (defaults, TOML, environment)
//!
//! ## Examples
//!
//! ```no_run
//! use marquee_core::{MarqueeConfig, Session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MarqueeConfig::load(None)?;
//! let mut session = Session::from_config(&config)?;
//!
//! session.set_query("matrix");
//! let mut search = session.subscribe_search();
//! let state = search.wait_for(|state| state.is_settled()).await?;
//! println!("{} results", state.result_count());
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]

/// Layered runtime configuration
pub mod config;

/// Selection state and detail resolution
pub mod detail;

/// Error types for catalog, watched list, storage and configuration
pub mod error;

/// Byte stores backing the watched list
pub mod persistence;

/// Movie catalog providers (OMDb)
pub mod providers;

/// Debounced catalog search
pub mod search;

pub mod session;

/// The persisted watched list
pub mod watchlist;

pub use config::MarqueeConfig;
pub use detail::{DetailResolver, DetailState, Selection, SelectionState};
pub use error::{CatalogError, ConfigError, PersistenceError, WatchlistError};
pub use persistence::{FileStore, MemoryStore, PersistentStore};
pub use providers::{CatalogService, OmdbCatalog};
pub use search::{SearchController, SearchPhase, SearchState};
pub use session::Session;
pub use watchlist::WatchedCollection;

pub use marquee_model as model;
