//! Search domain - debounced, cancellable catalog search

pub mod controller;
pub mod types;

pub use self::controller::SearchController;
pub use self::types::{SearchPhase, SearchState};
