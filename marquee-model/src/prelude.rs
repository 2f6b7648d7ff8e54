//! UI focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in presentation layers.

pub use super::details::MovieDetail;
pub use super::error::ModelError;
pub use super::ids::MovieId;
pub use super::media::MovieSummary;
pub use super::watch::{WatchedItem, WatchedSummary};
