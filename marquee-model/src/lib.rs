//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod details;
pub mod error;
pub mod ids;
pub mod media;
pub mod prelude;
pub mod watch;

pub use details::MovieDetail;
pub use error::ModelError;
pub use ids::MovieId;
pub use media::MovieSummary;
pub use watch::{
    MAX_USER_RATING, MIN_USER_RATING, WatchedItem, WatchedSummary,
    validate_user_rating,
};
