use async_trait::async_trait;
use marquee_model::{MovieDetail, MovieId, MovieSummary};
use std::fmt::Debug;

use crate::error::CatalogError;

/// Movie catalog collaborator.
///
/// Implementations validate the remote payload once at this boundary; callers
/// only ever see typed records or a [`CatalogError`].
#[async_trait]
pub trait CatalogService: Send + Sync + Debug {
    /// Search the catalog by free-text title.
    ///
    /// An empty hit list is reported as [`CatalogError::NotFound`], never as
    /// `Ok(vec![])`.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Fetch the full record for one movie.
    async fn detail(&self, id: &MovieId) -> Result<MovieDetail, CatalogError>;
}
