use crate::ids::MovieId;
use crate::media::MovieSummary;

/// Full catalog record for a single movie.
///
/// Fetched lazily when a movie is selected and never cached across
/// selections.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieDetail {
    pub summary: MovieSummary,
    pub plot: Option<String>,
    /// Runtime in whole minutes, `0` when the catalog does not know it.
    pub runtime_minutes: u32,
    /// Catalog (IMDb) rating on a 0-10 scale.
    pub catalog_rating: Option<f32>,
    pub released: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
}

impl MovieDetail {
    pub fn id(&self) -> &MovieId {
        &self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }
}
