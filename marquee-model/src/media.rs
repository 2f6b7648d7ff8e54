use crate::ids::MovieId;

/// Lightweight search hit returned by the catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    /// Release year as reported by the catalog. Series report ranges such as
    /// `2008–2013`, so this stays a string.
    pub year: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_url: Option<String>,
}

impl MovieSummary {
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        year: impl Into<String>,
        poster_url: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            year: year.into(),
            poster_url,
        }
    }
}
