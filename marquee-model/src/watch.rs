use crate::details::MovieDetail;
use crate::error::ModelError;
use crate::ids::MovieId;

pub const MIN_USER_RATING: f32 = 1.0;
pub const MAX_USER_RATING: f32 = 10.0;

/// A movie the user has marked as watched, with their own rating.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchedItem {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_url: Option<String>,
    pub user_rating: f32,
    pub runtime_minutes: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub catalog_rating: Option<f32>,
}

impl WatchedItem {
    /// Build a watched entry from a resolved detail record.
    pub fn from_detail(
        detail: &MovieDetail,
        user_rating: f32,
    ) -> Result<Self, ModelError> {
        validate_user_rating(user_rating)?;
        Ok(Self {
            id: detail.summary.id.clone(),
            title: detail.summary.title.clone(),
            year: detail.summary.year.clone(),
            poster_url: detail.summary.poster_url.clone(),
            user_rating,
            runtime_minutes: detail.runtime_minutes,
            catalog_rating: detail.catalog_rating,
        })
    }
}

pub fn validate_user_rating(rating: f32) -> Result<f32, ModelError> {
    if (MIN_USER_RATING..=MAX_USER_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ModelError::InvalidRating(rating))
    }
}

/// Aggregate view over a watched list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchedSummary {
    pub count: usize,
    pub average_user_rating: f32,
    pub average_runtime_minutes: f32,
    /// Mean over the items that carry a catalog rating.
    pub average_catalog_rating: f32,
}

impl WatchedSummary {
    pub fn from_items(items: &[WatchedItem]) -> Self {
        let count = items.len();
        let average_user_rating =
            mean(items.iter().map(|item| item.user_rating));
        let average_runtime_minutes =
            mean(items.iter().map(|item| item.runtime_minutes as f32));
        let average_catalog_rating =
            mean(items.iter().filter_map(|item| item.catalog_rating));

        Self {
            count,
            average_user_rating,
            average_runtime_minutes,
            average_catalog_rating,
        }
    }
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, n) = values.fold((0.0_f64, 0_usize), |(sum, n), value| {
        (sum + f64::from(value), n + 1)
    });
    if n == 0 { 0.0 } else { (sum / n as f64) as f32 }
}
