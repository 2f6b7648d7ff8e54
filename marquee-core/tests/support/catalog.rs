//! In-memory catalog with per-request latency.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use marquee_core::CatalogError;
use marquee_core::CatalogService;
use marquee_core::model::{MovieDetail, MovieId, MovieSummary};

#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    searches: HashMap<String, (Duration, Vec<MovieSummary>)>,
    details: HashMap<MovieId, (Duration, MovieDetail)>,
    failing: HashMap<String, u16>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: &str, latency_ms: u64, hits: Vec<MovieSummary>) -> Self {
        self.searches
            .insert(query.to_string(), (Duration::from_millis(latency_ms), hits));
        self
    }

    pub fn failing_search(mut self, query: &str, status: u16) -> Self {
        self.failing.insert(query.to_string(), status);
        self
    }

    pub fn movie(mut self, latency_ms: u64, detail: MovieDetail) -> Self {
        self.details
            .insert(detail.id().clone(), (Duration::from_millis(latency_ms), detail));
        self
    }

    /// Every request in arrival order: `s:<query>` or `i:<id>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn search_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("s:")).count()
    }
}

#[async_trait]
impl CatalogService for ScriptedCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        self.calls.lock().push(format!("s:{query}"));
        if let Some(status) = self.failing.get(query) {
            return Err(CatalogError::Status(*status));
        }
        let Some((latency, hits)) = self.searches.get(query).cloned() else {
            return Err(CatalogError::NotFound);
        };
        tokio::time::sleep(latency).await;
        Ok(hits)
    }

    async fn detail(&self, id: &MovieId) -> Result<MovieDetail, CatalogError> {
        self.calls.lock().push(format!("i:{id}"));
        let Some((latency, detail)) = self.details.get(id).cloned() else {
            return Err(CatalogError::NotFound);
        };
        tokio::time::sleep(latency).await;
        Ok(detail)
    }
}

pub fn id(raw: &str) -> MovieId {
    MovieId::new(raw).expect("valid movie id")
}

pub fn hit(raw_id: &str, title: &str, year: &str) -> MovieSummary {
    MovieSummary::new(
        id(raw_id),
        title,
        year,
        Some(format!("https://img.example/{raw_id}.jpg")),
    )
}

pub fn movie(raw_id: &str, title: &str, runtime_minutes: u32, rating: f32) -> MovieDetail {
    MovieDetail {
        summary: hit(raw_id, title, "1999"),
        plot: Some(format!("The story of {title}.")),
        runtime_minutes,
        catalog_rating: Some(rating),
        released: None,
        genre: Some("Drama".into()),
        director: None,
        actors: None,
    }
}

pub fn matrix_catalog() -> ScriptedCatalog {
    ScriptedCatalog::new()
        .search(
            "matrix",
            80,
            vec![
                hit("tt0133093", "The Matrix", "1999"),
                hit("tt0234215", "The Matrix Reloaded", "2003"),
            ],
        )
        .movie(40, movie("tt0133093", "The Matrix", 136, 8.7))
        .movie(40, movie("tt0234215", "The Matrix Reloaded", 138, 7.2))
}
