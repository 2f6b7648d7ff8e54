//! HTTP client for the OMDb catalog (<https://www.omdbapi.com/>).

use async_trait::async_trait;
use marquee_model::{MovieDetail, MovieId, MovieSummary};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::traits::CatalogService;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, ConfigError};

const NOT_AVAILABLE: &str = "N/A";

/// [`CatalogService`] backed by the OMDb JSON API.
#[derive(Clone)]
pub struct OmdbCatalog {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for OmdbCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbCatalog")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &!self.api_key.is_empty())
            .finish()
    }
}

impl OmdbCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| {
                ConfigError::Invalid(format!("failed to build HTTP client: {err}"))
            })?;
        Self::with_client(client, &config.base_url, config.api_key.clone())
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        api_key: String,
    ) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| {
            ConfigError::Invalid(format!(
                "catalog base url {base_url:?} is invalid: {err}"
            ))
        })?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("OMDb request failed with status {}", status);
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|err| CatalogError::Decode(err.to_string()))
    }
}

#[async_trait]
impl CatalogService for OmdbCatalog {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        debug!("OMDb search for {:?}", query);
        let envelope: SearchEnvelope = self.get(&[("s", query)]).await?;
        envelope.into_summaries()
    }

    async fn detail(&self, id: &MovieId) -> Result<MovieDetail, CatalogError> {
        debug!("OMDb detail for {}", id);
        let envelope: DetailEnvelope =
            self.get(&[("i", id.as_str()), ("plot", "full")]).await?;
        envelope.into_detail()
    }
}

/// `/?s=` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchEnvelope {
    response: String,
    #[serde(default)]
    search: Vec<SearchHit>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchHit {
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    poster: Option<String>,
}

/// `/?i=` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailEnvelope {
    response: String,
    error: Option<String>,
    title: Option<String>,
    year: Option<String>,
    released: Option<String>,
    runtime: Option<String>,
    genre: Option<String>,
    director: Option<String>,
    actors: Option<String>,
    plot: Option<String>,
    poster: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

impl SearchEnvelope {
    fn into_summaries(self) -> Result<Vec<MovieSummary>, CatalogError> {
        if !is_success(&self.response) {
            return Err(failure(self.error));
        }

        let summaries: Vec<MovieSummary> = self
            .search
            .into_iter()
            .filter_map(|hit| match MovieId::new(hit.imdb_id) {
                Ok(id) => Some(MovieSummary::new(
                    id,
                    hit.title,
                    hit.year,
                    available(hit.poster),
                )),
                Err(err) => {
                    warn!("Skipping OMDb hit {:?}: {}", hit.title, err);
                    None
                }
            })
            .collect();

        if summaries.is_empty() {
            Err(CatalogError::NotFound)
        } else {
            Ok(summaries)
        }
    }
}

impl DetailEnvelope {
    fn into_detail(self) -> Result<MovieDetail, CatalogError> {
        if !is_success(&self.response) {
            return Err(failure(self.error));
        }

        let id = self
            .imdb_id
            .ok_or_else(|| CatalogError::Decode("detail is missing imdbID".into()))
            .and_then(|raw| {
                MovieId::new(raw).map_err(|err| CatalogError::Decode(err.to_string()))
            })?;

        Ok(MovieDetail {
            summary: MovieSummary::new(
                id,
                self.title.unwrap_or_default(),
                self.year.unwrap_or_default(),
                available(self.poster),
            ),
            plot: available(self.plot),
            runtime_minutes: available(self.runtime)
                .map(|raw| parse_runtime(&raw))
                .unwrap_or(0),
            catalog_rating: available(self.imdb_rating)
                .and_then(|raw| raw.trim().parse().ok()),
            released: available(self.released),
            genre: available(self.genre),
            director: available(self.director),
            actors: available(self.actors),
        })
    }
}

fn is_success(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

/// Classify a `"Response": "False"` body.
fn failure(error: Option<String>) -> CatalogError {
    let message = error.unwrap_or_default();
    let lowered = message.to_ascii_lowercase();
    if message.is_empty()
        || lowered.contains("not found")
        || lowered.contains("incorrect imdb id")
    {
        CatalogError::NotFound
    } else {
        CatalogError::Service(message)
    }
}

/// Drop OMDb's `"N/A"` placeholder and blank values.
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != NOT_AVAILABLE
    })
}

/// `"136 min"` -> `136`. Unparseable values count as unknown (`0`).
fn parse_runtime(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
