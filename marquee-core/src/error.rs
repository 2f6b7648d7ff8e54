use marquee_model::{ModelError, MovieId};
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Movie not found";
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong with fetching movies";
pub const TIMEOUT_MESSAGE: &str = "The movie catalog took too long to respond";

/// Failures reported by a [`crate::providers::CatalogService`].
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Catalog responded with HTTP status {0}")]
    Status(u16),

    #[error("Not found")]
    NotFound,

    #[error("Catalog error: {0}")]
    Service(String),

    #[error("Catalog request timed out")]
    Timeout,

    #[error("Malformed catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            CatalogError::Timeout => TIMEOUT_MESSAGE.to_string(),
            CatalogError::Service(msg) if !msg.trim().is_empty() => msg.clone(),
            CatalogError::Network(_)
            | CatalogError::Status(_)
            | CatalogError::Service(_)
            | CatalogError::Decode(_) => FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Errors returned synchronously from watched-list mutations.
#[derive(Error, Debug, PartialEq)]
pub enum WatchlistError {
    #[error("{0} is already on the watched list")]
    Duplicate(MovieId),

    #[error("No movie detail is loaded for the current selection")]
    NoDetailLoaded,

    #[error("Invalid watched item: {0}")]
    InvalidItem(#[from] ModelError),
}

/// Store read/write failures. Never escapes the watched collection.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
