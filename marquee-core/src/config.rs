//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `MARQUEE_*` environment variables (a `.env` file is honoured).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 350;
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

pub const ENV_CONFIG_PATH: &str = "MARQUEE_CONFIG";
pub const ENV_OMDB_URL: &str = "MARQUEE_OMDB_URL";
pub const ENV_OMDB_API_KEY: &str = "MARQUEE_OMDB_API_KEY";
pub const ENV_FETCH_TIMEOUT_MS: &str = "MARQUEE_FETCH_TIMEOUT_MS";
pub const ENV_DEBOUNCE_MS: &str = "MARQUEE_DEBOUNCE_MS";
pub const ENV_MIN_QUERY_LEN: &str = "MARQUEE_MIN_QUERY_LEN";
pub const ENV_DATA_DIR: &str = "MARQUEE_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OMDB_URL.to_string(),
            api_key: String::new(),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet interval after the last edit before a search is issued.
    pub debounce_ms: u64,
    /// Trimmed queries shorter than this are treated as empty.
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = directories::ProjectDirs::from("", "marquee", "marquee")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".marquee"));
        Self { data_dir }
    }
}

impl MarqueeConfig {
    /// Load configuration from defaults, an optional TOML file and the
    /// process environment.
    ///
    /// When `path` is `None` the file named by `MARQUEE_CONFIG` is used, if
    /// set.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `MARQUEE_*` overrides using `lookup` to resolve variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_OMDB_URL) {
            self.catalog.base_url = url;
        }
        if let Some(key) = lookup(ENV_OMDB_API_KEY) {
            self.catalog.api_key = key;
        }
        if let Some(raw) = lookup(ENV_FETCH_TIMEOUT_MS) {
            self.catalog.timeout_ms = parse_env(ENV_FETCH_TIMEOUT_MS, raw)?;
        }
        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            self.search.debounce_ms = parse_env(ENV_DEBOUNCE_MS, raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_QUERY_LEN) {
            self.search.min_query_len = parse_env(ENV_MIN_QUERY_LEN, raw)?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.storage.data_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.base_url must not be empty".into(),
            ));
        }
        url::Url::parse(&self.catalog.base_url).map_err(|err| {
            ConfigError::Invalid(format!(
                "catalog.base_url {:?} is not a valid URL: {err}",
                self.catalog.base_url
            ))
        })?;
        if self.catalog.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "catalog.timeout_ms must be greater than zero".into(),
            ));
        }
        if self.search.min_query_len == 0 {
            return Err(ConfigError::Invalid(
                "search.min_query_len must be at least 1".into(),
            ));
        }
        if self.catalog.api_key.is_empty() {
            tracing::warn!(
                "No OMDb API key configured; set {} before searching",
                ENV_OMDB_API_KEY
            );
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(
    key: &'static str,
    raw: String,
) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value: raw })
}
