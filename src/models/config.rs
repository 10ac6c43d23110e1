//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable that overrides `omdb.api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Catalog provider endpoint and request behavior
    #[serde(default)]
    pub omdb: OmdbConfig,

    /// Start page catalog
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Status and label texts
    #[serde(default)]
    pub messages: MessageConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply the API key from the environment, if one is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.omdb.api_key = Some(key);
            }
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.omdb.base_url)
            .map_err(|e| AppError::validation(format!("omdb.base_url is invalid: {e}")))?;
        if self.omdb.user_agent.trim().is_empty() {
            return Err(AppError::validation("omdb.user_agent is empty"));
        }
        if self.omdb.timeout_secs == 0 {
            return Err(AppError::validation("omdb.timeout_secs must be > 0"));
        }
        if self.omdb.max_concurrent == 0 {
            return Err(AppError::validation("omdb.max_concurrent must be > 0"));
        }
        if self.omdb.page_size == 0 {
            return Err(AppError::validation("omdb.page_size must be > 0"));
        }
        if self.catalog.ids.is_empty() {
            return Err(AppError::validation("No catalog ids defined"));
        }
        if self.catalog.ids.iter().any(|id| id.trim().is_empty()) {
            return Err(AppError::validation("catalog.ids contains a blank id"));
        }
        Ok(())
    }
}

/// OMDb endpoint and HTTP behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// Provider endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// API key; requests are refused locally when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum requests in flight for one batch
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Maximum candidates taken from a search lookup
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Plot length requested for details ("short" or "full")
    #[serde(default = "defaults::plot")]
    pub plot: String,
}

impl OmdbConfig {
    /// The configured API key, if it is non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_key: None,
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            page_size: defaults::page_size(),
            plot: defaults::plot(),
        }
    }
}

/// Start page catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// IMDb ids loaded by the `top` view
    #[serde(default = "defaults::catalog_ids")]
    pub ids: Vec<String>,

    /// Image reference used when a poster is absent or invalid
    #[serde(default = "defaults::fallback_poster")]
    pub fallback_poster: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ids: defaults::catalog_ids(),
            fallback_poster: defaults::fallback_poster(),
        }
    }
}

/// Status line and label templates.
///
/// Supported placeholders: `{count}`, `{query}`, `{error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "defaults::msg_missing_key")]
    pub missing_key: String,
    #[serde(default = "defaults::msg_empty_query")]
    pub empty_query: String,
    #[serde(default = "defaults::msg_loading_catalog")]
    pub loading_catalog: String,
    #[serde(default = "defaults::msg_loading_search")]
    pub loading_search: String,
    #[serde(default = "defaults::msg_showing_catalog")]
    pub showing_catalog: String,
    #[serde(default = "defaults::msg_showing_search")]
    pub showing_search: String,
    #[serde(default = "defaults::msg_no_results")]
    pub no_results: String,
    #[serde(default = "defaults::msg_no_matches")]
    pub no_matches: String,
    #[serde(default = "defaults::msg_catalog_failed")]
    pub catalog_failed: String,
    #[serde(default = "defaults::msg_search_failed")]
    pub search_failed: String,
    #[serde(default = "defaults::msg_unknown_genre")]
    pub unknown_genre: String,
    #[serde(default = "defaults::msg_no_plot")]
    pub no_plot: String,
    #[serde(default = "defaults::msg_no_rating")]
    pub no_rating: String,
    #[serde(default = "defaults::msg_unknown")]
    pub unknown: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            missing_key: defaults::msg_missing_key(),
            empty_query: defaults::msg_empty_query(),
            loading_catalog: defaults::msg_loading_catalog(),
            loading_search: defaults::msg_loading_search(),
            showing_catalog: defaults::msg_showing_catalog(),
            showing_search: defaults::msg_showing_search(),
            no_results: defaults::msg_no_results(),
            no_matches: defaults::msg_no_matches(),
            catalog_failed: defaults::msg_catalog_failed(),
            search_failed: defaults::msg_search_failed(),
            unknown_genre: defaults::msg_unknown_genre(),
            no_plot: defaults::msg_no_plot(),
            no_rating: defaults::msg_no_rating(),
            unknown: defaults::msg_unknown(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // OMDb defaults
    pub fn base_url() -> String {
        "https://www.omdbapi.com/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; cinegrid/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_concurrent() -> usize {
        32
    }
    pub fn page_size() -> usize {
        10
    }
    pub fn plot() -> String {
        "short".into()
    }

    // Catalog defaults
    pub fn catalog_ids() -> Vec<String> {
        [
            "tt0111161", "tt0068646", "tt0071562", "tt0468569", "tt0108052", "tt0050083",
            "tt0167260", "tt0110912", "tt0120737", "tt0137523", "tt0109830", "tt0080684",
            "tt1375666", "tt0167261", "tt0133093", "tt0099685", "tt0073486", "tt0816692",
            "tt0088763", "tt0102926", "tt0114369", "tt0118799", "tt0120815", "tt0120689",
            "tt0172495", "tt0060196", "tt0076759", "tt0103064", "tt0082971",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn fallback_poster() -> String {
        "img/image_not_available.png".into()
    }

    // Message defaults
    pub fn msg_missing_key() -> String {
        "No API key set. Put your key in config.toml or OMDB_API_KEY.".into()
    }
    pub fn msg_empty_query() -> String {
        "Type something to search for.".into()
    }
    pub fn msg_loading_catalog() -> String {
        "Loading popular movies...".into()
    }
    pub fn msg_loading_search() -> String {
        "Searching for movies...".into()
    }
    pub fn msg_showing_catalog() -> String {
        "Showing {count} popular movies.".into()
    }
    pub fn msg_showing_search() -> String {
        "Showing {count} results for \"{query}\".".into()
    }
    pub fn msg_no_results() -> String {
        "No movies found.".into()
    }
    pub fn msg_no_matches() -> String {
        "No movies match the search or filters.".into()
    }
    pub fn msg_catalog_failed() -> String {
        "Something went wrong while fetching movies.".into()
    }
    pub fn msg_search_failed() -> String {
        "A technical error occurred while searching.".into()
    }
    pub fn msg_unknown_genre() -> String {
        "Unknown genre".into()
    }
    pub fn msg_no_plot() -> String {
        "No description available.".into()
    }
    pub fn msg_no_rating() -> String {
        "No rating available".into()
    }
    pub fn msg_unknown() -> String {
        "Unknown".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
