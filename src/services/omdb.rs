// src/services/omdb.rs

//! OMDb HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{MoviePayload, OmdbConfig, SearchPage};
use crate::services::MovieSource;
use crate::utils::{endpoint, http};

/// `MovieSource` backed by the OMDb REST API.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    plot: String,
}

impl OmdbClient {
    /// Create a client from configuration.
    ///
    /// Fails if the endpoint URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &OmdbConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| AppError::config(format!("invalid omdb.base_url: {e}")))?;
        let client = http::create_async_client(config)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key().map(String::from),
            plot: config.plot.clone(),
        })
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }

    /// Request URL for a detail lookup.
    pub fn detail_url(&self, id: &str) -> Result<Url> {
        let key = self.key()?;
        Ok(endpoint(
            &self.base_url,
            &[("apikey", key), ("i", id), ("plot", self.plot.as_str())],
        )?)
    }

    /// Request URL for a title search.
    pub fn search_url(&self, query: &str, page: u32) -> Result<Url> {
        let key = self.key()?;
        let page = page.to_string();
        Ok(endpoint(
            &self.base_url,
            &[("apikey", key), ("s", query), ("page", page.as_str())],
        )?)
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_detail(&self, id: &str) -> Result<MoviePayload> {
        let url = self.detail_url(id)?;
        log::debug!("GET detail {}", id);
        http::fetch_json(&self.client, url).await
    }

    async fn search_titles(&self, query: &str, page: u32) -> Result<SearchPage> {
        let url = self.search_url(query, page)?;
        log::debug!("GET search {:?} page {}", query, page);
        http::fetch_json(&self.client, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> OmdbConfig {
        OmdbConfig {
            api_key: key.map(String::from),
            ..OmdbConfig::default()
        }
    }

    #[test]
    fn test_detail_url() {
        let client = OmdbClient::new(&config(Some("abc"))).unwrap();
        assert_eq!(
            client.detail_url("tt0111161").unwrap().as_str(),
            "https://www.omdbapi.com/?apikey=abc&i=tt0111161&plot=short"
        );
    }

    #[test]
    fn test_search_url() {
        let client = OmdbClient::new(&config(Some("abc"))).unwrap();
        assert_eq!(
            client.search_url("the godfather", 1).unwrap().as_str(),
            "https://www.omdbapi.com/?apikey=abc&s=the+godfather&page=1"
        );
    }

    #[test]
    fn test_missing_key() {
        let client = OmdbClient::new(&config(None)).unwrap();
        assert!(!client.has_api_key());
        assert!(matches!(
            client.detail_url("tt1"),
            Err(AppError::MissingApiKey)
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut omdb = config(Some("abc"));
        omdb.base_url = "::nope".to_string();
        assert!(matches!(OmdbClient::new(&omdb), Err(AppError::Config(_))));
    }
}
