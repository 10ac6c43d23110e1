// src/services/loader.rs

//! Catalog and search loaders.
//!
//! Both loaders fetch one detail record per id concurrently, wait for every
//! fetch to settle, and hand the batch to the aggregator in fetch order.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{FetchFailure, OmdbConfig, ResultSet, Slot};
use crate::pipeline::{AggregateStats, aggregate_with_stats};
use crate::services::{MovieSource, OmdbClient};

/// A finished load.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    /// Ranked movies
    pub results: ResultSet,

    /// Provider message when a search matched nothing
    pub notice: Option<String>,

    /// Slot accounting for the batch
    pub stats: AggregateStats,
}

impl Loaded {
    fn empty(notice: Option<String>) -> Self {
        Self {
            notice,
            ..Self::default()
        }
    }
}

/// Loads result sets from a `MovieSource`.
pub struct MovieLoader {
    source: Arc<dyn MovieSource>,
    max_concurrent: usize,
    page_size: usize,
    fetch_timeout: Duration,
}

impl MovieLoader {
    /// Create a loader over `source` using the request limits in `config`.
    pub fn new(source: Arc<dyn MovieSource>, config: &OmdbConfig) -> Self {
        Self {
            source,
            max_concurrent: config.max_concurrent.max(1),
            page_size: config.page_size.max(1),
            fetch_timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }

    /// Create a loader backed by the OMDb API.
    pub fn omdb(config: &OmdbConfig) -> Result<Self> {
        let client = OmdbClient::new(config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Override the per-fetch deadline.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Load the fixed catalog `ids`.
    pub async fn load_catalog(&self, ids: &[String]) -> Result<Loaded> {
        if !self.source.has_api_key() {
            return Err(AppError::MissingApiKey);
        }

        log::info!("Loading catalog of {} titles", ids.len());
        self.load_ids(ids).await
    }

    /// Search titles matching `query` and load their details.
    ///
    /// Only the first page of matches is used, capped at the configured page size.
    pub async fn search(&self, query: &str) -> Result<Loaded> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::EmptyQuery);
        }
        if !self.source.has_api_key() {
            return Err(AppError::MissingApiKey);
        }

        log::info!("Searching for {:?}", query);
        let page = match tokio::time::timeout(
            self.fetch_timeout,
            self.source.search_titles(query, 1),
        )
        .await
        {
            Ok(Ok(page)) => page,
            Ok(Err(AppError::MissingApiKey)) => return Err(AppError::MissingApiKey),
            Ok(Err(e)) => return Err(AppError::transport("search lookup", e)),
            Err(_) => {
                return Err(AppError::transport(
                    "search lookup",
                    format!("timed out after {}s", self.fetch_timeout.as_secs()),
                ));
            }
        };

        if page.is_no_match() {
            log::info!(
                "No matches for {:?}: {}",
                query,
                page.error.as_deref().unwrap_or("empty result")
            );
            return Ok(Loaded::empty(page.error.clone()));
        }

        let ids = page.candidate_ids(self.page_size);
        if ids.is_empty() {
            return Ok(Loaded::empty(page.error.clone()));
        }
        self.load_ids(&ids).await
    }

    async fn load_ids(&self, ids: &[String]) -> Result<Loaded> {
        let start_time = Utc::now();
        let slots = self.fetch_batch(ids).await?;
        let (results, stats) = aggregate_with_stats(slots);

        log::info!(
            "Loaded {} of {} titles ({} failed, {} malformed) in {}ms",
            results.len(),
            stats.slots,
            stats.failed,
            stats.malformed,
            (Utc::now() - start_time).num_milliseconds()
        );

        Ok(Loaded {
            results,
            notice: None,
            stats,
        })
    }

    /// Fetch every id concurrently and return the slots in input order.
    ///
    /// Returns `Err` when a slot fails in a way that affects the whole batch,
    /// or when every slot failed because the provider was unreachable.
    async fn fetch_batch(&self, ids: &[String]) -> Result<Vec<Slot>> {
        let concurrency = self.max_concurrent.min(ids.len()).max(1);
        let mut slot_stream = stream::iter(ids)
            .map(|id| self.fetch_slot(id))
            .buffered(concurrency);

        let mut slots = Vec::with_capacity(ids.len());
        let mut unreachable = 0;
        while let Some(settled) = slot_stream.next().await {
            let settled = settled?;
            if settled.unreachable {
                unreachable += 1;
            }
            slots.push(settled.slot);
        }

        if !slots.is_empty() && unreachable == slots.len() {
            let reason = match slots.first() {
                Some(Err(failure)) => failure.reason.clone(),
                _ => "provider unreachable".to_string(),
            };
            return Err(AppError::transport("detail fetch", reason));
        }
        Ok(slots)
    }

    async fn fetch_slot(&self, id: &str) -> Result<Settled> {
        let id = id.trim();
        let fetched = tokio::time::timeout(self.fetch_timeout, self.source.fetch_detail(id)).await;

        let error = match fetched {
            Ok(Ok(mut payload)) => {
                if let Some(reason) = payload.failure() {
                    log::warn!("Lookup failed for {}: {}", id, reason);
                    return Ok(Settled::failed(FetchFailure::new(id, reason), false));
                }
                if payload.imdb_id.is_none() {
                    payload.imdb_id = Some(id.to_string());
                }
                return Ok(Settled {
                    slot: Ok(payload),
                    unreachable: false,
                });
            }
            Ok(Err(e)) if e.is_batch_fatal() => return Err(e),
            Ok(Err(e)) => e,
            Err(_) => AppError::Timeout {
                context: id.to_string(),
                secs: self.fetch_timeout.as_secs(),
            },
        };

        log::warn!("Failed to fetch {}: {}", id, error);
        let unreachable = error.is_unreachable();
        Ok(Settled::failed(FetchFailure::new(id, error), unreachable))
    }
}

/// One settled fetch and whether it failed to reach the provider.
struct Settled {
    slot: Slot,
    unreachable: bool,
}

impl Settled {
    fn failed(failure: FetchFailure, unreachable: bool) -> Self {
        Self {
            slot: Err(failure),
            unreachable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoviePayload;
    use crate::services::InMemorySource;

    fn payload(id: &str, title: &str, rating: &str) -> MoviePayload {
        MoviePayload {
            imdb_id: Some(id.into()),
            title: Some(title.into()),
            year: Some("1999".into()),
            imdb_rating: Some(rating.into()),
            response: Some("True".into()),
            ..MoviePayload::default()
        }
    }

    fn loader(source: InMemorySource) -> (Arc<InMemorySource>, MovieLoader) {
        let source = Arc::new(source);
        let loader = MovieLoader::new(source.clone(), &OmdbConfig::default());
        (source, loader)
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_catalog_drops_failed_slots() {
        let (_, loader) = loader(
            InMemorySource::new()
                .with_movie(payload("tt1", "One", "8.0"))
                .with_lookup_failure("tt2", "Incorrect IMDb ID.")
                .with_movie(payload("tt3", "Three", "8.0")),
        );

        let loaded = loader.load_catalog(&ids(&["tt1", "tt2", "tt3"])).await.unwrap();
        let got: Vec<_> = loaded.results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(got, vec!["tt1", "tt3"]);
        assert_eq!(loaded.stats.failed, 1);
    }

    #[tokio::test]
    async fn test_catalog_without_key_makes_no_requests() {
        let (source, loader) = loader(
            InMemorySource::new()
                .without_api_key()
                .with_movie(payload("tt1", "One", "8.0")),
        );

        let err = loader.load_catalog(&ids(&["tt1"])).await.unwrap_err();
        assert!(matches!(err, AppError::MissingApiKey));
        assert_eq!(source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_broken_payload_is_isolated() {
        let (_, loader) = loader(
            InMemorySource::new()
                .with_movie(payload("tt1", "One", "6.0"))
                .with_broken("tt2"),
        );

        let loaded = loader.load_catalog(&ids(&["tt2", "tt1"])).await.unwrap();
        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.stats.failed, 1);
    }

    #[tokio::test]
    async fn test_batch_fatal_error_aborts_load() {
        let (_, loader) = loader(
            InMemorySource::new()
                .with_movie(payload("tt1", "One", "6.0"))
                .with_unreachable("tt2"),
        );

        let err = loader.load_catalog(&ids(&["tt1", "tt2"])).await.unwrap_err();
        assert!(err.is_batch_fatal());
    }

    #[tokio::test]
    async fn test_stalled_fetch_times_out_into_failed_slot() {
        let (_, loader) = loader(
            InMemorySource::new()
                .with_movie(payload("tt1", "One", "6.0"))
                .with_stalled("tt2"),
        );
        let loader = loader.with_fetch_timeout(Duration::from_millis(50));

        let loaded = loader.load_catalog(&ids(&["tt1", "tt2"])).await.unwrap();
        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.stats.failed, 1);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query_locally() {
        let (source, loader) = loader(InMemorySource::new());

        let err = loader.search("   ").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyQuery));
        assert_eq!(source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty_with_notice() {
        let (_, loader) = loader(InMemorySource::new().with_movie(payload("tt1", "Heat", "8.3")));

        let loaded = loader.search("zzzz").await.unwrap();
        assert!(loaded.results.is_empty());
        assert_eq!(loaded.notice.as_deref(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn test_search_caps_candidates_at_page_size() {
        let mut source = InMemorySource::new();
        for i in 0..15 {
            source = source.with_movie(payload(&format!("tt{i}"), &format!("Alien {i}"), "7.0"));
        }
        let source = Arc::new(source);
        let config = OmdbConfig {
            page_size: 10,
            ..OmdbConfig::default()
        };
        let loader = MovieLoader::new(source.clone(), &config);

        let loaded = loader.search("alien").await.unwrap();
        assert_eq!(loaded.results.len(), 10);
        // one lookup plus ten detail fetches
        assert_eq!(source.request_count(), 11);
    }

    #[tokio::test]
    async fn test_search_lookup_failure_is_transport_error() {
        let (_, loader) = loader(InMemorySource::new().with_search_outage());

        let err = loader.search("heat").await.unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_search_without_key_makes_no_requests() {
        let (source, loader) = loader(
            InMemorySource::new()
                .without_api_key()
                .with_movie(payload("tt1", "Heat", "8.3")),
        );

        let err = loader.search("heat").await.unwrap_err();
        assert!(matches!(err, AppError::MissingApiKey));
        assert_eq!(source.request_count(), 0);

        // a blank query is reported before the missing key
        let err = loader.search("  ").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyQuery));
        assert_eq!(source.request_count(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_provider_fails_whole_catalog() {
        let (source, loader) = loader(
            InMemorySource::new()
                .with_connection_refused("tt1")
                .with_connection_refused("tt2")
                .with_connection_refused("tt3"),
        );

        let err = loader
            .load_catalog(&ids(&["tt1", "tt2", "tt3"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));
        assert_eq!(source.request_count(), 3);
    }

    #[tokio::test]
    async fn test_single_refused_connection_is_isolated() {
        let (_, loader) = loader(
            InMemorySource::new()
                .with_movie(payload("tt1", "One", "6.0"))
                .with_connection_refused("tt2"),
        );

        let loaded = loader.load_catalog(&ids(&["tt1", "tt2"])).await.unwrap();
        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.stats.failed, 1);
    }
}
