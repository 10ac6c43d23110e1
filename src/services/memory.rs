// src/services/memory.rs

//! In-memory `MovieSource` for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{MoviePayload, SearchHit, SearchPage};
use crate::services::MovieSource;

#[derive(Debug, Clone)]
enum Reply {
    Found(MoviePayload),
    LookupFailure(String),
    Broken,
    Unreachable,
    Refused,
    Stalled,
}

/// A catalog held in memory.
///
/// Searches match stored titles case-insensitively, in insertion order.
/// Unknown ids answer like the provider does for a bad id.
#[derive(Debug)]
pub struct InMemorySource {
    order: Vec<String>,
    replies: HashMap<String, Reply>,
    has_key: bool,
    search_outage: bool,
    requests: AtomicUsize,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            replies: HashMap::new(),
            has_key: true,
            search_outage: false,
            requests: AtomicUsize::new(0),
        }
    }

    /// Store a detail payload under its `imdbID`.
    pub fn with_movie(self, payload: MoviePayload) -> Self {
        let id = payload.imdb_id.clone().unwrap_or_default();
        self.with_reply(id, Reply::Found(payload))
    }

    /// Answer `id` with `Response: "False"` and `message`.
    pub fn with_lookup_failure(self, id: &str, message: &str) -> Self {
        self.with_reply(id.to_string(), Reply::LookupFailure(message.to_string()))
    }

    /// Answer `id` with a body that is not valid JSON.
    pub fn with_broken(self, id: &str) -> Self {
        self.with_reply(id.to_string(), Reply::Broken)
    }

    /// Fail `id` as if the endpoint itself were unusable.
    pub fn with_unreachable(self, id: &str) -> Self {
        self.with_reply(id.to_string(), Reply::Unreachable)
    }

    /// Refuse the connection for `id`.
    pub fn with_connection_refused(self, id: &str) -> Self {
        self.with_reply(id.to_string(), Reply::Refused)
    }

    /// Never answer `id`.
    pub fn with_stalled(self, id: &str) -> Self {
        self.with_reply(id.to_string(), Reply::Stalled)
    }

    /// Behave as if no API key were configured.
    pub fn without_api_key(mut self) -> Self {
        self.has_key = false;
        self
    }

    /// Fail every search lookup with a transport error.
    pub fn with_search_outage(mut self) -> Self {
        self.search_outage = true;
        self
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn with_reply(mut self, id: String, reply: Reply) -> Self {
        if !self.replies.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.replies.insert(id, reply);
        self
    }
}

#[async_trait]
impl MovieSource for InMemorySource {
    fn has_api_key(&self) -> bool {
        self.has_key
    }

    async fn fetch_detail(&self, id: &str) -> Result<MoviePayload> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        match self.replies.get(id).cloned() {
            Some(Reply::Found(payload)) => Ok(payload),
            Some(Reply::LookupFailure(message)) => Ok(failed_payload(&message)),
            Some(Reply::Broken) => Ok(serde_json::from_str("<html>Bad Gateway</html>")?),
            Some(Reply::Unreachable) => Err(AppError::config("endpoint unavailable")),
            Some(Reply::Refused) => Err(connection_refused()),
            Some(Reply::Stalled) => futures::future::pending().await,
            None => Ok(failed_payload("Incorrect IMDb ID.")),
        }
    }

    async fn search_titles(&self, query: &str, _page: u32) -> Result<SearchPage> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if self.search_outage {
            return Err(connection_refused());
        }

        let needle = query.to_lowercase();
        let hits: Vec<SearchHit> = self
            .order
            .iter()
            .filter_map(|id| match self.replies.get(id) {
                Some(Reply::Found(payload)) => Some(payload),
                _ => None,
            })
            .filter(|payload| {
                payload
                    .title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .map(|payload| SearchHit {
                imdb_id: payload.imdb_id.clone(),
                title: payload.title.clone(),
                year: payload.year.clone(),
            })
            .collect();

        if hits.is_empty() {
            return Ok(SearchPage {
                response: Some("False".into()),
                error: Some("Movie not found!".into()),
                ..SearchPage::default()
            });
        }

        Ok(SearchPage {
            total_results: Some(hits.len().to_string()),
            hits,
            response: Some("True".into()),
            error: None,
        })
    }
}

fn failed_payload(message: &str) -> MoviePayload {
    MoviePayload {
        response: Some("False".into()),
        error: Some(message.to_string()),
        ..MoviePayload::default()
    }
}

fn connection_refused() -> AppError {
    AppError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}
