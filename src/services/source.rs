// src/services/source.rs

//! Catalog provider abstraction.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{MoviePayload, SearchPage};

/// A remote movie catalog.
///
/// Implementations return the provider's payloads untouched; a payload
/// flagged `Response: "False"` is still `Ok`. `Err` is reserved for
/// transport and decoding failures.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Whether credentials are configured; loaders refuse to run without them.
    fn has_api_key(&self) -> bool;

    /// Fetch the full record for one id.
    async fn fetch_detail(&self, id: &str) -> Result<MoviePayload>;

    /// Look up candidate ids for a title query.
    async fn search_titles(&self, query: &str, page: u32) -> Result<SearchPage>;
}
