// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::OmdbConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &OmdbConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a URL and decode the body as JSON.
///
/// The status code is not checked: the provider reports errors such as an
/// invalid key as a JSON body with a non-2xx status.
pub async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: url::Url) -> Result<T> {
    let text = client.get(url).send().await?.text().await?;
    Ok(serde_json::from_str(&text)?)
}
