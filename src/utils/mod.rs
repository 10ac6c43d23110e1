//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Pick the image reference to display for a poster.
///
/// Returns `candidate` when it is an absolute http(s) URL, `fallback`
/// otherwise. Retrying with the fallback after a failed image load is up
/// to the front end.
pub fn resolve_poster_url(candidate: Option<&str>, fallback: &str) -> String {
    candidate
        .map(str::trim)
        .filter(|c| {
            Url::parse(c)
                .map(|u| matches!(u.scheme(), "http" | "https"))
                .unwrap_or(false)
        })
        .unwrap_or(fallback)
        .to_string()
}

/// Build a provider request URL from a base and query parameters.
pub fn endpoint(base_url: &str, params: &[(&str, &str)]) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    url.query_pairs_mut().extend_pairs(params);
    Ok(url)
}
