//! Movie records and the raw OMDb payloads they are built from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder the provider uses for "no value".
const NOT_AVAILABLE: &str = "N/A";

/// Raw detail payload as returned by the provider.
///
/// Every field is optional: a failed lookup only carries `Response` and `Error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MoviePayload {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl MoviePayload {
    /// The provider's failure message, if this payload is a failed lookup.
    pub fn failure(&self) -> Option<String> {
        if self.response.as_deref() == Some("False") {
            Some(
                self.error
                    .clone()
                    .unwrap_or_else(|| "lookup failed".to_string()),
            )
        } else {
            None
        }
    }
}

/// One page of a title search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "Search", default)]
    pub hits: Vec<SearchHit>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl SearchPage {
    /// Whether the lookup matched nothing; `error` then carries the provider's reason.
    pub fn is_no_match(&self) -> bool {
        self.response.as_deref() == Some("False") || self.hits.is_empty()
    }

    /// Candidate ids in provider order, capped at `limit`.
    pub fn candidate_ids(&self, limit: usize) -> Vec<String> {
        self.hits
            .iter()
            .filter_map(|hit| hit.imdb_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .take(limit)
            .map(String::from)
            .collect()
    }
}

/// A single search hit; only the id is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
}

/// A fetch slot that did not yield a usable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Requested id
    pub id: String,

    /// Why the slot failed
    pub reason: String,
}

impl FetchFailure {
    pub fn new(id: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.reason)
    }
}

/// The outcome of one fetch in a batch, in fetch order.
pub type Slot = std::result::Result<MoviePayload, FetchFailure>;

/// A normalized movie entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    /// Release year as text; may be a range ("2008–2013") or unknown
    pub year: String,
    pub genres: Vec<String>,
    /// `None` when the provider does not know the director
    pub director: Option<String>,
    pub actors: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub runtime: Option<String>,
    pub plot: Option<String>,
    /// Only a valid http(s) URL survives normalization
    pub poster: Option<String>,
    /// IMDb rating in `[0, 10]`
    pub rating: Option<f32>,
}

impl Movie {
    /// Normalize a raw payload.
    ///
    /// Returns `None` for failed lookups and payloads without a title.
    /// `requested_id` is used when the payload omits `imdbID`.
    pub fn from_payload(payload: MoviePayload, requested_id: &str) -> Option<Self> {
        if payload.failure().is_some() {
            return None;
        }
        let title = available(payload.title)?;
        let id = available(payload.imdb_id).unwrap_or_else(|| requested_id.trim().to_string());

        Some(Self {
            id,
            title,
            year: payload
                .year
                .map(|y| y.trim().to_string())
                .unwrap_or_default(),
            genres: split_genres(payload.genre.as_deref()),
            director: available(payload.director),
            actors: available(payload.actors),
            country: available(payload.country),
            language: available(payload.language),
            runtime: available(payload.runtime),
            plot: available(payload.plot),
            poster: available(payload.poster).filter(|p| is_http_url(p)),
            rating: payload.imdb_rating.as_deref().and_then(parse_rating),
        })
    }

    /// Sort key for ranking; a missing rating ranks as 0.
    pub fn rating_key(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }

    /// Whether the genre list contains `genre` as an exact token.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Genres joined for display, or `None` when there are none.
    pub fn genre_line(&self) -> Option<String> {
        if self.genres.is_empty() {
            None
        } else {
            Some(self.genres.join(", "))
        }
    }
}

/// An ordered, immutable set of movies produced by one load.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ResultSet {
    movies: Vec<Movie>,
}

impl ResultSet {
    pub(crate) fn from_ranked(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    /// Look up a movie by id.
    pub fn get(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

fn available(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

fn split_genres(raw: Option<&str>) -> Vec<String> {
    match raw.map(str::trim) {
        None | Some("") | Some(NOT_AVAILABLE) => Vec::new(),
        Some(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(String::from)
            .collect(),
    }
}

fn parse_rating(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|r| r.is_finite() && (0.0..=10.0).contains(r))
        .map(f32::abs)
}

fn is_http_url(candidate: &str) -> bool {
    url::Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> MoviePayload {
        serde_json::from_str(
            r#"{
                "Title": "The Dark Knight",
                "Year": "2008",
                "Genre": "Action, Crime, Drama",
                "Director": "Christopher Nolan",
                "Actors": "Christian Bale, Heath Ledger",
                "Country": "United States, United Kingdom",
                "Language": "English, Mandarin",
                "Runtime": "152 min",
                "Plot": "Batman faces the Joker.",
                "Poster": "https://m.media-amazon.com/images/M/dk.jpg",
                "imdbRating": "9.0",
                "imdbID": "tt0468569",
                "Response": "True"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_from_payload_normalizes_fields() {
        let movie = Movie::from_payload(payload(), "tt0468569").unwrap();
        assert_eq!(movie.id, "tt0468569");
        assert_eq!(movie.genres, vec!["Action", "Crime", "Drama"]);
        assert_eq!(movie.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(movie.rating, Some(9.0));
        assert!(movie.poster.is_some());
        assert!(movie.has_genre("Crime"));
        assert!(!movie.has_genre("Crim"));
    }

    #[test]
    fn test_not_available_fields_become_none() {
        let mut raw = payload();
        raw.director = Some("N/A".into());
        raw.plot = Some("N/A".into());
        raw.poster = Some("N/A".into());
        raw.imdb_rating = Some("N/A".into());
        raw.genre = Some("N/A".into());

        let movie = Movie::from_payload(raw, "tt0468569").unwrap();
        assert_eq!(movie.director, None);
        assert_eq!(movie.plot, None);
        assert_eq!(movie.poster, None);
        assert_eq!(movie.rating, None);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.rating_key(), 0.0);
    }

    #[test]
    fn test_negative_zero_rating_is_zero() {
        let mut raw = payload();
        raw.imdb_rating = Some("-0".into());
        let movie = Movie::from_payload(raw, "tt0468569").unwrap();
        let rating = movie.rating.unwrap();
        assert!(rating.is_sign_positive());
        assert_eq!(rating.total_cmp(&0.0), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_out_of_range_rating_and_relative_poster_are_dropped() {
        let mut raw = payload();
        raw.imdb_rating = Some("11.5".into());
        raw.poster = Some("/images/dk.jpg".into());

        let movie = Movie::from_payload(raw, "tt0468569").unwrap();
        assert_eq!(movie.rating, None);
        assert_eq!(movie.poster, None);
    }

    #[test]
    fn test_failed_lookup_is_rejected() {
        let raw: MoviePayload =
            serde_json::from_str(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#).unwrap();
        assert_eq!(raw.failure().as_deref(), Some("Incorrect IMDb ID."));
        assert!(Movie::from_payload(raw, "tt0000000").is_none());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let mut raw = payload();
        raw.title = None;
        assert!(Movie::from_payload(raw, "tt0468569").is_none());
    }

    #[test]
    fn test_missing_id_uses_requested_id() {
        let mut raw = payload();
        raw.imdb_id = None;
        let movie = Movie::from_payload(raw, " tt9 ").unwrap();
        assert_eq!(movie.id, "tt9");
    }

    #[test]
    fn test_search_page_candidates() {
        let page: SearchPage = serde_json::from_str(
            r#"{"Search":[{"imdbID":"tt1"},{"imdbID":"tt2"},{"Title":"no id"},{"imdbID":"tt3"}],
                "totalResults":"42","Response":"True"}"#,
        )
        .unwrap();
        assert!(!page.is_no_match());
        assert_eq!(page.candidate_ids(2), vec!["tt1", "tt2"]);
        assert_eq!(page.candidate_ids(10), vec!["tt1", "tt2", "tt3"]);
    }

    #[test]
    fn test_search_page_no_match() {
        let page: SearchPage =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert!(page.is_no_match());
        assert_eq!(page.error.as_deref(), Some("Movie not found!"));
    }
}
