// src/pipeline/vocabulary.rs

//! Filter vocabulary derived from a result set.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{FilterVocabulary, Movie};

/// Collect the distinct genres, directors and years of `movies`.
///
/// Genres and directors are sorted lexicographically. Years are sorted
/// newest first by their leading four-digit year; entries without one come
/// last. The output depends only on the set of movies, not their order.
pub fn build_vocabulary<'a, I>(movies: I) -> FilterVocabulary
where
    I: IntoIterator<Item = &'a Movie>,
{
    let mut genres = BTreeSet::new();
    let mut directors = BTreeSet::new();
    let mut years = BTreeSet::new();

    for movie in movies {
        genres.extend(
            movie
                .genres
                .iter()
                .map(|g| g.trim())
                .filter(|g| !g.is_empty())
                .map(String::from),
        );
        if let Some(director) = movie.director.as_deref().map(str::trim) {
            if !director.is_empty() {
                directors.insert(director.to_string());
            }
        }
        let year = movie.year.trim();
        if !year.is_empty() {
            years.insert(year.to_string());
        }
    }

    let mut years: Vec<String> = years.into_iter().collect();
    years.sort_by(|a, b| compare_years(a, b));

    FilterVocabulary {
        genres: genres.into_iter().collect(),
        directors: directors.into_iter().collect(),
        years,
    }
}

/// Leading four-digit year, e.g. `2008` for "2008–2013".
fn leading_year(year: &str) -> Option<u32> {
    let digits = year.get(..4)?;
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

fn compare_years(a: &str, b: &str) -> Ordering {
    match (leading_year(a), leading_year(b)) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
