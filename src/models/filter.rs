//! Filter vocabulary and the user's filter selection.

use serde::{Deserialize, Serialize};

use super::Movie;

/// Distinct filter values derived from one result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterVocabulary {
    pub genres: Vec<String>,
    pub directors: Vec<String>,
    pub years: Vec<String>,
}

impl FilterVocabulary {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.directors.is_empty() && self.years.is_empty()
    }
}

/// Current filter choice; `None` means "no constraint".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSelection {
    pub genre: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = non_blank(genre.into());
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = non_blank(director.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = non_blank(year.into());
        self
    }

    /// Build a selection from optional raw inputs; blank values mean no constraint.
    pub fn from_parts(
        genre: Option<String>,
        director: Option<String>,
        year: Option<String>,
    ) -> Self {
        Self {
            genre: genre.and_then(non_blank),
            director: director.and_then(non_blank),
            year: year.and_then(non_blank),
        }
    }

    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.director.is_none() && self.year.is_none()
    }

    /// Whether `movie` satisfies every active constraint.
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(genre) = &self.genre {
            if !movie.has_genre(genre) {
                return false;
            }
        }
        if let Some(director) = &self.director {
            if movie.director.as_deref() != Some(director.as_str()) {
                return false;
            }
        }
        if let Some(year) = &self.year {
            if movie.year != *year {
                return false;
            }
        }
        true
    }

    /// Drop every constraint whose value is absent from `vocabulary`.
    ///
    /// Returns true if anything was reset.
    pub fn reconcile(&mut self, vocabulary: &FilterVocabulary) -> bool {
        let before = self.clone();
        retain_known(&mut self.genre, &vocabulary.genres);
        retain_known(&mut self.director, &vocabulary.directors);
        retain_known(&mut self.year, &vocabulary.years);
        before != *self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn retain_known(slot: &mut Option<String>, known: &[String]) {
    if slot.as_ref().is_some_and(|value| !known.contains(value)) {
        *slot = None;
    }
}
