// src/pipeline/filter.rs

//! Attribute filtering over a loaded result set.

use crate::models::{FilterSelection, Movie};

/// Keep the movies that satisfy every active constraint of `selection`.
///
/// The output is a subsequence of the input in the same order. An empty
/// selection keeps everything.
pub fn apply_filters<'a, I>(movies: I, selection: &FilterSelection) -> Vec<&'a Movie>
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .filter(|movie| selection.matches(movie))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, genres: &str, director: Option<&str>, year: &str) -> Movie {
        Movie {
            id: id.into(),
            title: id.to_uppercase(),
            year: year.into(),
            genres: genres.split(", ").map(String::from).collect(),
            director: director.map(String::from),
            actors: None,
            country: None,
            language: None,
            runtime: None,
            plot: None,
            poster: None,
            rating: None,
        }
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie("a", "Crime, Drama", Some("Frank Darabont"), "1994"),
            movie("b", "Action, Crime", Some("Christopher Nolan"), "2008"),
            movie("c", "Drama, Romance", Some("Robert Zemeckis"), "1994"),
            movie("d", "Sci-Fi", Some("Christopher Nolan"), "2010"),
            movie("e", "Musical Drama", None, "1994"),
        ]
    }

    fn ids(movies: &[&Movie]) -> Vec<String> {
        movies.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let movies = sample();
        let result = apply_filters(&movies, &FilterSelection::new());
        assert_eq!(ids(&result), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_genre_requires_exact_token() {
        let movies = sample();
        let selection = FilterSelection::new().with_genre("Drama");
        let result = apply_filters(&movies, &selection);
        assert_eq!(ids(&result), vec!["a", "c"]);
    }

    #[test]
    fn test_constraints_are_anded() {
        let movies = sample();
        let selection = FilterSelection::new()
            .with_genre("Crime")
            .with_year("1994");
        assert_eq!(ids(&apply_filters(&movies, &selection)), vec!["a"]);

        let selection = FilterSelection::new()
            .with_director("Christopher Nolan")
            .with_year("1994");
        assert!(apply_filters(&movies, &selection).is_empty());
    }

    #[test]
    fn test_year_is_string_equality() {
        let movies = vec![movie("x", "Drama", None, "2008–2013")];
        assert!(apply_filters(&movies, &FilterSelection::new().with_year("2008")).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_and_monotonic() {
        let movies = sample();
        let loose = FilterSelection::new().with_director("Christopher Nolan");
        let once = apply_filters(&movies, &loose);
        let twice = apply_filters(once.iter().copied(), &loose);
        assert_eq!(ids(&once), ids(&twice));

        let strict = loose.clone().with_genre("Sci-Fi");
        let narrowed = apply_filters(&movies, &strict);
        assert!(narrowed.len() <= once.len());
        assert_eq!(ids(&narrowed), vec!["d"]);
    }
}
