// src/render.rs

//! Plain-text rendering of result grids, filter lists and the detail view.

use std::fmt::Write;

use crate::models::{CatalogConfig, FilterVocabulary, MessageConfig, Movie};
use crate::utils::resolve_poster_url;

/// Texts and fallbacks used while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub messages: &'a MessageConfig,
    pub fallback_poster: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(messages: &'a MessageConfig, catalog: &'a CatalogConfig) -> Self {
        Self {
            messages,
            fallback_poster: &catalog.fallback_poster,
        }
    }
}

/// One card: id, rating and title, then `year • genres`, then the poster.
pub fn render_card(movie: &Movie, ctx: &RenderContext<'_>) -> String {
    let genres = movie
        .genre_line()
        .unwrap_or_else(|| ctx.messages.unknown_genre.clone());
    let rating = movie
        .rating
        .map(|r| format!("{r:.1}"))
        .unwrap_or_else(|| "-".to_string());
    let poster = resolve_poster_url(movie.poster.as_deref(), ctx.fallback_poster);
    format!(
        "{:<10} {:>4}  {}\n           {} • {}\n           {}",
        movie.id, rating, movie.title, movie.year, genres, poster
    )
}

/// Render the visible movies, or the "no matches" line when there are none.
pub fn render_grid(movies: &[&Movie], ctx: &RenderContext<'_>) -> String {
    if movies.is_empty() {
        return ctx.messages.no_matches.clone();
    }
    movies
        .iter()
        .map(|movie| render_card(movie, ctx))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the genre, director and year lists.
pub fn render_vocabulary(vocabulary: &FilterVocabulary) -> String {
    let mut out = String::new();
    for (label, values) in [
        ("Genres", &vocabulary.genres),
        ("Directors", &vocabulary.directors),
        ("Years", &vocabulary.years),
    ] {
        let _ = writeln!(out, "{label} ({}):", values.len());
        for value in values {
            let _ = writeln!(out, "  {value}");
        }
    }
    out
}

/// Render the detail view of one movie.
pub fn render_detail(movie: &Movie, ctx: &RenderContext<'_>) -> String {
    let messages = ctx.messages;
    let unknown = messages.unknown.as_str();
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", movie.title, movie.year);
    let _ = writeln!(
        out,
        "Poster: {}",
        resolve_poster_url(movie.poster.as_deref(), ctx.fallback_poster)
    );
    if !movie.genres.is_empty() {
        let tags: Vec<String> = movie.genres.iter().map(|g| format!("[{g}]")).collect();
        let _ = writeln!(out, "{}", tags.join(" "));
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        movie.plot.as_deref().unwrap_or(messages.no_plot.as_str())
    );
    let _ = writeln!(out);

    let info = [
        ("Director", &movie.director),
        ("Actors", &movie.actors),
        ("Country", &movie.country),
        ("Language", &movie.language),
        ("Runtime", &movie.runtime),
    ];
    for (label, value) in info {
        let _ = writeln!(out, "{label}: {}", value.as_deref().unwrap_or(unknown));
    }

    let rating = match movie.rating {
        Some(r) => format!("{r}/10"),
        None => messages.no_rating.clone(),
    };
    let _ = write!(out, "Rating: {rating}");
    out
}
