// src/lib.rs

//! cinegrid: OMDb movie browser library
//!
//! Loads movies by id or by title search, ranks them by rating, derives
//! genre/director/year filters and applies them to the loaded set.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod services;
pub mod state;
pub mod utils;

pub use pipeline::{aggregate, apply_filters, build_vocabulary};
pub use services::{Loaded, MovieLoader, MovieSource};
pub use state::BrowserState;
pub use utils::resolve_poster_url;
