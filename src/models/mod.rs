// src/models/mod.rs

//! Domain models for the movie browser.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod filter;
mod movie;
mod status;

// Re-export all public types
pub use config::{
    API_KEY_ENV, CatalogConfig, Config, LoggingConfig, MessageConfig, OmdbConfig,
};
pub use filter::{FilterSelection, FilterVocabulary};
pub use movie::{FetchFailure, Movie, MoviePayload, ResultSet, SearchHit, SearchPage, Slot};
pub use status::{LoadOrigin, Status};
