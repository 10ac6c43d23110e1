//! Service layer for the movie browser.
//!
//! This module contains the business logic for:
//! - Provider access (`MovieSource`, `OmdbClient`, `InMemorySource`)
//! - Catalog and search loading (`MovieLoader`)

mod loader;
mod memory;
mod omdb;
mod source;

pub use loader::{Loaded, MovieLoader};
pub use memory::InMemorySource;
pub use omdb::OmdbClient;
pub use source::MovieSource;
