//! Result-set pipeline.
//!
//! - `aggregate`: Normalize a settled batch and rank it by rating
//! - `build_vocabulary`: Derive the distinct filter values of a result set
//! - `apply_filters`: Select the movies matching a filter selection

pub mod aggregate;
pub mod filter;
pub mod vocabulary;

pub use aggregate::{AggregateStats, aggregate, aggregate_with_stats};
pub use filter::apply_filters;
pub use vocabulary::build_vocabulary;
