// src/pipeline/aggregate.rs

//! Batch aggregation: drop failed slots, normalize, rank.

use crate::models::{Movie, ResultSet, Slot};

/// Summary of one aggregated batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AggregateStats {
    pub slots: usize,
    pub failed: usize,
    pub malformed: usize,
}

/// Turn a settled batch into a ranked result set.
pub fn aggregate(slots: Vec<Slot>) -> ResultSet {
    aggregate_with_stats(slots).0
}

/// Like [`aggregate`], also reporting how many slots were dropped.
///
/// Failed slots and payloads that do not normalize are dropped, including
/// payloads without an `imdbID`; the loader fills that in from the requested
/// id before aggregating. Survivors
/// are sorted by rating, highest first, with a missing rating counting as 0.
/// The sort is stable, so equal ratings keep fetch order.
pub fn aggregate_with_stats(slots: Vec<Slot>) -> (ResultSet, AggregateStats) {
    let mut stats = AggregateStats {
        slots: slots.len(),
        ..AggregateStats::default()
    };

    let mut movies = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Ok(payload) => {
                let requested = payload.imdb_id.clone().unwrap_or_default();
                match Movie::from_payload(payload, &requested).filter(|m| !m.id.is_empty()) {
                    Some(movie) => movies.push(movie),
                    None => {
                        stats.malformed += 1;
                        log::debug!("Dropping malformed payload for {:?}", requested);
                    }
                }
            }
            Err(failure) => {
                stats.failed += 1;
                log::debug!("Dropping failed fetch {}", failure);
            }
        }
    }

    movies.sort_by(|a, b| b.rating_key().total_cmp(&a.rating_key()));

    (ResultSet::from_ranked(movies), stats)
}
