// src/state.rs

//! Browser state owned by the front end.
//!
//! A result set and its filter vocabulary are published together as one
//! immutable [`Snapshot`]; a load replaces the snapshot in a single swap.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{
    FilterSelection, FilterVocabulary, LoadOrigin, MessageConfig, Movie, ResultSet, Status,
};
use crate::pipeline::{apply_filters, build_vocabulary};
use crate::services::Loaded;

/// One published load: results plus the vocabulary derived from them.
#[derive(Debug, Clone)]
pub struct Snapshot {
    results: ResultSet,
    vocabulary: FilterVocabulary,
    origin: Option<LoadOrigin>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot; the vocabulary is always derived from `results`.
    pub fn new(results: ResultSet, origin: Option<LoadOrigin>) -> Self {
        let vocabulary = build_vocabulary(&results);
        Self {
            results,
            vocabulary,
            origin,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(ResultSet::default(), None)
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn vocabulary(&self) -> &FilterVocabulary {
        &self.vocabulary
    }

    pub fn origin(&self) -> Option<&LoadOrigin> {
        self.origin.as_ref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Current results, filter choice and status line.
#[derive(Debug, Clone)]
pub struct BrowserState {
    snapshot: Arc<Snapshot>,
    selection: FilterSelection,
    status: Status,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(Snapshot::empty()),
            selection: FilterSelection::default(),
            status: Status::Idle,
        }
    }

    /// Mark a load as in flight. The current snapshot stays visible.
    pub fn begin_load(&mut self, origin: LoadOrigin) {
        self.status = Status::Loading(origin);
    }

    /// Publish a finished load, replacing results and vocabulary at once.
    ///
    /// Filter values that no longer exist in the new vocabulary are reset.
    pub fn publish(&mut self, origin: LoadOrigin, loaded: Loaded) {
        let count = loaded.results.len();
        let snapshot = Arc::new(Snapshot::new(loaded.results, Some(origin.clone())));

        if self.selection.reconcile(snapshot.vocabulary()) {
            log::debug!("Reset stale filter values after load");
        }
        self.snapshot = snapshot;
        self.status = if count == 0 {
            Status::NoResults {
                message: loaded.notice,
            }
        } else {
            Status::Showing { origin, count }
        };
    }

    /// Record a failed load.
    ///
    /// Errors caught before any request (missing key, empty query) keep the
    /// current results; any other failure clears them.
    pub fn fail(&mut self, origin: LoadOrigin, error: &AppError) {
        log::error!("Load failed: {}", error);
        let status = Status::from_error(origin, error);
        if matches!(status, Status::Failed { .. }) {
            self.snapshot = Arc::new(Snapshot::empty());
        }
        self.status = status;
    }

    /// Replace the filter selection.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    pub fn select_genre(&mut self, genre: Option<String>) {
        self.selection.genre = genre;
    }

    pub fn select_director(&mut self, director: Option<String>) {
        self.selection.director = director;
    }

    pub fn select_year(&mut self, year: Option<String>) {
        self.selection.year = year;
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Render the status line.
    pub fn status_line(&self, messages: &MessageConfig) -> String {
        self.status.message(messages)
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn results(&self) -> &ResultSet {
        self.snapshot.results()
    }

    pub fn vocabulary(&self) -> &FilterVocabulary {
        self.snapshot.vocabulary()
    }

    /// Movies passing the current selection, in ranked order.
    pub fn visible(&self) -> Vec<&Movie> {
        apply_filters(self.snapshot.results(), &self.selection)
    }

    /// Look up a loaded movie for the detail view.
    pub fn find(&self, id: &str) -> Option<&Movie> {
        self.snapshot.results().get(id)
    }
}
