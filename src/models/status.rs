//! Human-readable status of the browser.

use serde::Serialize;

use super::MessageConfig;
use crate::error::AppError;

/// Which loader produced the current result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LoadOrigin {
    Catalog,
    Search { query: String },
}

/// What the status line currently reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Status {
    /// Nothing loaded yet
    Idle,
    /// A load is in flight
    Loading(LoadOrigin),
    /// A load finished with at least one movie
    Showing { origin: LoadOrigin, count: usize },
    /// A load finished with zero movies; not an error
    NoResults { message: Option<String> },
    /// No API key configured
    MissingKey,
    /// Search attempted with a blank query
    EmptyQuery,
    /// The whole load failed
    Failed { origin: LoadOrigin, error: String },
}

impl Status {
    /// Classify a load error for `origin`.
    pub fn from_error(origin: LoadOrigin, error: &AppError) -> Self {
        match error {
            AppError::MissingApiKey => Status::MissingKey,
            AppError::EmptyQuery => Status::EmptyQuery,
            other => Status::Failed {
                origin,
                error: other.to_string(),
            },
        }
    }

    /// Whether this status is an error condition.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Status::MissingKey | Status::EmptyQuery | Status::Failed { .. }
        )
    }

    /// Render the status line with the configured texts.
    pub fn message(&self, messages: &MessageConfig) -> String {
        match self {
            Status::Idle => String::new(),
            Status::Loading(LoadOrigin::Catalog) => messages.loading_catalog.clone(),
            Status::Loading(LoadOrigin::Search { .. }) => messages.loading_search.clone(),
            Status::Showing {
                origin: LoadOrigin::Catalog,
                count,
            } => messages
                .showing_catalog
                .replace("{count}", &count.to_string()),
            Status::Showing {
                origin: LoadOrigin::Search { query },
                count,
            } => messages
                .showing_search
                .replace("{count}", &count.to_string())
                .replace("{query}", query),
            Status::NoResults { message } => message
                .clone()
                .unwrap_or_else(|| messages.no_results.clone()),
            Status::MissingKey => messages.missing_key.clone(),
            Status::EmptyQuery => messages.empty_query.clone(),
            Status::Failed { origin, error } => {
                let template = match origin {
                    LoadOrigin::Catalog => &messages.catalog_failed,
                    LoadOrigin::Search { .. } => &messages.search_failed,
                };
                template.replace("{error}", error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showing_messages() {
        let messages = MessageConfig::default();
        let status = Status::Showing {
            origin: LoadOrigin::Search {
                query: "alien".into(),
            },
            count: 7,
        };
        assert_eq!(status.message(&messages), "Showing 7 results for \"alien\".");

        let status = Status::Showing {
            origin: LoadOrigin::Catalog,
            count: 29,
        };
        assert_eq!(status.message(&messages), "Showing 29 popular movies.");
    }

    #[test]
    fn test_zero_results_is_distinct_from_failure() {
        let messages = MessageConfig::default();
        let empty = Status::NoResults {
            message: Some("Movie not found!".into()),
        };
        assert!(!empty.is_error());
        assert_eq!(empty.message(&messages), "Movie not found!");

        let failed = Status::from_error(
            LoadOrigin::Catalog,
            &AppError::transport("detail fetch", "boom"),
        );
        assert!(failed.is_error());
        assert_eq!(
            failed.message(&messages),
            "Something went wrong while fetching movies."
        );
    }

    #[test]
    fn test_error_classification() {
        let origin = LoadOrigin::Search {
            query: String::new(),
        };
        assert_eq!(
            Status::from_error(origin.clone(), &AppError::EmptyQuery),
            Status::EmptyQuery
        );
        assert_eq!(
            Status::from_error(origin, &AppError::MissingApiKey),
            Status::MissingKey
        );
    }
}
