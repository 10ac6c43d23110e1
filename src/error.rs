// src/error.rs

//! Unified error handling for the movie browser.

use std::fmt;

use thiserror::Error;

/// Result type alias for browser operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No API key configured; raised before any request is made
    #[error("No OMDb API key configured")]
    MissingApiKey,

    /// Search was attempted with a blank query
    #[error("Search query is empty")]
    EmptyQuery,

    /// A single fetch did not settle within its deadline
    #[error("Request for {context} timed out after {secs}s")]
    Timeout { context: String, secs: u64 },

    /// The fetch mechanism failed for the whole batch
    #[error("Transport error during {context}: {message}")]
    Transport { context: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a batch-level transport error with context.
    pub fn transport(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error, seen in one fetch slot, makes the whole batch unusable.
    ///
    /// Network, timeout and payload errors stay isolated to their slot. Errors
    /// that would repeat identically for every request (bad endpoint, missing
    /// credentials, broken client) abort the batch.
    pub fn is_batch_fatal(&self) -> bool {
        match self {
            AppError::Http(e) => e.is_builder(),
            AppError::Url(_)
            | AppError::Config(_)
            | AppError::MissingApiKey
            | AppError::Transport { .. } => true,
            _ => false,
        }
    }

    /// Whether this error means the provider could not be reached at all.
    ///
    /// One such slot is dropped like any other failure; a batch in which
    /// every slot failed this way is a transport failure.
    pub fn is_unreachable(&self) -> bool {
        match self {
            AppError::Http(e) => e.is_connect() || e.is_request(),
            AppError::Io(_) => true,
            _ => false,
        }
    }
}
