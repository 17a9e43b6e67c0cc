// src/error.rs

//! Unified error handling for the viewer.

use std::fmt;

use thiserror::Error;

/// Result type alias for viewer operations.
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

    /// CSV writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Scrape endpoint answered with a non-success status; carries the body verbatim
    #[error("{0}")]
    Server(String),

    /// Data endpoint reported an `error` field
    #[error("{0}")]
    DataFetch(String),

    /// Keyword was blank; no request is issued
    #[error("Please enter a keyword to scrape.")]
    EmptyKeyword,

    /// Quantity condition or date string could not be parsed
    #[error("Malformed input '{input}': {reason}")]
    MalformedInput { input: String, reason: String },

    /// Export attempted with nothing to export
    #[error("No data to export.")]
    EmptyExport,

    /// Question endpoint reported a failure
    #[error("{0}")]
    Question(String),

    /// Document is still being processed by the backend
    #[error("File is still processing..")]
    NotReady,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a malformed-input error.
    pub fn malformed(input: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedInput {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a server error from a response body, falling back to a generic message.
    pub fn server(body: impl Into<String>) -> Self {
        let body = body.into();
        if body.trim().is_empty() {
            Self::Server("Scraping failed".to_string())
        } else {
            Self::Server(body)
        }
    }
}
