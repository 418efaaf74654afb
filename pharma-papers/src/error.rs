use std::result;

use thiserror::Error;

/// Error types for the paper retrieval pipeline
#[derive(Error, Debug)]
pub enum PapersError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// A required string field was empty or whitespace-only
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// Search limit exceeded
    ///
    /// Returned when a search requests more results than the maximum
    /// retrievable window of the ESearch endpoint.
    #[error("search limit exceeded: requested {requested}, maximum is {maximum}")]
    SearchLimitExceeded { requested: usize, maximum: usize },

    /// CSV serialization failed
    #[error("CSV writing failed: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error for file operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = result::Result<T, PapersError>;
