use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when fetching episodes from the API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch episodes from {url} after {attempts} attempt(s): {source}")]
    RequestFailed {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url} after {attempts} attempt(s)")]
    HttpStatus {
        url: String,
        status: u16,
        attempts: u32,
    },

    #[error("Failed to decode episodes from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while normalizing a raw episode record
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Episode '{id}' has an invalid publish date '{date_str}': {source}")]
    InvalidDate {
        id: String,
        date_str: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Top-level errors for building the home page
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Failed to serialize page props: {0}")]
    SerializeFailed(#[from] serde_json::Error),

    #[error("Failed to write page props {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
