//! Internal error types for backend operations.
//!
//! These errors stay inside `lessonsync-gae` and are mapped to core port
//! errors at the boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for backend operations.
pub type GaeResult<T> = Result<T, GaeError>;

#[derive(Debug, Error)]
pub enum GaeError {
    /// Request failed with an HTTP error status.
    #[error("Request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The backend answered with something other than the expected payload.
    #[error("Invalid response from backend: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Could not build the HTTP client.
    #[error("Failed to create HTTP client: {message}")]
    ClientSetup { message: String },

    /// Writing to the API debug directory failed.
    #[error("Failed to write API debug file {}: {source}", path.display())]
    DebugWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
