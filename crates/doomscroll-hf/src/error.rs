//! Internal error types for Hugging Face operations.
//!
//! These errors are internal to `doomscroll-hf` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for Hugging Face operations.
pub type HfResult<T> = Result<T, HfError>;

/// Errors related to Hub and datasets-server operations.
#[derive(Debug, Error)]
pub enum HfError {
    /// API request failed with an HTTP error status.
    #[error("HuggingFace API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from HuggingFace API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The requested dataset was not found.
    #[error("Dataset '{dataset_id}' not found on HuggingFace")]
    DatasetNotFound {
        /// The dataset ID that was not found
        dataset_id: String,
    },

    /// The requested file is not part of the dataset repository.
    #[error("File '{filename}' not found in dataset '{dataset_id}'")]
    FileNotFound {
        /// The dataset ID
        dataset_id: String,
        /// The repository-relative file path
        filename: String,
    },

    /// The hf-hub download API failed.
    #[error("Hub download failed: {message}")]
    Hub {
        /// Error reported by hf-hub
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
