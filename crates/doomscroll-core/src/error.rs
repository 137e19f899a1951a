//! Top-level core error type.
//!
//! Adapters map this into their own error types (see `CliError`).

use thiserror::Error;

use crate::paths::PathError;
use crate::ports::HfPortError;

/// Errors surfaced by core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Path resolution or directory preparation failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A user-provided value was rejected.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The Hugging Face Hub or another remote service failed.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<HfPortError> for CoreError {
    fn from(err: HfPortError) -> Self {
        Self::ExternalService(err.to_string())
    }
}
