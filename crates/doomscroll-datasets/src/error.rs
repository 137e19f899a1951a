//! Error type for dataset preparation.

use std::path::PathBuf;

use doomscroll_core::{HfPortError, PathError};
use thiserror::Error;

/// Errors that can occur while preparing a dataset.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// The Hugging Face Hub or datasets-server failed.
    #[error(transparent)]
    Hub(#[from] HfPortError),

    /// Output or staging directory could not be prepared.
    #[error(transparent)]
    Path(#[from] PathError),

    /// An archive could not be read or unpacked.
    #[error("Failed to extract {}: {message}", path.display())]
    Archive { path: PathBuf, message: String },

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the captions CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required external tool is missing.
    #[error("{tool} unavailable: {message}")]
    Unavailable { tool: String, message: String },

    /// A preparer option was rejected.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A background task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(String),
}

impl PrepareError {
    pub(crate) fn archive(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Archive {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for PrepareError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}
