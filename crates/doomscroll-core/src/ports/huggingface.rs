//! Hugging Face dataset port.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for port operations.
pub type HfPortResult<T> = Result<T, HfPortError>;

/// Errors surfaced through the dataset port.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HfPortError {
    /// The dataset repository does not exist (or is private without a token).
    #[error("Dataset '{dataset_id}' not found on HuggingFace")]
    DatasetNotFound { dataset_id: String },

    /// A file is not present in the dataset repository.
    #[error("File '{filename}' not found in dataset '{dataset_id}'")]
    FileNotFound {
        dataset_id: String,
        filename: String,
    },

    /// Network-level failure after retries.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service answered with something we could not interpret.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Anything else (cache I/O, client construction).
    #[error("{message}")]
    Other { message: String },
}

/// One `(config, split)` pair exposed by datasets-server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInfo {
    /// Dataset configuration (subset) name.
    pub config: String,
    /// Split name within the configuration.
    pub split: String,
}

/// A dataset row as returned by datasets-server (column name to JSON value).
pub type DatasetRow = serde_json::Map<String, serde_json::Value>;

/// One page of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowsPage {
    /// Rows in this page, in dataset order.
    pub rows: Vec<DatasetRow>,
    /// Total number of rows in the split, when the service reports it.
    pub total: Option<u64>,
}

/// Port for reading public datasets from the Hugging Face Hub.
#[async_trait]
pub trait HfDatasetPort: Send + Sync {
    /// List every file path in the dataset repository.
    async fn list_repo_files(&self, dataset_id: &str) -> HfPortResult<Vec<String>>;

    /// Download one repository file into the local Hub cache and return its path.
    ///
    /// Already-cached files are returned without re-downloading.
    async fn download_file(&self, dataset_id: &str, filename: &str) -> HfPortResult<PathBuf>;

    /// List the `(config, split)` pairs of a dataset.
    async fn list_splits(&self, dataset_id: &str) -> HfPortResult<Vec<SplitInfo>>;

    /// Fetch one page of rows (`length` is clamped to 1..=100 by implementations).
    async fn fetch_rows(
        &self,
        dataset_id: &str,
        config: &str,
        split: &str,
        offset: u64,
        length: u32,
    ) -> HfPortResult<RowsPage>;
}
