//! Port trait implementation for `HfClient`.
//!
//! Implements the core-owned `HfDatasetPort` trait, converting internal
//! errors into `HfPortError` at the boundary.

use std::path::PathBuf;

use async_trait::async_trait;
use doomscroll_core::{HfDatasetPort, HfPortError, HfPortResult, RowsPage, SplitInfo};

use crate::client::HfClient;
use crate::error::HfError;
use crate::http::HttpBackend;
use crate::models::DatasetRef;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HfError` to core `HfPortError`.
fn map_error(err: HfError) -> HfPortError {
    match err {
        HfError::ApiRequestFailed { status, url } => match status {
            401 | 403 => HfPortError::Other {
                message: format!("Access denied ({status}); set HF_TOKEN for gated datasets: {url}"),
            },
            _ => HfPortError::Network {
                message: format!("API request failed with status {status}: {url}"),
            },
        },
        HfError::InvalidResponse { message } => HfPortError::InvalidResponse { message },
        HfError::DatasetNotFound { dataset_id } => HfPortError::DatasetNotFound { dataset_id },
        HfError::FileNotFound {
            dataset_id,
            filename,
        } => HfPortError::FileNotFound {
            dataset_id,
            filename,
        },
        HfError::Hub { message } => HfPortError::Network { message },
        HfError::Network(e) => HfPortError::Network {
            message: e.to_string(),
        },
        HfError::InvalidUrl(e) => HfPortError::Other {
            message: e.to_string(),
        },
        HfError::JsonParse(e) => HfPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

fn parse_dataset_id(dataset_id: &str) -> HfPortResult<DatasetRef> {
    DatasetRef::parse(dataset_id).ok_or_else(|| HfPortError::Other {
        message: format!("Invalid dataset ID format: {dataset_id}"),
    })
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> HfDatasetPort for HfClient<B> {
    async fn list_repo_files(&self, dataset_id: &str) -> HfPortResult<Vec<String>> {
        let repo = parse_dataset_id(dataset_id)?;
        self.list_dataset_files(&repo).await.map_err(map_error)
    }

    async fn download_file(&self, dataset_id: &str, filename: &str) -> HfPortResult<PathBuf> {
        let repo = parse_dataset_id(dataset_id)?;
        self.download_dataset_file(&repo, filename)
            .await
            .map_err(map_error)
    }

    async fn list_splits(&self, dataset_id: &str) -> HfPortResult<Vec<SplitInfo>> {
        let repo = parse_dataset_id(dataset_id)?;
        self.list_dataset_splits(&repo).await.map_err(map_error)
    }

    async fn fetch_rows(
        &self,
        dataset_id: &str,
        config: &str,
        split: &str,
        offset: u64,
        length: u32,
    ) -> HfPortResult<RowsPage> {
        let repo = parse_dataset_id(dataset_id)?;
        self.fetch_rows_page(&repo, config, split, offset, length)
            .await
            .map_err(map_error)
    }
}
