//! File downloads through the hf-hub cache.
//!
//! hf-hub's sync API blocks, so every call runs on tokio's blocking pool.

use std::path::PathBuf;

use hf_hub::api::sync::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};

use crate::error::{HfError, HfResult};
use crate::models::{DatasetRef, HfConfig};

/// Downloads dataset repository files via hf-hub.
#[derive(Debug, Clone)]
pub struct HubDownloader {
    endpoint: String,
    token: Option<String>,
    cache_dir: Option<PathBuf>,
    show_progress: bool,
}

impl HubDownloader {
    pub fn new(config: &HfConfig) -> Self {
        Self {
            endpoint: config.hub_url.as_str().trim_end_matches('/').to_string(),
            token: config.token.clone(),
            cache_dir: config.cache_dir.clone(),
            show_progress: config.show_progress,
        }
    }

    /// Build the hf-hub API client for this configuration.
    fn build_api(&self) -> HfResult<Api> {
        let mut builder = ApiBuilder::new()
            .with_endpoint(self.endpoint.clone())
            .with_progress(self.show_progress);

        if let Some(token) = &self.token {
            builder = builder.with_token(Some(token.clone()));
        }
        if let Some(cache_dir) = &self.cache_dir {
            builder = builder.with_cache_dir(cache_dir.clone());
        }

        builder.build().map_err(|e| HfError::Hub {
            message: format!("Failed to create HF API client: {e}"),
        })
    }

    /// Download `filename` from the dataset repository, returning the cached path.
    pub async fn download(&self, repo: &DatasetRef, filename: &str) -> HfResult<PathBuf> {
        let api = self.build_api()?;
        let dataset_id = repo.id();
        let filename = filename.to_string();

        tracing::info!(dataset = %dataset_id, file = %filename, "Downloading dataset file");

        tokio::task::spawn_blocking(move || {
            let api_repo = api.repo(Repo::with_revision(
                dataset_id.clone(),
                RepoType::Dataset,
                "main".to_string(),
            ));
            api_repo
                .get(&filename)
                .map_err(|e| classify_hub_error(&dataset_id, &filename, &e.to_string()))
        })
        .await
        .map_err(|e| HfError::Hub {
            message: format!("Download task failed: {e}"),
        })?
    }
}

/// Map an hf-hub error message onto our error kinds.
fn classify_hub_error(dataset_id: &str, filename: &str, message: &str) -> HfError {
    if message.contains("404") {
        HfError::FileNotFound {
            dataset_id: dataset_id.to_string(),
            filename: filename.to_string(),
        }
    } else {
        HfError::Hub {
            message: message.to_string(),
        }
    }
}
