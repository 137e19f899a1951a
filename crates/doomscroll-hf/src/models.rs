//! Internal configuration and wire types for Hub and datasets-server responses.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Internal client configuration derived from [`crate::HfClientConfig`].
#[derive(Debug, Clone)]
pub struct HfConfig {
    pub hub_url: Url,
    pub datasets_server_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
    pub token: Option<String>,
    pub max_retries: u8,
    pub retry_base_delay_ms: u64,
    pub cache_dir: Option<PathBuf>,
    pub show_progress: bool,
}

impl Default for HfConfig {
    fn default() -> Self {
        Self {
            hub_url: Url::parse("https://huggingface.co").expect("default Hub URL is valid"),
            datasets_server_url: Url::parse("https://datasets-server.huggingface.co")
                .expect("default datasets-server URL is valid"),
            user_agent: concat!("doomscroll-hf/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            token: None,
            max_retries: 3,
            retry_base_delay_ms: 500,
            cache_dir: None,
            show_progress: true,
        }
    }
}

/// `GET /api/datasets/{id}` (only the fields we read).
#[derive(Debug, Deserialize)]
pub struct DatasetInfoResponse {
    #[serde(default)]
    pub siblings: Vec<SiblingEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SiblingEntry {
    pub rfilename: String,
}

/// `GET /splits?dataset=...`
#[derive(Debug, Deserialize)]
pub struct SplitsResponse {
    #[serde(default)]
    pub splits: Vec<SplitEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SplitEntry {
    pub config: String,
    pub split: String,
}

/// `GET /rows?dataset=...&config=...&split=...&offset=...&length=...`
#[derive(Debug, Deserialize)]
pub struct RowsResponse {
    #[serde(default)]
    pub rows: Vec<RowEntry>,
    #[serde(default)]
    pub num_rows_total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RowEntry {
    pub row: serde_json::Value,
}

/// A `owner/name` dataset identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRef {
    pub owner: String,
    pub name: String,
}

impl DatasetRef {
    /// Parse `owner/name`; anything else is rejected.
    pub fn parse(dataset_id: &str) -> Option<Self> {
        let (owner, name) = dataset_id.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
