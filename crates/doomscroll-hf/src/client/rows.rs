//! datasets-server splits and rows.

use doomscroll_core::{RowsPage, SplitInfo};

use crate::error::HfResult;
use crate::http::HttpBackend;
use crate::models::{DatasetRef, RowsResponse, SplitsResponse};
use crate::parsing::{parse_rows_page, parse_splits};
use crate::url::{build_rows_url, build_splits_url};

use super::HfClient;

impl<B: HttpBackend> HfClient<B> {
    /// List the `(config, split)` pairs of a dataset.
    pub(crate) async fn list_dataset_splits(&self, repo: &DatasetRef) -> HfResult<Vec<SplitInfo>> {
        let url = build_splits_url(&self.config, repo);
        let response: SplitsResponse = self.backend.get_json(&url).await?;
        Ok(parse_splits(response))
    }

    /// Fetch one page of rows.
    pub(crate) async fn fetch_rows_page(
        &self,
        repo: &DatasetRef,
        config: &str,
        split: &str,
        offset: u64,
        length: u32,
    ) -> HfResult<RowsPage> {
        let url = build_rows_url(&self.config, repo, config, split, offset, length);
        let response: RowsResponse = self.backend.get_json(&url).await?;
        let page = parse_rows_page(response)?;
        tracing::debug!(
            dataset = %repo.id(),
            config,
            split,
            offset,
            rows = page.rows.len(),
            total = ?page.total,
            "Fetched rows page"
        );
        Ok(page)
    }
}
