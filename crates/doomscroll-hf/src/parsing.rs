//! Conversion from wire responses into core DTOs.

use doomscroll_core::{RowsPage, SplitInfo};
use serde_json::Value;

use crate::error::{HfError, HfResult};
use crate::models::{DatasetInfoResponse, RowsResponse, SplitsResponse};

/// Repository-relative file paths, in the order the Hub lists them.
pub fn parse_repo_files(info: DatasetInfoResponse) -> Vec<String> {
    info.siblings.into_iter().map(|s| s.rfilename).collect()
}

pub fn parse_splits(response: SplitsResponse) -> Vec<SplitInfo> {
    response
        .splits
        .into_iter()
        .map(|s| SplitInfo {
            config: s.config,
            split: s.split,
        })
        .collect()
}

/// Convert a `/rows` response into a page.
///
/// Every row must be a JSON object.
pub fn parse_rows_page(response: RowsResponse) -> HfResult<RowsPage> {
    let rows = response
        .rows
        .into_iter()
        .map(|entry| match entry.row {
            Value::Object(map) => Ok(map),
            other => Err(HfError::InvalidResponse {
                message: format!("Expected row object, got {other}"),
            }),
        })
        .collect::<HfResult<Vec<_>>>()?;

    Ok(RowsPage {
        rows,
        total: response.num_rows_total,
    })
}
