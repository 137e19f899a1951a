//! Paging through dataset rows.

use doomscroll_core::{DatasetRow, HfDatasetPort, HfPortResult};

use crate::progress::CliProgressPrinter;

/// Rows requested per datasets-server page.
pub const PAGE_SIZE: u32 = 100;

/// Config used when a dataset exposes no explicit configuration.
pub const DEFAULT_CONFIG: &str = "default";

/// Find the configuration that contains `split`, falling back to `default`.
pub async fn resolve_config(
    hf: &dyn HfDatasetPort,
    dataset_id: &str,
    split: &str,
) -> HfPortResult<String> {
    let splits = hf.list_splits(dataset_id).await?;
    let config = splits
        .into_iter()
        .find(|info| info.split == split)
        .map_or_else(|| DEFAULT_CONFIG.to_string(), |info| info.config);
    tracing::debug!(dataset = dataset_id, split, config = %config, "Resolved dataset config");
    Ok(config)
}

/// A window of rows in one split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub offset: u64,
    /// Maximum rows to read; `None` reads to the end of the split.
    pub limit: Option<u64>,
}

impl RowWindow {
    pub const ALL: Self = Self {
        offset: 0,
        limit: None,
    };
}

/// Read rows in pages, calling `on_row` for each one in dataset order.
///
/// Without a reported split size, paging continues until a short page comes
/// back. Returns the number of rows visited.
pub async fn for_each_row<F>(
    hf: &dyn HfDatasetPort,
    dataset_id: &str,
    config: &str,
    split: &str,
    window: RowWindow,
    progress: &mut CliProgressPrinter,
    mut on_row: F,
) -> HfPortResult<u64>
where
    F: FnMut(DatasetRow),
{
    let mut offset = window.offset;
    let mut visited = 0u64;

    loop {
        let remaining = window.limit.map(|limit| limit.saturating_sub(visited));
        if remaining == Some(0) {
            break;
        }
        let length = remaining.map_or(PAGE_SIZE, |r| {
            u32::try_from(r).map_or(PAGE_SIZE, |r| r.min(PAGE_SIZE))
        });

        let page = hf
            .fetch_rows(dataset_id, config, split, offset, length)
            .await?;
        let fetched = page.rows.len() as u64;
        for row in page.rows {
            on_row(row);
        }

        visited += fetched;
        offset += fetched;

        let expected = match page.total {
            Some(total) => {
                let available = total.saturating_sub(window.offset);
                window.limit.map_or(available, |limit| limit.min(available))
            }
            None => window.limit.unwrap_or(visited),
        };
        progress.update(visited, expected);

        let exhausted = page
            .total
            .map_or(fetched < u64::from(length), |total| offset >= total);
        if fetched == 0 || exhausted {
            break;
        }
    }

    progress.finish();
    Ok(visited)
}

/// Total number of rows in a split, `None` when datasets-server does not say.
pub async fn split_size(
    hf: &dyn HfDatasetPort,
    dataset_id: &str,
    config: &str,
    split: &str,
) -> HfPortResult<Option<u64>> {
    Ok(hf.fetch_rows(dataset_id, config, split, 0, 1).await?.total)
}

/// String value of a row column.
pub fn str_field<'a>(row: &'a DatasetRow, key: &str) -> Option<&'a str> {
    row.get(key).and_then(serde_json::Value::as_str)
}
