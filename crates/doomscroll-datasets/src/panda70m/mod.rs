//! Panda-70M: captioned YouTube clips fetched one time section at a time.

mod clips;
mod literal;
mod pool;
mod timestamp;

use std::future::Future;
use std::sync::Arc;

use doomscroll_core::{
    ClipFetcher, DatasetKind, DirectoryCreationStrategy, HfDatasetPort, ensure_directory,
};
use rand::Rng;
use rand::seq::SliceRandom;

pub use clips::{Clip, clips_from_row};
pub use literal::{LiteralError, parse_literal};
pub use pool::{PoolOptions, PoolStats, run_pool};
pub use timestamp::{InvalidTimestamp, parse_timestamp};

use crate::config::Panda70mConfig;
use crate::error::PrepareError;
use crate::progress::CliProgressPrinter;
use crate::report::PrepareReport;
use crate::rows::{self, RowWindow};

/// Download Panda-70M clips until `config.target` succeed.
///
/// Ctrl-C stops new downloads; clips already running are allowed to finish.
pub async fn prepare_panda70m(
    hf: &dyn HfDatasetPort,
    fetcher: Arc<dyn ClipFetcher>,
    config: &Panda70mConfig,
) -> Result<PrepareReport, PrepareError> {
    prepare_panda70m_until(hf, fetcher, config, ctrl_c()).await
}

/// [`prepare_panda70m`] with a caller-provided shutdown signal.
pub async fn prepare_panda70m_until<S>(
    hf: &dyn HfDatasetPort,
    fetcher: Arc<dyn ClipFetcher>,
    config: &Panda70mConfig,
    shutdown: S,
) -> Result<PrepareReport, PrepareError>
where
    S: Future<Output = ()>,
{
    if config.target == 0 {
        return Err(PrepareError::InvalidOption("target must be at least 1".to_string()));
    }
    if config.workers == 0 {
        return Err(PrepareError::InvalidOption("workers must be at least 1".to_string()));
    }
    ensure_directory(&config.output_dir, DirectoryCreationStrategy::AutoCreate)?;

    println!("Loading Panda-70M dataset (split={})…", config.split);
    let mut all_clips = collect_clips(hf, config).await?;
    println!("Found {} total clips", all_clips.len());

    all_clips.shuffle(&mut rand::rng());
    all_clips.truncate(config.max_attempts());

    println!("Starting download with {} workers…", config.workers);
    let options = PoolOptions {
        output_dir: config.output_dir.clone(),
        target: config.target,
        workers: config.workers,
        min_delay: config.min_delay,
        max_delay: config.max_delay,
    };
    let mut progress = CliProgressPrinter::visible_if(config.show_progress, "Downloading clips");
    let stats = run_pool(fetcher, all_clips, &options, &mut progress, shutdown).await;

    tracing::info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        already_present = stats.skipped_existing,
        interrupted = stats.interrupted,
        "Panda-70M download finished"
    );

    let mut report = PrepareReport::new(DatasetKind::Panda70m, config.output_dir.clone());
    report.clips_succeeded = stats.succeeded;
    report.clips_failed = stats.failed;
    Ok(report)
}

async fn collect_clips(
    hf: &dyn HfDatasetPort,
    config: &Panda70mConfig,
) -> Result<Vec<Clip>, PrepareError> {
    let hf_config = rows::resolve_config(hf, &config.dataset_id, &config.split).await?;
    let window = if config.metadata_rows == 0 {
        RowWindow::ALL
    } else {
        // Unknown split size scans from the start.
        let total = rows::split_size(hf, &config.dataset_id, &hf_config, &config.split)
            .await?
            .unwrap_or(config.metadata_rows);
        metadata_window(total, config.metadata_rows, &mut rand::rng())
    };
    tracing::debug!(
        offset = window.offset,
        limit = ?window.limit,
        "Scanning Panda-70M metadata"
    );

    let mut clips = Vec::new();
    let mut progress = CliProgressPrinter::visible_if(config.show_progress, "Processing metadata");
    rows::for_each_row(
        hf,
        &config.dataset_id,
        &hf_config,
        &config.split,
        window,
        &mut progress,
        |row| clips.extend(clips_from_row(&row)),
    )
    .await?;
    Ok(clips)
}

/// A window of `rows` rows starting at a random offset within `total`.
fn metadata_window<R: Rng + ?Sized>(total: u64, rows: u64, rng: &mut R) -> RowWindow {
    let max_offset = total.saturating_sub(rows);
    let offset = if max_offset == 0 {
        0
    } else {
        rng.random_range(0..=max_offset)
    };
    RowWindow {
        offset,
        limit: Some(rows),
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_metadata_window_fits_in_split() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let window = metadata_window(12_000, 5000, &mut rng);
            assert!(window.offset <= 7000);
            assert_eq!(window.limit, Some(5000));
        }
    }

    #[test]
    fn test_metadata_window_small_split_starts_at_zero() {
        let window = metadata_window(800, 5000, &mut StdRng::seed_from_u64(1));
        assert_eq!(window.offset, 0);
    }
}
