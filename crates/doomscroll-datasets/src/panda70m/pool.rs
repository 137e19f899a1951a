//! Bounded clip download pool.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use doomscroll_core::{ClipFetchOutcome, ClipFetcher, ClipRequest, caption_path_for};
use rand::Rng;
use tokio::task::JoinSet;

use super::clips::Clip;
use crate::progress::CliProgressPrinter;

/// Pool limits.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub output_dir: PathBuf,
    pub target: usize,
    pub workers: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

/// Final counters of a pool run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub succeeded: usize,
    pub failed: usize,
    /// Clips that were already on disk.
    pub skipped_existing: usize,
    /// Set when submission stopped because of an interrupt.
    pub interrupted: bool,
}

#[derive(Debug)]
enum ClipResult {
    AlreadyPresent,
    Downloaded,
    Failed(String),
}

/// Download `clips` in order until `target` succeed or the clips run out.
///
/// At most `workers` downloads run at once. Once `shutdown` resolves no new
/// clip is started and in-flight downloads are awaited.
pub async fn run_pool<S>(
    fetcher: Arc<dyn ClipFetcher>,
    clips: Vec<Clip>,
    options: &PoolOptions,
    progress: &mut CliProgressPrinter,
    shutdown: S,
) -> PoolStats
where
    S: Future<Output = ()>,
{
    let workers = options.workers.max(1);
    let target = options.target as u64;
    let mut stats = PoolStats::default();
    let mut pending = clips.into_iter();
    let mut in_flight: JoinSet<ClipResult> = JoinSet::new();
    let mut shutdown = pin!(shutdown);

    progress.update(0, target);
    loop {
        while !stats.interrupted && in_flight.len() < workers && stats.succeeded < options.target {
            let Some(clip) = pending.next() else {
                break;
            };
            let delay = jitter(&mut rand::rng(), options.min_delay, options.max_delay);
            in_flight.spawn(download_clip(
                Arc::clone(&fetcher),
                clip,
                options.output_dir.clone(),
                delay,
            ));
        }

        if in_flight.is_empty() {
            break;
        }

        tokio::select! {
            () = &mut shutdown, if !stats.interrupted => {
                tracing::warn!(
                    in_flight = in_flight.len(),
                    "Interrupted; waiting for in-flight downloads to finish"
                );
                stats.interrupted = true;
            }
            joined = in_flight.join_next() => {
                match joined {
                    Some(Ok(ClipResult::AlreadyPresent)) => {
                        stats.succeeded += 1;
                        stats.skipped_existing += 1;
                    }
                    Some(Ok(ClipResult::Downloaded)) => stats.succeeded += 1,
                    Some(Ok(ClipResult::Failed(reason))) => {
                        tracing::debug!(reason = %reason, "Clip download failed");
                        stats.failed += 1;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Clip download task aborted");
                        stats.failed += 1;
                    }
                    None => break,
                }
                progress.set_counts(stats.succeeded, stats.failed);
                progress.update(stats.succeeded as u64, target);
            }
        }
    }

    progress.finish();
    stats
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

async fn download_clip(
    fetcher: Arc<dyn ClipFetcher>,
    clip: Clip,
    output_dir: PathBuf,
    delay: Duration,
) -> ClipResult {
    let video_path = output_dir.join(format!("{}.mp4", clip.stem()));
    let caption_path = caption_path_for(&video_path);

    if video_path.exists() && caption_path.exists() {
        return ClipResult::AlreadyPresent;
    }

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let request = ClipRequest {
        url: clip.url(),
        start_secs: clip.start_secs,
        end_secs: clip.end_secs,
        output: video_path.clone(),
    };

    let failure = match fetcher.fetch(&request).await {
        ClipFetchOutcome::Completed if video_path.exists() => {
            match tokio::fs::write(&caption_path, clip.caption.as_bytes()).await {
                Ok(()) => return ClipResult::Downloaded,
                Err(e) => format!("Failed to write caption: {e}"),
            }
        }
        ClipFetchOutcome::Completed => "Fetcher reported success but no file was written".to_string(),
        ClipFetchOutcome::Failed(reason) => reason,
        ClipFetchOutcome::TimedOut => "Timed out".to_string(),
    };

    remove_partial(&video_path).await;
    ClipResult::Failed(failure)
}

async fn remove_partial(path: &Path) {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial download");
        }
    }
}
