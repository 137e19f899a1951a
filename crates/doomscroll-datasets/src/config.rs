//! Per-dataset preparer options.
//!
//! Defaults reproduce the published layout under `assets/`; every field can
//! be overridden through the `with_*` builders.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use doomscroll_core::{DatasetKind, dataset_dir};

/// How MSR-VTT captions are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionLayout {
    /// `<video_id>.txt` next to each video in `videos/msrvtt`.
    #[default]
    PerVideo,
    /// All videos in `videos/`, captions in one CSV file.
    Csv,
}

impl FromStr for CaptionLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-video" | "per_video" | "txt" => Ok(Self::PerVideo),
            "csv" => Ok(Self::Csv),
            other => Err(format!("Unknown caption layout '{other}' (expected per-video or csv)")),
        }
    }
}

impl fmt::Display for CaptionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerVideo => f.write_str("per-video"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

/// MSR-VTT preparation options.
#[derive(Debug, Clone)]
pub struct MsrvttConfig {
    pub dataset_id: String,
    pub archive_file: String,
    /// Dataset configuration holding the caption rows.
    pub hf_config: String,
    pub split: String,
    pub output_dir: PathBuf,
    /// Parent directory for the temporary extraction directory.
    pub staging_root: PathBuf,
    pub layout: CaptionLayout,
    /// Captions CSV, used with [`CaptionLayout::Csv`].
    pub csv_path: PathBuf,
    pub show_progress: bool,
}

impl MsrvttConfig {
    /// Defaults rooted at `assets_root`.
    pub fn new(assets_root: &Path) -> Self {
        Self {
            dataset_id: DatasetKind::Msrvtt.repo_id().to_string(),
            archive_file: "MSRVTT_Videos.zip".to_string(),
            hf_config: "train_9k".to_string(),
            split: "train".to_string(),
            output_dir: dataset_dir(assets_root, DatasetKind::Msrvtt),
            staging_root: assets_root.to_path_buf(),
            layout: CaptionLayout::PerVideo,
            csv_path: assets_root.join("msrvtt_train9k_captions.csv"),
            show_progress: true,
        }
    }

    /// Switch caption layout. The CSV layout moves videos to `<root>/videos`.
    #[must_use]
    pub fn with_layout(mut self, layout: CaptionLayout) -> Self {
        if layout == CaptionLayout::Csv && self.layout == CaptionLayout::PerVideo {
            if let Some(videos) = self.output_dir.parent() {
                self.output_dir = videos.to_path_buf();
            }
        }
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// DiDeMo preparation options.
#[derive(Debug, Clone)]
pub struct DidemoConfig {
    pub dataset_id: String,
    /// Splits whose captions are collected, in order.
    pub splits: Vec<String>,
    pub output_dir: PathBuf,
    pub staging_root: PathBuf,
    pub show_progress: bool,
}

impl DidemoConfig {
    pub fn new(assets_root: &Path) -> Self {
        Self {
            dataset_id: DatasetKind::Didemo.repo_id().to_string(),
            splits: vec!["train".to_string(), "test".to_string()],
            output_dir: dataset_dir(assets_root, DatasetKind::Didemo),
            staging_root: assets_root.to_path_buf(),
            show_progress: true,
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// Panda-70M preparation options.
#[derive(Debug, Clone)]
pub struct Panda70mConfig {
    pub dataset_id: String,
    pub split: String,
    pub output_dir: PathBuf,
    /// Number of clips to download successfully.
    pub target: usize,
    /// Concurrent downloads.
    pub workers: usize,
    /// Metadata rows scanned for clips; `0` scans the whole split.
    pub metadata_rows: u64,
    /// Random pause before each download, sampled from this range.
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub show_progress: bool,
}

impl Panda70mConfig {
    pub const DEFAULT_TARGET: usize = 1000;
    pub const DEFAULT_WORKERS: usize = 4;
    pub const DEFAULT_METADATA_ROWS: u64 = 5000;

    pub fn new(assets_root: &Path) -> Self {
        Self {
            dataset_id: DatasetKind::Panda70m.repo_id().to_string(),
            split: "train_2m".to_string(),
            output_dir: dataset_dir(assets_root, DatasetKind::Panda70m),
            target: Self::DEFAULT_TARGET,
            workers: Self::DEFAULT_WORKERS,
            metadata_rows: Self::DEFAULT_METADATA_ROWS,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(3),
            show_progress: true,
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub const fn with_metadata_rows(mut self, rows: u64) -> Self {
        self.metadata_rows = rows;
        self
    }

    #[must_use]
    pub const fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max;
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Clips tried at most, to leave room for failed downloads.
    pub const fn max_attempts(&self) -> usize {
        self.target.saturating_mul(3)
    }
}
