//! Core domain types and port definitions for doomscroll.
//!
//! - `dataset` - the supported public video datasets
//! - `media` - video assets and caption sidecars
//! - `feed` - the launcher's scroll session, user history and ad bookkeeping
//! - `paths` - canonical locations under the assets root
//! - `ports` - traits implemented by the adapter crates
#![deny(unused_crate_dependencies)]

pub mod dataset;
pub mod error;
pub mod feed;
pub mod media;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use dataset::{DatasetKind, UnknownDataset};
pub use error::CoreError;
pub use feed::{
    AdPerformance, AdPerformanceStore, FeedSession, Objective, ProductMeta, SessionSummary,
    StatsFile, User, UserReaction, VideoState, collect_cached_ads, load_product_description,
    load_product_metadata,
};
pub use media::{
    SUPPORTED_VIDEO_EXTENSIONS, Video, caption_path_for, collect_videos, collect_videos_with,
    is_supported_video,
};
pub use ports::{
    ClipFetchOutcome, ClipFetcher, ClipRequest, DatasetRow, HfDatasetPort, HfPortError,
    HfPortResult, RowsPage, SplitInfo,
};

pub use paths::{
    DirectoryCreationStrategy, PathError, ResolvedPaths, ad_metrics_path, assets_root,
    dataset_dir, ensure_directory, generated_ads_dir, logs_dir, normalize_user_path,
    products_config_path, user_stats_path, verify_writable,
};

// Silence unused dev-dependency warnings for suites that only use some of them
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio as _;
