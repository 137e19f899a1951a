//! Port definitions (traits) for external systems.
//!
//! The core defines these interfaces; adapter crates implement them:
//! - `HfDatasetPort` is implemented by `doomscroll-hf`
//! - `ClipFetcher` is implemented by `doomscroll-datasets` (yt-dlp)
//!
//! Preparers depend on the traits only, which keeps them testable with
//! in-memory fakes.

mod clip_fetcher;
mod huggingface;

pub use clip_fetcher::{ClipFetchOutcome, ClipFetcher, ClipRequest};
pub use huggingface::{
    DatasetRow, HfDatasetPort, HfPortError, HfPortResult, RowsPage, SplitInfo,
};
