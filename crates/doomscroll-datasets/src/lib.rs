//! Dataset preparers for doomscroll.
//!
//! Each preparer fills `assets/videos/<dataset>` with `<id>.mp4` videos and
//! `<id>.txt` caption sidecars:
//!
//! - [`prepare_msrvtt`] - one zip archive, captions from the `train_9k` config
//! - [`prepare_didemo`] - tar archives (some split into parts), train and test captions
//! - [`prepare_panda70m`] - YouTube clips fetched through a [`ClipFetcher`]
//!
//! Hub access goes through [`HfDatasetPort`], so preparers run against fakes
//! in tests.
//!
//! [`ClipFetcher`]: doomscroll_core::ClipFetcher
//! [`HfDatasetPort`]: doomscroll_core::HfDatasetPort
#![deny(unused_crate_dependencies)]

pub mod archive;
pub mod captions;
mod config;
mod didemo;
mod error;
mod msrvtt;
pub mod panda70m;
mod progress;
mod report;
pub mod rows;
mod staging;
mod ytdlp;

pub use config::{CaptionLayout, DidemoConfig, MsrvttConfig, Panda70mConfig};
pub use didemo::prepare_didemo;
pub use error::PrepareError;
pub use msrvtt::prepare_msrvtt;
pub use panda70m::{prepare_panda70m, prepare_panda70m_until};
pub use progress::CliProgressPrinter;
pub use report::PrepareReport;
pub use ytdlp::{YtDlpFetcher, ytdlp_args};

// Silence unused dev-dependency warnings for suites that only use some of them
#[cfg(test)]
use mockall as _;
