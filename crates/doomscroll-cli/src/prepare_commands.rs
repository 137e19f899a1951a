//! Dataset subcommands of `doomscroll prepare`.

use std::path::PathBuf;

use clap::Subcommand;
use doomscroll_datasets::{CaptionLayout, Panda70mConfig};

#[derive(Subcommand, Debug)]
pub enum PrepareCommand {
    /// MSR-VTT: one zip archive plus the train_9k captions
    Msrvtt {
        /// Caption layout: per-video .txt sidecars or a single csv
        #[arg(long, default_value = "per-video")]
        layout: CaptionLayout,
        /// Output directory [default: <assets>/videos/msrvtt]
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },

    /// DiDeMo: tar archives plus train and test captions
    Didemo {
        /// Output directory [default: <assets>/videos/didemo]
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },

    /// Panda-70M: YouTube clips fetched with yt-dlp
    Panda70m {
        /// Output directory [default: <assets>/videos/panda70m]
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
        /// Number of clips to download successfully
        #[arg(long, default_value_t = Panda70mConfig::DEFAULT_TARGET)]
        target: usize,
        /// Concurrent downloads
        #[arg(long, default_value_t = Panda70mConfig::DEFAULT_WORKERS)]
        workers: usize,
        /// Metadata rows to scan from a random offset (0 scans the whole split)
        #[arg(long = "metadata-rows", default_value_t = Panda70mConfig::DEFAULT_METADATA_ROWS)]
        metadata_rows: u64,
        /// Path to the yt-dlp executable [default: found on PATH]
        #[arg(long = "yt-dlp")]
        yt_dlp: Option<PathBuf>,
    },
}
