//! Summary of a preparer run.

use std::fmt;
use std::path::PathBuf;

use doomscroll_core::DatasetKind;

/// What a preparer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    pub dataset: DatasetKind,
    pub output_dir: PathBuf,
    /// Videos moved out of the extracted archives.
    pub videos_moved: usize,
    /// Caption sidecars written (per-video layout).
    pub captions_written: usize,
    /// Captions CSV, when that layout was used.
    pub csv_path: Option<PathBuf>,
    /// Rows written to the CSV.
    pub csv_rows: usize,
    /// Panda-70M clips available after the run.
    pub clips_succeeded: usize,
    pub clips_failed: usize,
}

impl PrepareReport {
    pub const fn new(dataset: DatasetKind, output_dir: PathBuf) -> Self {
        Self {
            dataset,
            output_dir,
            videos_moved: 0,
            captions_written: 0,
            csv_path: None,
            csv_rows: 0,
            clips_succeeded: 0,
            clips_failed: 0,
        }
    }
}

impl fmt::Display for PrepareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dataset {
            DatasetKind::Panda70m => {
                writeln!(f, "Successfully downloaded: {}", self.clips_succeeded)?;
                writeln!(f, "Failed: {}", self.clips_failed)?;
                write!(f, "Output directory: {}", self.output_dir.display())
            }
            DatasetKind::Msrvtt | DatasetKind::Didemo => {
                writeln!(
                    f,
                    "Moved {} .mp4 files into {}",
                    self.videos_moved,
                    self.output_dir.display()
                )?;
                match &self.csv_path {
                    Some(csv) => write!(
                        f,
                        "Wrote {} caption rows to {}",
                        self.csv_rows,
                        csv.display()
                    ),
                    None => write!(
                        f,
                        "Wrote {} caption files to {}",
                        self.captions_written,
                        self.output_dir.display()
                    ),
                }
            }
        }
    }
}
