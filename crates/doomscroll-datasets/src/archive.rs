//! Archive extraction and video collection.
//!
//! Everything here is synchronous; preparers call it through
//! `tokio::task::spawn_blocking`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::error::PrepareError;

const PART_MARKER: &str = ".part-";

/// Extract a zip archive into `dest`.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<(), PrepareError> {
    let file = File::open(archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| PrepareError::archive(archive_path, e))?;

    fs::create_dir_all(dest)?;
    archive
        .extract(dest)
        .map_err(|e| PrepareError::archive(archive_path, e))?;

    tracing::debug!(
        archive = %archive_path.display(),
        entries = archive.len(),
        "Zip archive extracted"
    );
    Ok(())
}

/// Extract an uncompressed tar archive into `dest`.
pub fn extract_tar(archive_path: &Path, dest: &Path) -> Result<(), PrepareError> {
    let file = File::open(archive_path)?;
    let mut archive = tar::Archive::new(file);

    fs::create_dir_all(dest)?;
    archive
        .unpack(dest)
        .map_err(|e| PrepareError::archive(archive_path, e))?;

    tracing::debug!(archive = %archive_path.display(), "Tar archive extracted");
    Ok(())
}

/// True for repository files that hold (part of) a tar archive.
pub fn is_tar_file(name: &str) -> bool {
    name.ends_with(".tar") || name.contains(".tar.part-")
}

/// Tar archives of a repository, split into whole files and multi-part groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TarPlan {
    /// Archives extracted as they are.
    pub whole: Vec<String>,
    /// Split archives keyed by the name before `.part-`, each sorted by name.
    pub split: IndexMap<String, Vec<String>>,
}

impl TarPlan {
    /// Classify repository file names; non-tar files are ignored.
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut plan = Self::default();
        for name in files {
            let name = name.as_ref();
            if !is_tar_file(name) {
                continue;
            }
            match name.find(PART_MARKER) {
                Some(idx) => plan
                    .split
                    .entry(name[..idx].to_string())
                    .or_default()
                    .push(name.to_string()),
                None => plan.whole.push(name.to_string()),
            }
        }
        for parts in plan.split.values_mut() {
            parts.sort();
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.whole.is_empty() && self.split.is_empty()
    }

    /// Every file to download, whole archives first.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.whole
            .iter()
            .chain(self.split.values().flatten())
            .map(String::as_str)
    }
}

/// Concatenate `parts` in order into `output`.
pub fn concat_parts(parts: &[PathBuf], output: &Path) -> Result<(), PrepareError> {
    let mut out = File::create(output)?;
    for part in parts {
        let mut input = File::open(part)?;
        io::copy(&mut input, &mut out)?;
    }
    out.sync_all()?;
    Ok(())
}

/// Move every `*.mp4` under `source` (recursively, case-insensitive) into
/// `dest`, keeping file names. Files whose name already exists in `dest` are
/// left where they are. Returns the number moved.
pub fn move_videos(source: &Path, dest: &Path) -> Result<usize, PrepareError> {
    fs::create_dir_all(dest)?;
    let mut moved = 0;

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| PrepareError::Io(io::Error::other(e)))?;
        if !entry.file_type().is_file() || !is_mp4(entry.path()) {
            continue;
        }
        let target = dest.join(entry.file_name());
        if target.exists() {
            continue;
        }
        move_file(entry.path(), &target)?;
        moved += 1;
    }

    Ok(moved)
}

fn is_mp4(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}

/// Rename, falling back to copy + delete across filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
