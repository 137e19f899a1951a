//! Video assets and their caption sidecars.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Extensions the launcher accepts (compared case-insensitively).
pub const SUPPORTED_VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "m4v", "avi", "mkv"];

/// Caption sidecar for a video: `<dir>/<stem>.txt`.
pub fn caption_path_for(video: &Path) -> PathBuf {
    video.with_extension("txt")
}

/// Returns true when the path has one of the supported video extensions.
pub fn is_supported_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_VIDEO_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// A video shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Location of the video file.
    pub path: PathBuf,
    /// Product image this video advertises (ads only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_path: Option<PathBuf>,
}

impl Video {
    /// An organic video.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            product_path: None,
        }
    }

    /// An ad creative linked to a product.
    pub fn ad(path: impl Into<PathBuf>, product_path: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            product_path,
        }
    }

    /// File name, used as the key in persisted stats.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File stem, used as the display title.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Read the caption sidecar, trimmed. `None` when the sidecar is missing or unreadable.
    pub fn caption(&self) -> Option<String> {
        fs::read_to_string(caption_path_for(&self.path))
            .ok()
            .map(|text| text.trim_matches([' ', '\n', '\t']).to_string())
    }
}

/// Collect playable videos from `dir` in random order.
///
/// Only regular files with a supported extension and an existing caption
/// sidecar are kept; videos without a caption are skipped with a warning.
pub fn collect_videos(dir: &Path) -> io::Result<Vec<PathBuf>> {
    collect_videos_with(dir, &mut rand::rng())
}

/// Same as [`collect_videos`] with a caller-provided RNG.
pub fn collect_videos_with<R: Rng + ?Sized>(dir: &Path, rng: &mut R) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !is_supported_video(&path) || !path.is_file() {
            continue;
        }

        let caption = caption_path_for(&path);
        if !caption.exists() {
            tracing::warn!(
                video = %path.display(),
                caption = %caption.display(),
                "Skipping video without caption file"
            );
            continue;
        }
        paths.push(path);
    }

    // read_dir order is platform dependent; sort first so seeded shuffles are reproducible
    paths.sort();
    paths.shuffle(rng);
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    fn touch(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_caption_path_replaces_extension() {
        assert_eq!(
            caption_path_for(Path::new("/v/video7020.mp4")),
            PathBuf::from("/v/video7020.txt")
        );
        assert_eq!(
            caption_path_for(Path::new("/v/abc_3.MKV")),
            PathBuf::from("/v/abc_3.txt")
        );
    }

    #[test]
    fn test_collect_requires_caption_and_supported_extension() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        touch(&dir.join("a.mp4"), "");
        touch(&dir.join("a.txt"), "a cat");
        touch(&dir.join("b.MOV"), "");
        touch(&dir.join("b.txt"), "a dog");
        touch(&dir.join("c.mp4"), ""); // no caption
        touch(&dir.join("d.webm"), ""); // unsupported
        touch(&dir.join("d.txt"), "unused");
        fs::create_dir(dir.join("e.mp4")).unwrap(); // directory, not a file

        let mut rng = StdRng::seed_from_u64(7);
        let mut found = collect_videos_with(dir, &mut rng).unwrap();
        found.sort();

        assert_eq!(found, vec![dir.join("a.mp4"), dir.join("b.MOV")]);
    }

    #[test]
    fn test_collect_shuffle_is_seeded() {
        let temp = tempdir().unwrap();
        for i in 0..8 {
            touch(&temp.path().join(format!("v{i}.mp4")), "");
            touch(&temp.path().join(format!("v{i}.txt")), "caption");
        }

        let first = collect_videos_with(temp.path(), &mut StdRng::seed_from_u64(1)).unwrap();
        let second = collect_videos_with(temp.path(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn test_video_caption_is_trimmed() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("clip.mp4");
        touch(&path, "");
        touch(&temp.path().join("clip.txt"), "\n a man is cooking \t\n");

        let video = Video::new(&path);
        assert_eq!(video.caption().as_deref(), Some("a man is cooking"));
        assert_eq!(video.file_name(), "clip.mp4");
        assert_eq!(video.stem(), "clip");
    }

    #[test]
    fn test_missing_caption_is_none() {
        let video = Video::new("/definitely/not/here.mp4");
        assert!(video.caption().is_none());
    }
}
