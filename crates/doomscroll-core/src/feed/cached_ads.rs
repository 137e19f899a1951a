use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::media::Video;

#[derive(Debug, Deserialize)]
struct AdSidecar {
    product_path: Option<PathBuf>,
}

/// Collect pre-rendered ad videos (`*.mp4`) from `dir`, sorted by name.
///
/// An ad is linked to its product through an optional `<stem>.json` sidecar
/// holding `{"product_path": "..."}`. A missing directory yields no ads.
pub fn collect_cached_ads(dir: &Path) -> Vec<Video> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "No cached ads available");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
        })
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let product_path = read_product_link(&path.with_extension("json"));
            Video::ad(path, product_path)
        })
        .collect()
}

fn read_product_link(sidecar: &Path) -> Option<PathBuf> {
    let raw = fs::read_to_string(sidecar).ok()?;
    match serde_json::from_str::<AdSidecar>(&raw) {
        Ok(meta) => meta.product_path,
        Err(e) => {
            tracing::warn!(path = %sidecar.display(), error = %e, "Ignoring malformed ad sidecar");
            None
        }
    }
}
