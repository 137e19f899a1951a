//! Persisted per-video user stats (`logs/user.json`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Current on-disk format version.
pub const STATS_VERSION: u32 = 1;

/// Stats recorded for one video, keyed by file name in [`StatsFile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoStats {
    pub path: String,
    pub seconds_watched: f64,
    pub heart: bool,
    pub share: bool,
}

/// `{"version": 1, "videos": {"<file name>": {...}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsFile {
    pub version: u32,
    pub videos: BTreeMap<String, VideoStats>,
}

impl Default for StatsFile {
    fn default() -> Self {
        Self {
            version: STATS_VERSION,
            videos: BTreeMap::new(),
        }
    }
}

impl StatsFile {
    /// Load stats, tolerating a missing or malformed file.
    ///
    /// Entries are read field by field: a field with the wrong JSON type keeps
    /// its default instead of discarding the whole entry.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to read user stats");
                }
                return Self::default();
            }
        };

        let payload: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed user stats");
                return Self::default();
            }
        };

        let mut stats = Self::default();
        let Some(videos) = payload.get("videos").and_then(Value::as_object) else {
            return stats;
        };

        for (name, entry) in videos {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            let record = VideoStats {
                path: entry
                    .get("path")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                seconds_watched: entry
                    .get("seconds_watched")
                    .and_then(Value::as_f64)
                    .unwrap_or_default(),
                heart: entry
                    .get("heart")
                    .and_then(Value::as_bool)
                    .unwrap_or_default(),
                share: entry
                    .get("share")
                    .and_then(Value::as_bool)
                    .unwrap_or_default(),
            };
            stats.videos.insert(name.clone(), record);
        }

        stats
    }

    /// Write stats as pretty JSON, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp = tempdir().unwrap();
        let stats = StatsFile::load(&temp.path().join("user.json"));
        assert_eq!(stats, StatsFile::default());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("user.json");
        fs::write(&path, "{not json").unwrap();
        assert!(StatsFile::load(&path).videos.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_entries() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("logs").join("user.json");

        let mut stats = StatsFile::default();
        stats.videos.insert(
            "a.mp4".to_string(),
            VideoStats {
                path: "/videos/a.mp4".to_string(),
                seconds_watched: 4.5,
                heart: true,
                share: false,
            },
        );
        stats.save(&path).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["videos"]["a.mp4"]["seconds_watched"], 4.5);

        assert_eq!(StatsFile::load(&path), stats);
    }

    #[test]
    fn test_wrongly_typed_fields_fall_back_to_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("user.json");
        fs::write(
            &path,
            r#"{"version": 1, "videos": {
                "a.mp4": {"seconds_watched": 7, "heart": "yes", "share": true},
                "b.mp4": "garbage"
            }}"#,
        )
        .unwrap();

        let stats = StatsFile::load(&path);
        assert_eq!(stats.videos.len(), 1);
        let a = &stats.videos["a.mp4"];
        assert!((a.seconds_watched - 7.0).abs() < f64::EPSILON);
        assert!(!a.heart);
        assert!(a.share);
    }
}
