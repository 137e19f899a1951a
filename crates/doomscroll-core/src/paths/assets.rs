//! Locations under the assets root.
//!
//! The layout mirrors what the preparers produce and the launcher reads:
//!
//! ```text
//! assets/
//!   videos/<dataset>/<video_id>.mp4 + <video_id>.txt
//!   videos_generated/              cached ad creatives
//!   products.json                  product catalogue
//!   logs/user.json                 persisted per-video stats
//!   logs/ad_metrics.json           ad performance by product
//! ```

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::normalize_user_path;
use crate::dataset::DatasetKind;

/// Environment variable overriding the assets root.
pub const ASSETS_DIR_ENV: &str = "DOOMSCROLL_ASSETS_DIR";

/// Default assets root, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Resolve the assets root.
///
/// Resolution order:
/// 1. Explicit path provided by caller
/// 2. `DOOMSCROLL_ASSETS_DIR` environment variable
/// 3. `./assets`
pub fn assets_root(explicit: Option<&str>) -> Result<PathBuf, PathError> {
    if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
        return normalize_user_path(path);
    }

    if let Ok(env_path) = env::var(ASSETS_DIR_ENV) {
        if !env_path.trim().is_empty() {
            return normalize_user_path(&env_path);
        }
    }

    normalize_user_path(DEFAULT_ASSETS_DIR)
}

/// Output directory for one dataset: `<root>/videos/<dataset>`.
pub fn dataset_dir(root: &Path, kind: DatasetKind) -> PathBuf {
    root.join("videos").join(kind.dir_name())
}

/// Session logs directory: `<root>/logs`.
pub fn logs_dir(root: &Path) -> PathBuf {
    root.join("logs")
}

/// Persisted per-video user stats.
pub fn user_stats_path(root: &Path) -> PathBuf {
    logs_dir(root).join("user.json")
}

/// Persisted ad performance metrics.
pub fn ad_metrics_path(root: &Path) -> PathBuf {
    logs_dir(root).join("ad_metrics.json")
}

/// Product catalogue consulted for ad links.
pub fn products_config_path(root: &Path) -> PathBuf {
    root.join("products.json")
}

/// Directory of already-generated ad videos.
pub fn generated_ads_dir(root: &Path) -> PathBuf {
    root.join("videos_generated")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn test_explicit_root_wins() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set(ASSETS_DIR_ENV, "/from/env");

        let root = assets_root(Some("/explicit/assets")).unwrap();
        assert_eq!(root, PathBuf::from("/explicit/assets"));
    }

    #[test]
    fn test_env_root_used_when_no_explicit() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set(ASSETS_DIR_ENV, "/from/env");

        assert_eq!(assets_root(None).unwrap(), PathBuf::from("/from/env"));
    }

    #[test]
    fn test_default_root_is_relative_to_cwd() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::unset(ASSETS_DIR_ENV);

        let root = assets_root(None).unwrap();
        assert_eq!(root, env::current_dir().unwrap().join("assets"));
    }

    #[test]
    fn test_dataset_layout() {
        let root = Path::new("/data/assets");
        assert_eq!(
            dataset_dir(root, DatasetKind::Panda70m),
            PathBuf::from("/data/assets/videos/panda70m")
        );
        assert_eq!(
            user_stats_path(root),
            PathBuf::from("/data/assets/logs/user.json")
        );
        assert_eq!(
            ad_metrics_path(root),
            PathBuf::from("/data/assets/logs/ad_metrics.json")
        );
        assert_eq!(
            generated_ads_dir(root),
            PathBuf::from("/data/assets/videos_generated")
        );
    }
}
