//! Path utilities for the assets tree.
//!
//! Every preparer and the launcher resolve locations through this module:
//! - Assets root (`./assets` or `DOOMSCROLL_ASSETS_DIR`)
//! - Per-dataset video directories
//! - Session logs (user stats, ad metrics)
//! - Product catalogue and cached ad creatives
//!
//! Functions return `PathBuf` and `PathError`; no interactive I/O happens here.

mod assets;
mod ensure;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

pub use assets::{
    ASSETS_DIR_ENV, DEFAULT_ASSETS_DIR, ad_metrics_path, assets_root, dataset_dir,
    generated_ads_dir, logs_dir, products_config_path, user_stats_path,
};
pub use ensure::{DirectoryCreationStrategy, ensure_directory, verify_writable};
pub use error::PathError;
pub use platform::normalize_user_path;
pub use resolver::ResolvedPaths;
