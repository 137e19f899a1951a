//! Pure path resolver for the `paths` command.

use std::path::PathBuf;

use super::{
    PathError, ad_metrics_path, assets_root, dataset_dir, generated_ads_dir,
    products_config_path, user_stats_path,
};
use crate::dataset::DatasetKind;

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root of the assets tree
    pub assets_root: PathBuf,
    /// Output directory per dataset, in `DatasetKind::ALL` order
    pub dataset_dirs: Vec<(DatasetKind, PathBuf)>,
    /// Persisted user stats file
    pub user_stats: PathBuf,
    /// Persisted ad metrics file
    pub ad_metrics: PathBuf,
    /// Product catalogue
    pub products_config: PathBuf,
    /// Cached ad creatives
    pub generated_ads: PathBuf,
}

impl ResolvedPaths {
    /// Resolve all paths, honouring an explicit assets root override.
    pub fn resolve(explicit_root: Option<&str>) -> Result<Self, PathError> {
        let root = assets_root(explicit_root)?;
        let dataset_dirs = DatasetKind::ALL
            .iter()
            .map(|kind| (*kind, dataset_dir(&root, *kind)))
            .collect();

        Ok(Self {
            user_stats: user_stats_path(&root),
            ad_metrics: ad_metrics_path(&root),
            products_config: products_config_path(&root),
            generated_ads: generated_ads_dir(&root),
            dataset_dirs,
            assets_root: root,
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "assets_root = {}", self.assets_root.display())?;
        for (kind, dir) in &self.dataset_dirs {
            writeln!(f, "videos.{} = {}", kind.dir_name(), dir.display())?;
        }
        writeln!(f, "user_stats = {}", self.user_stats.display())?;
        writeln!(f, "ad_metrics = {}", self.ad_metrics.display())?;
        writeln!(f, "products_config = {}", self.products_config.display())?;
        write!(f, "generated_ads = {}", self.generated_ads.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_deterministic() {
        let first = ResolvedPaths::resolve(Some("/srv/assets")).expect("first resolve");
        let second = ResolvedPaths::resolve(Some("/srv/assets")).expect("second resolve");
        assert_eq!(first, second);
    }

    #[test]
    fn display_format_is_parseable() {
        let paths = ResolvedPaths::resolve(Some("/srv/assets")).unwrap();
        let output = paths.to_string();

        assert!(output.contains("assets_root = /srv/assets"));
        assert!(output.contains("videos.msrvtt = /srv/assets/videos/msrvtt"));
        assert!(output.contains("videos.panda70m = "));
        for line in output.lines() {
            assert!(line.contains(" = "), "line should be key = value: {line}");
        }
    }
}
