//! Product-level ad performance metrics (`logs/ad_metrics.json`).

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Aggregated metrics for every ad tied to one product image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdPerformance {
    pub product_path: String,
    pub impressions: u64,
    pub total_watch_seconds: f64,
    pub likes: u64,
    pub shares: u64,
}

#[allow(clippy::cast_precision_loss)]
impl AdPerformance {
    pub fn new(product_path: impl Into<String>) -> Self {
        Self {
            product_path: product_path.into(),
            ..Self::default()
        }
    }

    pub fn avg_watch_seconds(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        self.total_watch_seconds / self.impressions as f64
    }

    pub fn like_rate(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        self.likes as f64 / self.impressions as f64
    }

    pub fn share_rate(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        self.shares as f64 / self.impressions as f64
    }
}

/// What an ad score optimises for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Objective {
    /// Blend of like rate, share rate and capped watch time.
    #[default]
    Engagement,
    /// Average seconds watched.
    WatchTime,
    /// Share rate only.
    Shares,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Engagement => "engagement",
            Self::WatchTime => "watch_time",
            Self::Shares => "shares",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown objective '{0}' (expected engagement, watch_time or shares)")]
pub struct UnknownObjective(pub String);

impl FromStr for Objective {
    type Err = UnknownObjective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "engagement" => Ok(Self::Engagement),
            "watch_time" | "watch-time" => Ok(Self::WatchTime),
            "shares" => Ok(Self::Shares),
            _ => Err(UnknownObjective(s.to_string())),
        }
    }
}

/// JSON-backed store of [`AdPerformance`] keyed by product path.
///
/// Metrics are never critical: load falls back to an empty store and save
/// failures are logged.
#[derive(Debug, Clone, Default)]
pub struct AdPerformanceStore {
    path: Option<PathBuf>,
    metrics: BTreeMap<String, AdPerformance>,
}

#[allow(clippy::suboptimal_flops)]
impl AdPerformanceStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load metrics from `path`; saves go back to the same file.
    pub fn load(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            metrics: read_metrics(path),
        }
    }

    /// Persist metrics. Errors are logged and swallowed.
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = write_metrics(path, &self.metrics) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save ad metrics");
        }
    }

    /// Record one impression (the viewer scrolled away from an ad).
    ///
    /// Impressions with no watch time are ignored.
    pub fn record_impression(&mut self, product_path: &str, seconds: f64, liked: bool, shared: bool) {
        if seconds <= 0.0 {
            return;
        }

        let metric = self
            .metrics
            .entry(product_path.to_string())
            .or_insert_with(|| AdPerformance::new(product_path));
        metric.impressions += 1;
        metric.total_watch_seconds += seconds;
        if liked {
            metric.likes += 1;
        }
        if shared {
            metric.shares += 1;
        }

        tracing::debug!(
            product = %product_path,
            impressions = metric.impressions,
            seconds,
            "Recorded ad impression"
        );
        self.save();
    }

    /// Score a product under `objective`. Unknown products score 0.
    pub fn score(&self, product_path: &str, objective: Objective) -> f64 {
        let Some(metric) = self.metrics.get(product_path).filter(|m| m.impressions > 0) else {
            return 0.0;
        };

        match objective {
            Objective::WatchTime => metric.avg_watch_seconds(),
            Objective::Shares => metric.share_rate(),
            Objective::Engagement => {
                let normalized_watch = metric.avg_watch_seconds().min(10.0) / 10.0;
                0.4 * metric.like_rate() + 0.4 * metric.share_rate() + 0.2 * normalized_watch
            }
        }
    }

    pub fn get(&self, product_path: &str) -> Option<&AdPerformance> {
        self.metrics.get(product_path)
    }

    pub fn metrics(&self) -> &BTreeMap<String, AdPerformance> {
        &self.metrics
    }
}

fn read_metrics(path: &Path) -> BTreeMap<String, AdPerformance> {
    let Ok(raw) = fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    let Ok(Value::Object(payload)) = serde_json::from_str::<Value>(&raw) else {
        tracing::warn!(path = %path.display(), "Ignoring malformed ad metrics");
        return BTreeMap::new();
    };

    let mut metrics = BTreeMap::new();
    for (key, entry) in payload {
        let Value::Object(entry) = entry else {
            continue;
        };
        let product_path = entry
            .get("product_path")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map_or_else(|| key.clone(), str::to_string);
        let count = |field: &str| entry.get(field).and_then(Value::as_u64).unwrap_or(0);

        let metric = AdPerformance {
            impressions: count("impressions"),
            total_watch_seconds: entry
                .get("total_watch_seconds")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            likes: count("likes"),
            shares: count("shares"),
            product_path: product_path.clone(),
        };
        metrics.insert(product_path, metric);
    }
    metrics
}

fn write_metrics(path: &Path, metrics: &BTreeMap<String, AdPerformance>) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(metrics)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zero_second_impressions_are_ignored() {
        let mut store = AdPerformanceStore::in_memory();
        store.record_impression("p.png", 0.0, true, true);
        store.record_impression("p.png", -1.0, true, true);
        assert!(store.get("p.png").is_none());
    }

    #[test]
    fn test_rates_and_scores() {
        let mut store = AdPerformanceStore::in_memory();
        store.record_impression("p.png", 4.0, true, false);
        store.record_impression("p.png", 20.0, false, true);
        store.record_impression("p.png", 6.0, true, false);

        let metric = store.get("p.png").unwrap();
        assert_eq!(metric.impressions, 3);
        assert!(approx(metric.avg_watch_seconds(), 10.0));
        assert!(approx(metric.like_rate(), 2.0 / 3.0));
        assert!(approx(metric.share_rate(), 1.0 / 3.0));

        assert!(approx(store.score("p.png", Objective::WatchTime), 10.0));
        assert!(approx(store.score("p.png", Objective::Shares), 1.0 / 3.0));
        // 0.4 * 2/3 + 0.4 * 1/3 + 0.2 * min(10, 10) / 10
        assert!(approx(store.score("p.png", Objective::Engagement), 0.6));
    }

    #[test]
    fn test_engagement_caps_watch_time() {
        let mut store = AdPerformanceStore::in_memory();
        store.record_impression("p.png", 100.0, false, false);
        assert!(approx(store.score("p.png", Objective::Engagement), 0.2));
    }

    #[test]
    fn test_unknown_product_scores_zero() {
        let store = AdPerformanceStore::in_memory();
        assert!(approx(store.score("missing.png", Objective::Engagement), 0.0));
    }

    #[test]
    fn test_autosave_and_reload() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("logs").join("ad_metrics.json");

        let mut store = AdPerformanceStore::load(&path);
        store.record_impression("products/p.png", 2.5, true, false);

        let reloaded = AdPerformanceStore::load(&path);
        assert_eq!(reloaded.get("products/p.png"), store.get("products/p.png"));
    }

    #[test]
    fn test_load_tolerates_corrupt_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("ad_metrics.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(AdPerformanceStore::load(&path).metrics().is_empty());
    }

    #[test]
    fn test_load_falls_back_to_key_for_product_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("ad_metrics.json");
        fs::write(&path, r#"{"a.png": {"impressions": 2, "likes": 1}, "b.png": 3}"#).unwrap();

        let store = AdPerformanceStore::load(&path);
        assert_eq!(store.metrics().len(), 1);
        assert_eq!(store.get("a.png").unwrap().product_path, "a.png");
        assert!(approx(store.score("a.png", Objective::Engagement), 0.2));
    }

    #[test]
    fn test_objective_parse() {
        assert_eq!("watch_time".parse(), Ok(Objective::WatchTime));
        assert_eq!("Shares".parse(), Ok(Objective::Shares));
        assert!("clicks".parse::<Objective>().is_err());
        assert_eq!(Objective::default(), Objective::Engagement);
    }
}
