//! Feed session state machine.
//!
//! Time is passed in explicitly so the caller owns the clock; the CLI uses
//! `Instant::now()` while tests step a fixed base instant.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::ads::{AdPerformanceStore, Objective};
use super::products::ProductMeta;
use super::state::VideoState;
use super::stats::{StatsFile, VideoStats};
use super::summary::{AdSummaryRow, SessionSummary, VideoSummaryRow};
use super::user::{MIN_SECONDS_FOR_CONTEXT, User};
use crate::error::CoreError;
use crate::media::Video;

/// Organic views between two inserted ads.
pub const AD_INTERVAL: usize = 5;

/// X (Twitter) intent URL used when a video is shared.
pub fn share_intent_url(stem: &str) -> String {
    let text = format!("Check out \"{stem}\" on Doom Scroll Ads 🎬");
    format!(
        "https://twitter.com/intent/tweet?text={}",
        urlencoding::encode(&text)
    )
}

/// One viewing session over a list of videos.
#[derive(Debug)]
pub struct FeedSession {
    states: Vec<VideoState>,
    current: usize,
    started_at: Option<Instant>,
    stats_path: Option<PathBuf>,
    user: User,
    ad_cache: VecDeque<Video>,
    organic_views_since_ad: usize,
    ad_store: AdPerformanceStore,
    products: HashMap<String, ProductMeta>,
}

impl FeedSession {
    /// Create a session over organic videos, in the given order.
    pub fn new(videos: Vec<PathBuf>) -> Result<Self, CoreError> {
        if videos.is_empty() {
            return Err(CoreError::Validation(
                "At least one video is required".to_string(),
            ));
        }

        Ok(Self {
            states: videos
                .into_iter()
                .map(|path| VideoState::organic(Video::new(path)))
                .collect(),
            current: 0,
            started_at: None,
            stats_path: None,
            user: User::new(),
            ad_cache: VecDeque::new(),
            organic_views_since_ad: 0,
            ad_store: AdPerformanceStore::in_memory(),
            products: HashMap::new(),
        })
    }

    /// Persist per-video stats to `path`, restoring whatever is already there.
    #[must_use]
    pub fn with_stats_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stats = StatsFile::load(&path);

        for state in &mut self.states {
            if let Some(entry) = stats.videos.get(&state.video.file_name()) {
                state.seconds_watched = entry.seconds_watched;
                state.reaction.heart = entry.heart;
                state.reaction.share = entry.share;
            }
        }
        self.user = User::from_stats(&stats);
        // Restored entries already count towards the history.
        for state in &mut self.states {
            state.context_appended = self.user.history().any(|e| e.path == state.video.path);
        }
        tracing::debug!(
            path = %path.display(),
            restored = stats.videos.len(),
            history = self.user.len(),
            "Loaded user stats"
        );

        self.stats_path = Some(path);
        self
    }

    /// Ads ready to be inserted into the feed, in insertion order.
    #[must_use]
    pub fn with_cached_ads(mut self, ads: Vec<Video>) -> Self {
        self.ad_cache.extend(ads);
        self
    }

    #[must_use]
    pub fn with_ad_store(mut self, store: AdPerformanceStore) -> Self {
        self.ad_store = store;
        self
    }

    /// Product metadata keyed by image file name.
    #[must_use]
    pub fn with_products(mut self, products: HashMap<String, ProductMeta>) -> Self {
        self.products = products;
        self
    }

    /// Start the clock on the first video.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn current(&self) -> &VideoState {
        &self.states[self.current]
    }

    pub const fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[VideoState] {
        &self.states
    }

    pub const fn user(&self) -> &User {
        &self.user
    }

    pub const fn ad_store(&self) -> &AdPerformanceStore {
        &self.ad_store
    }

    pub fn ad_cache_len(&self) -> usize {
        self.ad_cache.len()
    }

    pub const fn organic_views_since_ad(&self) -> usize {
        self.organic_views_since_ad
    }

    /// Watch time of the current video including the uncommitted part.
    pub fn watched_seconds(&self, now: Instant) -> f64 {
        let pending = self
            .started_at
            .map_or(0.0, |started| now.saturating_duration_since(started).as_secs_f64());
        self.current().seconds_watched + pending
    }

    /// Display tick: returns the live watch time of the current video.
    pub fn tick(&mut self, now: Instant) -> f64 {
        self.maybe_append_current_to_user();
        self.watched_seconds(now)
    }

    /// Commit the elapsed watch time of the current video and persist.
    ///
    /// Returns false when nothing was running.
    pub fn snapshot(&mut self, now: Instant) -> bool {
        let Some(started) = self.started_at else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        if elapsed <= 0.0 {
            return false;
        }

        self.states[self.current].seconds_watched += elapsed;
        self.started_at = Some(now);
        self.persist();
        true
    }

    pub fn go_next(&mut self, now: Instant) {
        self.commit_watch_time(now);
        self.current = (self.current + 1) % self.states.len();
        self.started_at = Some(now);

        if self.current().is_ad {
            tracing::debug!(index = self.current, "Moved to ad video");
            return;
        }

        // Only organic views move the ad threshold
        self.organic_views_since_ad += 1;
        tracing::debug!(
            index = self.current,
            organic_views_since_ad = self.organic_views_since_ad,
            ad_cache = self.ad_cache.len(),
            "Moved to video"
        );
        self.maybe_insert_ad_after_current();
    }

    pub fn go_prev(&mut self, now: Instant) {
        self.commit_watch_time(now);
        self.current = (self.current + self.states.len() - 1) % self.states.len();
        self.started_at = Some(now);
    }

    /// Toggle the like flag of the current video and return the new value.
    pub fn toggle_like(&mut self) -> bool {
        let state = &mut self.states[self.current];
        state.reaction.heart = !state.reaction.heart;
        let liked = state.reaction.heart;
        self.after_reaction_change();
        liked
    }

    /// Toggle the share flag of the current video.
    ///
    /// Returns the share intent URL when sharing was turned on.
    pub fn toggle_share(&mut self) -> Option<String> {
        let state = &mut self.states[self.current];
        state.reaction.share = !state.reaction.share;
        let url = state
            .reaction
            .share
            .then(|| share_intent_url(&state.video.stem()));
        self.after_reaction_change();
        url
    }

    /// Product linked to the current video, when it is an ad with known metadata.
    pub fn current_product(&self) -> Option<&ProductMeta> {
        let state = self.current();
        if !state.is_ad {
            return None;
        }
        let basename = state.video.product_path.as_deref()?.file_name()?;
        self.products.get(basename.to_string_lossy().as_ref())
    }

    /// Commit the current video, persist and summarize the session.
    pub fn close(&mut self, now: Instant) -> SessionSummary {
        self.commit_watch_time(now);
        self.persist();
        self.summary()
    }

    pub fn summary(&self) -> SessionSummary {
        let videos = self
            .states
            .iter()
            .map(|state| VideoSummaryRow {
                name: state.video.file_name(),
                is_ad: state.is_ad,
                seconds_watched: state.seconds_watched,
                heart: state.reaction.heart,
                share: state.reaction.share,
            })
            .collect();

        let seen_products: BTreeSet<String> = self
            .states
            .iter()
            .filter(|state| state.is_ad)
            .filter_map(|state| state.video.product_path.as_deref())
            .map(|path| path.display().to_string())
            .collect();

        let ads = seen_products
            .iter()
            .filter_map(|product| {
                let metric = self.ad_store.get(product)?;
                Some(AdSummaryRow {
                    product_name: Path::new(product)
                        .file_name()
                        .map_or_else(|| product.clone(), |n| n.to_string_lossy().into_owned()),
                    impressions: metric.impressions,
                    avg_watch_seconds: metric.avg_watch_seconds(),
                    like_rate: metric.like_rate(),
                    share_rate: metric.share_rate(),
                    engagement_score: self.ad_store.score(product, Objective::Engagement),
                })
            })
            .collect();

        SessionSummary { videos, ads }
    }

    fn commit_watch_time(&mut self, now: Instant) {
        let Some(started) = self.started_at.take() else {
            return;
        };

        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        if elapsed > 0.0 {
            let state = &mut self.states[self.current];
            state.seconds_watched += elapsed;

            // Leaving an ad counts as one impression for its product
            if state.is_ad {
                if let Some(product) = &state.video.product_path {
                    self.ad_store.record_impression(
                        &product.display().to_string(),
                        elapsed,
                        state.reaction.heart,
                        state.reaction.share,
                    );
                }
            }
        }

        self.persist();
        self.maybe_append_current_to_user();
    }

    fn maybe_insert_ad_after_current(&mut self) {
        if self.organic_views_since_ad < AD_INTERVAL {
            return;
        }
        let Some(ad) = self.ad_cache.pop_front() else {
            tracing::debug!("Ad threshold reached but no cached ads are ready");
            return;
        };

        let insert_at = (self.current + 1).min(self.states.len());
        self.states.insert(insert_at, VideoState::ad(ad));
        self.organic_views_since_ad = 0;
        tracing::info!(
            after = self.current,
            total = self.states.len(),
            "Inserted ad into feed"
        );
    }

    fn after_reaction_change(&mut self) {
        let state = &self.states[self.current];
        if state.context_appended {
            let (path, reaction) = (state.video.path.clone(), state.reaction);
            self.user.update_reaction(&path, reaction);
        }
        self.persist();
        self.maybe_append_current_to_user();
    }

    /// Add the current organic video to the user history once per session,
    /// when it was watched long enough or reacted to.
    fn maybe_append_current_to_user(&mut self) {
        let state = &mut self.states[self.current];
        if state.is_ad || state.context_appended {
            return;
        }
        if state.seconds_watched < MIN_SECONDS_FOR_CONTEXT && !state.reaction.engaged() {
            return;
        }

        let caption = state.video.caption().unwrap_or_default();
        self.user.append_video(&state.video, caption, state.reaction);
        state.context_appended = true;
    }

    fn persist(&self) {
        let Some(path) = &self.stats_path else {
            return;
        };

        let mut stats = StatsFile::default();
        for state in &self.states {
            stats.videos.insert(
                state.video.file_name(),
                VideoStats {
                    path: state.video.path.display().to_string(),
                    seconds_watched: state.seconds_watched,
                    heart: state.reaction.heart,
                    share: state.reaction.share,
                },
            );
        }

        if let Err(e) = stats.save(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to persist user stats");
        }
    }
}
