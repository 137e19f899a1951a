//! The launcher's scroll feed.
//!
//! Everything here is UI-agnostic: the CLI drives a [`FeedSession`] with
//! navigation and reaction events and renders whatever it reports back.

mod ads;
mod cached_ads;
mod products;
mod session;
mod state;
mod stats;
mod summary;
mod user;

pub use ads::{AdPerformance, AdPerformanceStore, Objective, UnknownObjective};
pub use cached_ads::collect_cached_ads;
pub use products::{ProductMeta, load_product_description, load_product_metadata};
pub use session::{AD_INTERVAL, FeedSession, share_intent_url};
pub use state::{UserReaction, VideoState};
pub use stats::{STATS_VERSION, StatsFile, VideoStats};
pub use summary::{AdSummaryRow, SessionSummary, VideoSummaryRow};
pub use user::{HistoryEntry, MIN_SECONDS_FOR_CONTEXT, USER_HISTORY_LIMIT, User};
