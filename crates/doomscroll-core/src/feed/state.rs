use serde::{Deserialize, Serialize};

use crate::media::Video;

/// Like/share flags for a single video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReaction {
    pub heart: bool,
    pub share: bool,
}

impl UserReaction {
    /// True when the user explicitly engaged with the video.
    pub const fn engaged(self) -> bool {
        self.heart || self.share
    }
}

/// Per-video state tracked by the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoState {
    pub video: Video,
    /// Committed watch time in seconds.
    pub seconds_watched: f64,
    pub reaction: UserReaction,
    pub is_ad: bool,
    /// Whether the video was already added to the user history this session.
    pub context_appended: bool,
}

impl VideoState {
    pub fn organic(video: Video) -> Self {
        Self {
            video,
            seconds_watched: 0.0,
            reaction: UserReaction::default(),
            is_ad: false,
            context_appended: false,
        }
    }

    pub fn ad(video: Video) -> Self {
        Self {
            is_ad: true,
            ..Self::organic(video)
        }
    }
}
