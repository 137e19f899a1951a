//! Bounded history of what the viewer watched and how they reacted.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::state::UserReaction;
use super::stats::StatsFile;
use crate::media::Video;

/// Maximum number of history entries kept per user.
pub const USER_HISTORY_LIMIT: usize = 50;

/// Watch time after which an organic video counts towards the user context.
pub const MIN_SECONDS_FOR_CONTEXT: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: PathBuf,
    pub caption: String,
    pub reaction: UserReaction,
}

/// The viewer's recent history, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    history: VecDeque<HistoryEntry>,
}

impl User {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a user from persisted stats.
    ///
    /// Videos qualify the same way they do during a session (watched long
    /// enough, liked or shared). Entries whose caption sidecar is gone are
    /// skipped.
    pub fn from_stats(stats: &StatsFile) -> Self {
        let mut user = Self::new();
        for record in stats.videos.values() {
            let reaction = UserReaction {
                heart: record.heart,
                share: record.share,
            };
            if record.seconds_watched < MIN_SECONDS_FOR_CONTEXT && !reaction.engaged() {
                continue;
            }
            let video = Video::new(&record.path);
            let Some(caption) = video.caption() else {
                tracing::debug!(path = %record.path, "Skipping history entry without caption");
                continue;
            };
            user.append_video(&video, caption, reaction);
        }
        user
    }

    /// Append a video, evicting the oldest entry once the limit is reached.
    pub fn append_video(&mut self, video: &Video, caption: String, reaction: UserReaction) {
        if self.history.len() == USER_HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            path: video.path.clone(),
            caption,
            reaction,
        });
    }

    /// Sync the reaction of the most recent entry for `path`.
    pub fn update_reaction(&mut self, path: &Path, reaction: UserReaction) -> bool {
        match self.history.iter_mut().rev().find(|e| e.path == path) {
            Some(entry) => {
                entry.reaction = reaction;
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// One `Context: <caption>, Heart: <bool>, Share: <bool>` line per entry.
    pub fn context(&self) -> String {
        self.history
            .iter()
            .map(|e| {
                format!(
                    "Context: {}, Heart: {}, Share: {}",
                    e.caption,
                    python_bool(e.reaction.heart),
                    python_bool(e.reaction.share)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// The context lines feed downstream prompt templates that expect `True`/`False`.
const fn python_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::stats::VideoStats;
    use std::fs;
    use tempfile::tempdir;

    const LIKED: UserReaction = UserReaction {
        heart: true,
        share: false,
    };

    #[test]
    fn test_history_is_bounded() {
        let mut user = User::new();
        for i in 0..(USER_HISTORY_LIMIT + 5) {
            let video = Video::new(format!("/v/{i}.mp4"));
            user.append_video(&video, format!("caption {i}"), UserReaction::default());
        }
        assert_eq!(user.len(), USER_HISTORY_LIMIT);
        assert_eq!(
            user.history().next().map(|e| e.caption.as_str()),
            Some("caption 5")
        );
    }

    #[test]
    fn test_context_lines() {
        let mut user = User::new();
        user.append_video(&Video::new("/v/a.mp4"), "a cat".into(), LIKED);
        user.append_video(&Video::new("/v/b.mp4"), "a dog".into(), UserReaction::default());
        assert_eq!(
            user.context(),
            "Context: a cat, Heart: True, Share: False\nContext: a dog, Heart: False, Share: False"
        );
    }

    #[test]
    fn test_update_reaction_targets_latest_entry() {
        let mut user = User::new();
        let video = Video::new("/v/a.mp4");
        user.append_video(&video, "a".into(), UserReaction::default());
        user.append_video(&video, "a".into(), UserReaction::default());

        assert!(user.update_reaction(&video.path, LIKED));
        let reactions: Vec<_> = user.history().map(|e| e.reaction).collect();
        assert_eq!(reactions, vec![UserReaction::default(), LIKED]);

        assert!(!user.update_reaction(Path::new("/v/missing.mp4"), LIKED));
    }

    #[test]
    fn test_from_stats_applies_qualification_rules() {
        let temp = tempdir().unwrap();
        let mut stats = StatsFile::default();
        for (name, seconds, heart) in [("long", 5.0, false), ("short", 1.0, false), ("liked", 0.0, true)] {
            let video = temp.path().join(format!("{name}.mp4"));
            fs::write(&video, "").unwrap();
            fs::write(temp.path().join(format!("{name}.txt")), name).unwrap();
            stats.videos.insert(
                format!("{name}.mp4"),
                VideoStats {
                    path: video.display().to_string(),
                    seconds_watched: seconds,
                    heart,
                    share: false,
                },
            );
        }
        stats.videos.insert(
            "gone.mp4".into(),
            VideoStats {
                path: temp.path().join("gone.mp4").display().to_string(),
                seconds_watched: 60.0,
                ..VideoStats::default()
            },
        );

        let user = User::from_stats(&stats);
        let captions: Vec<_> = user.history().map(|e| e.caption.clone()).collect();
        assert_eq!(captions, vec!["liked", "long"]);
    }
}
