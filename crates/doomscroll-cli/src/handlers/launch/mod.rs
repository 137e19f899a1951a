//! Launch command handler: the terminal scroll feed.
//!
//! The feed loop owns the [`FeedSession`] and multiplexes three sources:
//! keyboard commands from the input thread, a 5 s watch-time snapshot and a
//! 1 s display tick.

mod effects;
mod input;
mod render;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use doomscroll_core::{
    AdPerformanceStore, DatasetKind, FeedSession, SUPPORTED_VIDEO_EXTENSIONS, SessionSummary,
    ad_metrics_path, collect_cached_ads, collect_videos, dataset_dir, generated_ads_dir,
    load_product_metadata, normalize_user_path, products_config_path, user_stats_path,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

pub use effects::{FeedEffects, SystemEffects};
pub use input::{FeedCommand, KEY_HELP, spawn_reader};
pub use render::{FeedView, header_lines, status_line};

use crate::bootstrap::CliConfig;
use crate::commands::LaunchArgs;
use crate::error::CliError;

const SNAPSHOT_PERIOD: Duration = Duration::from_secs(5);
const DISPLAY_PERIOD: Duration = Duration::from_secs(1);

/// Execute `doomscroll launch`.
pub async fn execute(config: &CliConfig, args: LaunchArgs) -> Result<(), CliError> {
    let video_dir = resolve_video_dir(config, args.video_dir.as_deref())?;
    let mut session = build_session(config, &args, &video_dir)?;
    let mut effects = SystemEffects::new(args.player.as_deref())?;
    let view = FeedView::new(args.profile());

    tracing::info!(
        video_dir = %video_dir.display(),
        videos = session.len(),
        cached_ads = session.ad_cache_len(),
        "Starting feed"
    );
    let input = spawn_reader()?;
    let summary = run_feed(&mut session, input, &mut effects, &view).await;

    let user = session.user();
    if !user.is_empty() {
        tracing::debug!(entries = user.len(), context = %user.context(), "User context");
    }

    println!();
    println!("{summary}");
    Ok(())
}

/// Expand and canonicalize the video directory.
///
/// A missing path or a file is a usage error.
pub fn resolve_video_dir(config: &CliConfig, raw: Option<&str>) -> Result<PathBuf, CliError> {
    let requested = match raw {
        Some(raw) => normalize_user_path(raw).map_err(|e| CliError::Arguments(e.to_string()))?,
        None => dataset_dir(&config.assets_root, DatasetKind::Panda70m),
    };

    let canonical = requested.canonicalize().map_err(|e| {
        CliError::Arguments(format!(
            "Video directory {} is not accessible: {e}",
            requested.display()
        ))
    })?;
    if !canonical.is_dir() {
        return Err(CliError::Arguments(format!(
            "{} is not a directory",
            canonical.display()
        )));
    }
    Ok(canonical)
}

/// Collect videos and restore persisted state.
pub fn build_session(
    config: &CliConfig,
    args: &LaunchArgs,
    video_dir: &Path,
) -> Result<FeedSession, CliError> {
    let videos = collect_videos(video_dir)?;
    if videos.is_empty() {
        return Err(CliError::Core(format!(
            "No captioned videos found in {} (supported extensions: {})",
            video_dir.display(),
            SUPPORTED_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let root = &config.assets_root;
    let stats_path = match &args.stats_path {
        Some(raw) => normalize_user_path(raw)?,
        None => user_stats_path(root),
    };

    Ok(FeedSession::new(videos)?
        .with_stats_path(stats_path)
        .with_products(load_product_metadata(&products_config_path(root)))
        .with_ad_store(AdPerformanceStore::load(&ad_metrics_path(root)))
        .with_cached_ads(collect_cached_ads(&generated_ads_dir(root))))
}

enum Flow {
    Stay,
    Moved,
    Quit,
}

/// Run the feed until `Quit` or the input channel closes.
pub async fn run_feed<E: FeedEffects>(
    session: &mut FeedSession,
    mut input: mpsc::Receiver<FeedCommand>,
    effects: &mut E,
    view: &FeedView,
) -> SessionSummary {
    session.start(Instant::now());
    view.message(KEY_HELP);
    view.header(session);
    effects.show_video(&session.current().video.path);

    let mut snapshot = tokio::time::interval_at(
        tokio::time::Instant::now() + SNAPSHOT_PERIOD,
        SNAPSHOT_PERIOD,
    );
    let mut display = tokio::time::interval(DISPLAY_PERIOD);
    display.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            command = input.recv() => {
                let Some(command) = command else {
                    break;
                };
                let now = Instant::now();
                match apply(session, command, effects, view, now) {
                    Flow::Quit => break,
                    Flow::Moved => {
                        view.header(session);
                        effects.show_video(&session.current().video.path);
                    }
                    Flow::Stay => {}
                }
                view.status(session, session.watched_seconds(now));
            }
            _ = snapshot.tick() => {
                session.snapshot(Instant::now());
            }
            _ = display.tick() => {
                let seconds = session.tick(Instant::now());
                view.status(session, seconds);
            }
        }
    }

    effects.stop();
    session.close(Instant::now())
}

fn apply<E: FeedEffects>(
    session: &mut FeedSession,
    command: FeedCommand,
    effects: &mut E,
    view: &FeedView,
    now: Instant,
) -> Flow {
    match command {
        FeedCommand::Next => {
            session.go_next(now);
            Flow::Moved
        }
        FeedCommand::Prev => {
            session.go_prev(now);
            Flow::Moved
        }
        FeedCommand::Like => {
            let liked = session.toggle_like();
            tracing::debug!(liked, video = %session.current().video.file_name(), "Toggled like");
            Flow::Stay
        }
        FeedCommand::Share => {
            if let Some(url) = session.toggle_share() {
                effects.open_url(&url);
            }
            Flow::Stay
        }
        FeedCommand::OpenProduct => {
            match session.current_product().map(|p| p.url.clone()) {
                Some(url) => effects.open_url(&url),
                None => view.message("No product linked to this video"),
            }
            Flow::Stay
        }
        FeedCommand::Quit => Flow::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingEffects {
        opened: Vec<String>,
        shown: Vec<PathBuf>,
        stopped: bool,
    }

    impl FeedEffects for RecordingEffects {
        fn open_url(&mut self, url: &str) {
            self.opened.push(url.to_string());
        }

        fn show_video(&mut self, video: &Path) {
            self.shown.push(video.to_path_buf());
        }

        fn stop(&mut self) {
            self.stopped = true;
        }
    }

    fn write_video(dir: &Path, stem: &str) -> PathBuf {
        let path = dir.join(format!("{stem}.mp4"));
        fs::write(&path, b"").unwrap();
        fs::write(dir.join(format!("{stem}.txt")), format!("caption of {stem}")).unwrap();
        path
    }

    async fn feed(
        session: &mut FeedSession,
        commands: &[FeedCommand],
    ) -> (RecordingEffects, SessionSummary) {
        let (tx, rx) = mpsc::channel(16);
        for command in commands {
            tx.send(*command).await.unwrap();
        }
        drop(tx);

        let mut effects = RecordingEffects::default();
        let summary = run_feed(session, rx, &mut effects, &FeedView::hidden()).await;
        (effects, summary)
    }

    #[tokio::test]
    async fn test_navigation_wraps_and_shows_each_video() {
        let temp = tempdir().unwrap();
        let a = write_video(temp.path(), "a");
        let b = write_video(temp.path(), "b");
        let mut session = FeedSession::new(vec![a.clone(), b.clone()]).unwrap();

        let (effects, summary) = feed(
            &mut session,
            &[FeedCommand::Next, FeedCommand::Next, FeedCommand::Prev],
        )
        .await;

        assert_eq!(effects.shown, vec![a.clone(), b.clone(), a, b]);
        assert!(effects.stopped);
        assert_eq!(summary.videos.len(), 2);
    }

    #[tokio::test]
    async fn test_share_opens_intent_and_like_is_recorded() {
        let temp = tempdir().unwrap();
        let a = write_video(temp.path(), "video7020");
        let mut session = FeedSession::new(vec![a]).unwrap();

        let (effects, summary) =
            feed(&mut session, &[FeedCommand::Like, FeedCommand::Share, FeedCommand::Quit]).await;

        assert_eq!(effects.opened.len(), 1);
        assert!(effects.opened[0].starts_with("https://twitter.com/intent/tweet?text="));
        assert!(summary.videos[0].heart);
        assert!(summary.videos[0].share);
    }

    #[tokio::test]
    async fn test_liked_video_enters_user_context() {
        let temp = tempdir().unwrap();
        let a = write_video(temp.path(), "a");
        let b = write_video(temp.path(), "b");
        let mut session = FeedSession::new(vec![a, b]).unwrap();

        let _ = feed(&mut session, &[FeedCommand::Like, FeedCommand::Next]).await;

        assert_eq!(
            session.user().context(),
            "Context: caption of a, Heart: True, Share: False"
        );
    }

    #[tokio::test]
    async fn test_unsharing_opens_nothing() {
        let temp = tempdir().unwrap();
        let mut session = FeedSession::new(vec![write_video(temp.path(), "a")]).unwrap();

        let (effects, summary) =
            feed(&mut session, &[FeedCommand::Share, FeedCommand::Share]).await;

        assert_eq!(effects.opened.len(), 1);
        assert!(!summary.videos[0].share);
    }

    #[tokio::test]
    async fn test_open_product_without_ad_does_nothing() {
        let temp = tempdir().unwrap();
        let mut session = FeedSession::new(vec![write_video(temp.path(), "a")]).unwrap();

        let (effects, _) = feed(&mut session, &[FeedCommand::OpenProduct]).await;
        assert!(effects.opened.is_empty());
    }

    #[tokio::test]
    async fn test_quit_ignores_later_commands() {
        let temp = tempdir().unwrap();
        let mut session = FeedSession::new(vec![
            write_video(temp.path(), "a"),
            write_video(temp.path(), "b"),
        ])
        .unwrap();

        let (effects, _) = feed(&mut session, &[FeedCommand::Quit, FeedCommand::Next]).await;
        assert_eq!(effects.shown.len(), 1);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_missing_video_dir_is_usage_error() {
        let temp = tempdir().unwrap();
        let config = CliConfig::with_assets_root(temp.path());
        let missing = temp.path().join("nope");

        let err = resolve_video_dir(&config, Some(&missing.to_string_lossy())).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_file_is_not_a_video_dir() {
        let temp = tempdir().unwrap();
        let file = write_video(temp.path(), "a");
        let config = CliConfig::with_assets_root(temp.path());

        let err = resolve_video_dir(&config, Some(&file.to_string_lossy())).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_default_video_dir_is_panda70m() {
        let temp = tempdir().unwrap();
        let panda = temp.path().join("videos/panda70m");
        fs::create_dir_all(&panda).unwrap();
        let config = CliConfig::with_assets_root(temp.path());

        let resolved = resolve_video_dir(&config, None).unwrap();
        assert_eq!(resolved, panda.canonicalize().unwrap());
    }

    #[test]
    fn test_empty_dir_lists_supported_extensions() {
        let temp = tempdir().unwrap();
        let config = CliConfig::with_assets_root(temp.path());
        let args = LaunchArgs {
            video_dir: None,
            x_handle: "zhang_yunzhi".to_string(),
            disable_x_profile: false,
            player: None,
            stats_path: None,
        };

        let err = build_session(&config, &args, temp.path()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains(".mkv"));
    }

    #[test]
    fn test_session_restores_persisted_stats() {
        let temp = tempdir().unwrap();
        let videos = temp.path().join("videos");
        fs::create_dir_all(&videos).unwrap();
        write_video(&videos, "a");
        let stats = temp.path().join("user.json");
        fs::write(
            &stats,
            r#"{"version": 1, "videos": {"a.mp4": {"path": "a.mp4", "seconds_watched": 7.5, "heart": true, "share": false}}}"#,
        )
        .unwrap();

        let config = CliConfig::with_assets_root(temp.path());
        let args = LaunchArgs {
            video_dir: None,
            x_handle: "h".to_string(),
            disable_x_profile: true,
            player: None,
            stats_path: Some(stats.to_string_lossy().into_owned()),
        };

        let session = build_session(&config, &args, &videos).unwrap();
        assert!(session.current().reaction.heart);
        assert!((session.current().seconds_watched - 7.5).abs() < f64::EPSILON);
    }
}
