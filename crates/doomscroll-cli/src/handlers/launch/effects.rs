//! Side effects of the feed: opening links and playing videos.

use std::path::Path;
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::error::CliError;

/// Things the feed asks the outside world to do.
pub trait FeedEffects {
    /// Open a link in the browser.
    fn open_url(&mut self, url: &str);

    /// A new video became current.
    fn show_video(&mut self, video: &Path);

    /// The feed is closing.
    fn stop(&mut self) {}
}

/// Browser opener plus an optional external player.
pub struct SystemEffects {
    player: Option<(String, Vec<String>)>,
    playing: Option<Child>,
}

impl SystemEffects {
    /// `player` is a command line such as `"mpv --loop"`; the video path is
    /// appended as the last argument.
    pub fn new(player: Option<&str>) -> Result<Self, CliError> {
        let player = match player {
            Some(raw) => {
                let mut parts = raw.split_whitespace().map(str::to_string);
                let program = parts
                    .next()
                    .ok_or_else(|| CliError::Arguments("--player cannot be empty".to_string()))?;
                Some((program, parts.collect()))
            }
            None => None,
        };
        Ok(Self {
            player,
            playing: None,
        })
    }

    fn kill_player(&mut self) {
        if let Some(mut child) = self.playing.take() {
            if let Err(e) = child.start_kill() {
                tracing::debug!(error = %e, "Player already exited");
            }
        }
    }
}

impl FeedEffects for SystemEffects {
    fn open_url(&mut self, url: &str) {
        let (program, args) = url_opener();
        let spawned = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            tracing::warn!(program, error = %e, "Failed to open browser");
            println!("Open this link: {url}\r");
        }
    }

    fn show_video(&mut self, video: &Path) {
        self.kill_player();
        let Some((program, args)) = &self.player else {
            return;
        };

        match Command::new(program)
            .args(args)
            .arg(video)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => self.playing = Some(child),
            Err(e) => {
                tracing::warn!(player = %program, video = %video.display(), error = %e, "Failed to start player");
            }
        }
    }

    fn stop(&mut self) {
        self.kill_player();
    }
}

#[cfg(target_os = "macos")]
const fn url_opener() -> (&'static str, &'static [&'static str]) {
    ("open", &[])
}

#[cfg(target_os = "windows")]
const fn url_opener() -> (&'static str, &'static [&'static str]) {
    ("cmd", &["/C", "start", ""])
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const fn url_opener() -> (&'static str, &'static [&'static str]) {
    ("xdg-open", &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_command_is_split() {
        let effects = SystemEffects::new(Some("mpv --loop --really-quiet")).unwrap();
        let (program, args) = effects.player.unwrap();
        assert_eq!(program, "mpv");
        assert_eq!(args, vec!["--loop", "--really-quiet"]);
    }

    #[test]
    fn test_blank_player_is_rejected() {
        let err = SystemEffects::new(Some("   ")).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_missing_player_does_not_fail_the_feed() {
        let mut effects = SystemEffects::new(Some("/definitely/not/a/player")).unwrap();
        effects.show_video(Path::new("video.mp4"));
        assert!(effects.playing.is_none());
        effects.stop();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_navigation_replaces_the_player() {
        let mut effects = SystemEffects::new(Some("sleep")).unwrap();
        effects.show_video(Path::new("30"));
        assert!(effects.playing.is_some());
        effects.show_video(Path::new("30"));
        assert!(effects.playing.is_some());
        effects.stop();
        assert!(effects.playing.is_none());
    }
}
