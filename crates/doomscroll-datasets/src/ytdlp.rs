//! `yt-dlp` clip fetcher.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use doomscroll_core::{ClipFetchOutcome, ClipFetcher, ClipRequest};
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::error::PrepareError;

const YT_DLP: &str = "yt-dlp";

/// Video + audio, capped at 720p.
const FORMAT: &str = "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]/best";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Downloads clips by running `yt-dlp --download-sections`.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    program: PathBuf,
    timeout: Duration,
}

impl YtDlpFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

    /// Locate `yt-dlp`, preferring an explicit path.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, PrepareError> {
        let program = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                return Err(PrepareError::Unavailable {
                    tool: YT_DLP.to_string(),
                    message: format!("{} does not exist", path.display()),
                });
            }
            None => which::which(YT_DLP).map_err(|e| PrepareError::Unavailable {
                tool: YT_DLP.to_string(),
                message: format!("{e}. Install it with `pip install yt-dlp` or pass --yt-dlp"),
            })?,
        };
        tracing::debug!(program = %program.display(), "Using yt-dlp");
        Ok(Self::new(program))
    }

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// Command-line arguments for one clip.
pub fn ytdlp_args(request: &ClipRequest) -> Vec<String> {
    vec![
        "-f".to_string(),
        FORMAT.to_string(),
        "--merge-output-format".to_string(),
        "mp4".to_string(),
        "--download-sections".to_string(),
        format!("*{}-{}", request.start_secs, request.end_secs),
        "-o".to_string(),
        request.output.to_string_lossy().into_owned(),
        "--no-playlist".to_string(),
        "--quiet".to_string(),
        "--no-warnings".to_string(),
        "--sleep-requests".to_string(),
        "1".to_string(),
        "--extractor-retries".to_string(),
        "3".to_string(),
        "--user-agent".to_string(),
        USER_AGENT.to_string(),
        request.url.clone(),
    ]
}

#[async_trait]
impl ClipFetcher for YtDlpFetcher {
    async fn fetch(&self, request: &ClipRequest) -> ClipFetchOutcome {
        let mut child = match Command::new(&self.program)
            .args(ytdlp_args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return ClipFetchOutcome::Failed(format!("Failed to spawn: {e}")),
        };

        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf).await;
                buf
            })
        });

        let status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => return ClipFetchOutcome::Failed(e.to_string()),
            Err(_) => {
                let _ = child.kill().await;
                tracing::debug!(url = %request.url, "yt-dlp timed out");
                return ClipFetchOutcome::TimedOut;
            }
        };

        if status.success() {
            return ClipFetchOutcome::Completed;
        }

        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };
        let reason = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map_or_else(|| status.to_string(), str::to_string);
        tracing::debug!(url = %request.url, reason = %reason, "yt-dlp failed");
        ClipFetchOutcome::Failed(reason)
    }
}
