//! Port for fetching a time section of a remote video.

use std::path::PathBuf;

use async_trait::async_trait;

/// A request to fetch one clip into `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    /// Source page URL (e.g. a YouTube watch URL).
    pub url: String,
    /// Section start, in seconds.
    pub start_secs: f64,
    /// Section end, in seconds.
    pub end_secs: f64,
    /// Destination video file.
    pub output: PathBuf,
}

/// How a fetch attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipFetchOutcome {
    /// The fetcher reported success.
    Completed,
    /// The fetcher ran but failed (non-zero exit, missing output).
    Failed(String),
    /// The fetcher exceeded its time budget and was stopped.
    TimedOut,
}

/// Fetches a clip to disk. Implementations must not panic on remote failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipFetcher: Send + Sync {
    /// Fetch the requested clip.
    async fn fetch(&self, request: &ClipRequest) -> ClipFetchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_is_usable_as_trait_object() {
        let mut mock = MockClipFetcher::new();
        mock.expect_fetch()
            .returning(|_| ClipFetchOutcome::TimedOut);

        let fetcher: Box<dyn ClipFetcher> = Box::new(mock);
        let request = ClipRequest {
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            start_secs: 1.0,
            end_secs: 2.5,
            output: PathBuf::from("abc_0.mp4"),
        };
        assert_eq!(fetcher.fetch(&request).await, ClipFetchOutcome::TimedOut);
    }
}
