//! Public configuration for the Hugging Face client.
//!
//! This module provides a stable public API for configuring the HF client.
//! The internal config is derived from this.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Hugging Face client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use doomscroll_hf::HfClientConfig;
/// use std::time::Duration;
///
/// let config = HfClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct HfClientConfig {
    /// Base URL of the Hub (API and file resolution)
    pub(crate) hub_url: String,
    /// Base URL of datasets-server (splits and rows)
    pub(crate) datasets_server_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Optional authentication token for gated datasets
    pub(crate) token: Option<String>,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
    /// Cache directory for downloaded files (hf-hub default when unset)
    pub(crate) cache_dir: Option<PathBuf>,
    /// Show hf-hub download progress bars
    pub(crate) show_progress: bool,
}

impl Default for HfClientConfig {
    fn default() -> Self {
        Self {
            hub_url: "https://huggingface.co".to_string(),
            datasets_server_url: "https://datasets-server.huggingface.co".to_string(),
            user_agent: concat!("doomscroll-hf/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            token: None,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            cache_dir: None,
            show_progress: true,
        }
    }
}

impl HfClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Hub base URL.
    ///
    /// Defaults to `https://huggingface.co`.
    #[must_use]
    pub fn with_hub_url(mut self, url: impl Into<String>) -> Self {
        self.hub_url = url.into();
        self
    }

    /// Set the datasets-server base URL.
    ///
    /// Defaults to `https://datasets-server.huggingface.co`.
    #[must_use]
    pub fn with_datasets_server_url(mut self, url: impl Into<String>) -> Self {
        self.datasets_server_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set an authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional authentication token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Download files into `dir` instead of the default Hub cache.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Enable or disable hf-hub's own download progress bars.
    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}
