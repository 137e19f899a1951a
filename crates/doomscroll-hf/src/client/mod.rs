//! Hugging Face client for dataset files and rows.

mod files;
mod rows;

use doomscroll_core::HfPortError;
use url::Url;

use crate::config::HfClientConfig;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::hub::HubDownloader;
use crate::models::HfConfig;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default Hugging Face client using the reqwest HTTP backend.
pub type DefaultHfClient = HfClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Hub API, datasets-server and the hf-hub file cache.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultHfClient` for production code.
pub struct HfClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: HfConfig,
    pub(crate) hub: HubDownloader,
}

impl DefaultHfClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &HfClientConfig) -> Result<Self, HfPortError> {
        let internal_config = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(&internal_config).map_err(|e| HfPortError::Other {
            message: format!("Failed to create HTTP client: {e}"),
        })?;
        let hub = HubDownloader::new(&internal_config);
        Ok(Self {
            backend,
            config: internal_config,
            hub,
        })
    }

    fn to_internal_config(config: &HfClientConfig) -> Result<HfConfig, HfPortError> {
        let parse = |value: &str| {
            Url::parse(value).map_err(|e| HfPortError::Other {
                message: format!("Invalid URL '{value}': {e}"),
            })
        };

        Ok(HfConfig {
            hub_url: parse(&config.hub_url)?,
            datasets_server_url: parse(&config.datasets_server_url)?,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            token: config.token.clone(),
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
            cache_dir: config.cache_dir.clone(),
            show_progress: config.show_progress,
        })
    }
}

impl<B: HttpBackend> HfClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) fn with_backend(config: HfConfig, backend: B) -> Self {
        let hub = HubDownloader::new(&config);
        Self {
            backend,
            config,
            hub,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;

    pub fn test_config() -> HfConfig {
        HfConfig::default()
    }

    #[test]
    fn test_default_client_creation() {
        let config = HfClientConfig::new();
        assert!(DefaultHfClient::new(&config).is_ok());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = HfClientConfig::new().with_datasets_server_url("not a url");
        assert!(matches!(
            DefaultHfClient::new(&config),
            Err(HfPortError::Other { .. })
        ));
    }

    #[test]
    fn test_client_with_fake_backend() {
        let client = HfClient::with_backend(test_config(), FakeBackend::new());
        assert_eq!(client.config.max_retries, 3);
    }
}
