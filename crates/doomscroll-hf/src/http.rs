//! HTTP backend abstraction for Hub and datasets-server requests.
//!
//! The production implementation uses reqwest with automatic retry for
//! transient errors; tests inject a canned-response backend.

use crate::error::{HfError, HfResult};
use crate::models::HfConfig;
use crate::url::dataset_id_from_url;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch JSON from URLs.
///
/// This is an implementation detail - external code should use the
/// `HfDatasetPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HfResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HfConfig) -> HfResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
            auth_token: config.token.clone(),
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some(ref token) = self.auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> HfResult<reqwest::Response> {
        let mut last_error: Option<HfError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                tracing::debug!(%url, attempt, ?delay, "Retrying HuggingFace request");
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(HfError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    if status.as_u16() == 404 {
                        if let Some(dataset_id) = dataset_id_from_url(url) {
                            return Err(HfError::DatasetNotFound { dataset_id });
                        }
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(HfError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HfError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HfResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = HfConfig::default();
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.max_retries, 3);
        assert_eq!(backend.retry_base_delay_ms, 500);
        assert!(backend.auth_token.is_none());
    }

    #[test]
    fn test_reqwest_backend_with_token() {
        let config = HfConfig {
            token: Some("test_token".to_string()),
            ..Default::default()
        };
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.auth_token, Some("test_token".to_string()));
    }

    mod fake_backend_tests {
        use super::super::testing::*;
        use super::*;
        use serde_json::json;

        #[tokio::test]
        async fn test_fake_backend_returns_canned_response() {
            let backend =
                FakeBackend::new().with_json("splits", json!({"splits": [], "pending": []}));

            let url = Url::parse("https://example.com/splits?dataset=a%2Fb").unwrap();
            let result: serde_json::Value = backend.get_json(&url).await.unwrap();

            assert_eq!(result["splits"], json!([]));
            assert_eq!(backend.requests().len(), 1);
        }

        #[tokio::test]
        async fn test_fake_backend_maps_404_to_dataset_not_found() {
            let backend = FakeBackend::new();
            let url = Url::parse("https://example.com/rows?dataset=a%2Fb").unwrap();

            let result: HfResult<serde_json::Value> = backend.get_json(&url).await;
            assert!(matches!(
                result,
                Err(HfError::DatasetNotFound { dataset_id }) if dataset_id == "a/b"
            ));
        }

        #[tokio::test]
        async fn test_fake_backend_status() {
            let backend = FakeBackend::new().with_status("rows", 503);
            let url = Url::parse("https://example.com/rows").unwrap();

            let result: HfResult<serde_json::Value> = backend.get_json(&url).await;
            assert!(matches!(
                result,
                Err(HfError::ApiRequestFailed { status: 503, .. })
            ));
        }
    }
}
