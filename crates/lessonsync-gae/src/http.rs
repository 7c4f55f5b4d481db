//! HTTP backend abstraction.
//!
//! The production implementation uses reqwest with automatic retry logic for
//! transient errors; tests inject [`testing::FakeBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};
use url::Url;

use crate::config::GaeClientConfig;
use crate::error::{GaeError, GaeResult};

/// Header carrying the API secret on backend requests.
pub const API_KEY_HEADER: &str = "X-ApiKey";

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends used by the content client and the image store.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a JSON body and return the raw response body.
    async fn post_json(&self, url: &Url, body: &str) -> GaeResult<String>;

    /// GET raw bytes, or `None` when the server has no such resource.
    async fn get_bytes(&self, url: &Url) -> GaeResult<Option<Vec<u8>>>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Server errors (5xx) and network errors are retried with exponential
/// backoff; client errors (4xx) fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    api_secret: String,
}

impl ReqwestBackend {
    pub fn new(config: &GaeClientConfig) -> GaeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("lessonsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GaeError::ClientSetup {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
            api_secret: config.api_secret.clone(),
        })
    }

    /// Send a request built by `build` with automatic retry for transient errors.
    async fn send_with_retry<F>(&self, url: &Url, build: F) -> GaeResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut last_error: Option<GaeError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                debug!(url = %url, attempt, delay_ms = delay.as_millis(), "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        warn!(url = %url, status = status.as_u16(), "Server error, will retry");
                        last_error = Some(GaeError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(GaeError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        warn!(url = %url, error = %e, "Network error, will retry");
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GaeError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, url: &Url, body: &str) -> GaeResult<String> {
        let response = self
            .send_with_retry(url, || {
                self.client
                    .post(url.as_str())
                    .header(API_KEY_HEADER, &self.api_secret)
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.to_string())
            })
            .await?;
        Ok(response.text().await?)
    }

    async fn get_bytes(&self, url: &Url) -> GaeResult<Option<Vec<u8>>> {
        match self.send_with_retry(url, || self.client.get(url.as_str())).await {
            Ok(response) => Ok(Some(response.bytes().await?.to_vec())),
            Err(GaeError::ApiRequestFailed { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
