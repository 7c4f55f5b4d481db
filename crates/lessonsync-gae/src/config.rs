//! Public configuration for the lesson backend client.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for [`crate::DefaultGaeClient`] and [`crate::DefaultGcsImageStore`].
///
/// # Example
///
/// ```
/// use lessonsync_gae::GaeClientConfig;
/// use std::time::Duration;
///
/// let config = GaeClientConfig::new()
///     .with_base_url("https://content.example.org")
///     .with_api_secret("secret")
///     .with_timeout(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct GaeClientConfig {
    /// Base URL of the content backend
    pub(crate) base_url: String,
    /// Base URL of the asset storage service
    pub(crate) gcs_base_url: String,
    /// Bucket holding lesson assets
    pub(crate) gcs_bucket: String,
    /// Secret sent with every backend request
    pub(crate) api_secret: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
    /// Largest content payload the backend may return, 0 for no limit
    pub(crate) max_payload_size_bytes: u64,
    /// Where raw requests and responses are recorded, if anywhere
    pub(crate) api_debug_dir: Option<PathBuf>,
}

impl Default for GaeClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://oppia.org".to_string(),
            gcs_base_url: "https://storage.googleapis.com".to_string(),
            gcs_bucket: "oppiaserver-resources".to_string(),
            api_secret: String::new(),
            timeout: Duration::from_secs(300),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            max_payload_size_bytes: 0,
            api_debug_dir: None,
        }
    }
}

impl GaeClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_gcs_base_url(mut self, url: impl Into<String>) -> Self {
        self.gcs_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_gcs_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.gcs_bucket = bucket.into();
        self
    }

    #[must_use]
    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = secret.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 5 minutes; content batches can be large.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
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

    #[must_use]
    pub const fn with_max_payload_size_bytes(mut self, bytes: u64) -> Self {
        self.max_payload_size_bytes = bytes;
        self
    }

    /// Record every request and raw response under `dir`.
    #[must_use]
    pub fn with_api_debug_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.api_debug_dir = dir;
        self
    }

    /// Largest content payload requested from the backend.
    pub const fn max_payload_size_bytes(&self) -> u64 {
        self.max_payload_size_bytes
    }
}
