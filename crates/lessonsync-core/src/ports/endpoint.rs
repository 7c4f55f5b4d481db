//! Port for the lesson content backend.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::event_emitter::SyncEventEmitterPort;
use crate::api::{TopicContentRequest, TopicContentResponse, TopicListRequest, TopicListResponse};

/// Errors from endpoint port operations.
///
/// These are whole-call failures. Per-structure failures inside a content
/// batch are reported as `DownloadResult` values instead.
#[derive(Debug, Error)]
pub enum EndpointPortError {
    /// The endpoint rejected the API secret.
    #[error("Authentication failed for {endpoint}")]
    Unauthorized {
        /// The endpoint that rejected the request
        endpoint: String,
    },

    /// The endpoint does not exist at the configured base URL.
    #[error("Endpoint not found: {endpoint}")]
    NotFound {
        /// The endpoint that was requested
        endpoint: String,
    },

    /// API rate limit exceeded.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The response could not be decoded or violates the protocol.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for endpoint port operations.
pub type EndpointPortResult<T> = Result<T, EndpointPortError>;

/// Port for fetching the content catalog and content structures.
#[async_trait]
pub trait LessonEndpointPort: Send + Sync {
    /// Fetch the catalog of downloadable and upcoming topics.
    async fn fetch_topic_list(
        &self,
        request: &TopicListRequest,
        emitter: Arc<dyn SyncEventEmitterPort>,
    ) -> EndpointPortResult<TopicListResponse>;

    /// Fetch every identifier in `request` as one batch.
    ///
    /// The response holds exactly one result per requested identifier, in no
    /// particular order.
    async fn fetch_topic_content(
        &self,
        request: &TopicContentRequest,
        emitter: Arc<dyn SyncEventEmitterPort>,
    ) -> EndpointPortResult<TopicContentResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn LessonEndpointPort>) {}

    #[test]
    fn test_error_display() {
        let err = EndpointPortError::Unauthorized {
            endpoint: "topic_list".to_string(),
        };
        assert!(err.to_string().contains("topic_list"));
    }
}
