//! Port trait implementations for the backend client and the image store.
//!
//! Internal [`GaeError`]s are mapped to core port errors here.

use std::sync::Arc;

use async_trait::async_trait;
use lessonsync_core::api::{
    TopicContentRequest, TopicContentResponse, TopicListRequest, TopicListResponse,
};
use lessonsync_core::ports::{
    EndpointPortError, EndpointPortResult, ImageStoreError, ImageStorePort, ImageStoreResult,
    LessonEndpointPort, SyncEventEmitterPort,
};
use lessonsync_core::structure::ImageLocation;
use lessonsync_core::SyncPhase;
use tracing::{debug, warn};

use crate::client::GaeClient;
use crate::error::GaeError;
use crate::http::HttpBackend;
use crate::image_store::GcsImageStore;
use crate::endpoints::{TOPIC_CONTENT_ENDPOINT, TOPIC_LIST_ENDPOINT, build_image_url};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `GaeError` to core `EndpointPortError`.
fn map_error(endpoint: &str, err: GaeError) -> EndpointPortError {
    match err {
        GaeError::ApiRequestFailed { status, url } => match status {
            404 => EndpointPortError::NotFound {
                endpoint: endpoint.to_string(),
            },
            401 | 403 => EndpointPortError::Unauthorized {
                endpoint: endpoint.to_string(),
            },
            429 => EndpointPortError::RateLimited,
            _ => EndpointPortError::Network {
                message: format!("API request failed with status {status}: {url}"),
            },
        },
        GaeError::InvalidResponse { message } => EndpointPortError::InvalidResponse { message },
        GaeError::Json(e) => EndpointPortError::InvalidResponse {
            message: e.to_string(),
        },
        GaeError::Network(e) => EndpointPortError::Network {
            message: e.to_string(),
        },
        GaeError::InvalidUrl(e) => EndpointPortError::Configuration {
            message: e.to_string(),
        },
        e @ (GaeError::ClientSetup { .. } | GaeError::DebugWrite { .. }) => {
            EndpointPortError::Configuration {
                message: e.to_string(),
            }
        }
    }
}

fn map_image_error(location: &ImageLocation, err: GaeError) -> ImageStoreError {
    match err {
        GaeError::ApiRequestFailed { status, .. } => ImageStoreError::UnexpectedStatus {
            filename: location.filename.clone(),
            status,
        },
        other => ImageStoreError::Network {
            filename: location.filename.clone(),
            message: other.to_string(),
        },
    }
}

// ============================================================================
// LessonEndpointPort
// ============================================================================

#[async_trait]
impl<B: HttpBackend> LessonEndpointPort for GaeClient<B> {
    async fn fetch_topic_list(
        &self,
        request: &TopicListRequest,
        emitter: Arc<dyn SyncEventEmitterPort>,
    ) -> EndpointPortResult<TopicListResponse> {
        let response: TopicListResponse = self
            .call(TOPIC_LIST_ENDPOINT, request, SyncPhase::TopicList, &emitter)
            .await
            .map_err(|e| map_error(TOPIC_LIST_ENDPOINT, e))?;
        if response.proto_version != request.proto_version {
            warn!(
                expected = request.proto_version.version,
                actual = response.proto_version.version,
                "Topic list response uses a different protocol version"
            );
        }
        Ok(response)
    }

    async fn fetch_topic_content(
        &self,
        request: &TopicContentRequest,
        emitter: Arc<dyn SyncEventEmitterPort>,
    ) -> EndpointPortResult<TopicContentResponse> {
        let response: TopicContentResponse = self
            .call(TOPIC_CONTENT_ENDPOINT, request, SyncPhase::TopicContent, &emitter)
            .await
            .map_err(|e| map_error(TOPIC_CONTENT_ENDPOINT, e))?;
        debug!(
            requested = request.identifiers.len(),
            returned = response.download_results.len(),
            "Fetched topic content"
        );
        Ok(response)
    }
}

// ============================================================================
// ImageStorePort
// ============================================================================

#[async_trait]
impl<B: HttpBackend> ImageStorePort for GcsImageStore<B> {
    async fn fetch_image(&self, location: &ImageLocation) -> ImageStoreResult<Option<Vec<u8>>> {
        let url = build_image_url(&self.gcs_base_url, &self.bucket, location)
            .map_err(|e| map_image_error(location, e))?;
        let image = self
            .backend
            .get_bytes(&url)
            .await
            .map_err(|e| map_image_error(location, e))?;
        if image.is_none() {
            debug!(url = %url, "Image not found");
        }
        Ok(image)
    }

    fn image_url(&self, location: &ImageLocation) -> Option<String> {
        build_image_url(&self.gcs_base_url, &self.bucket, location)
            .ok()
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use lessonsync_core::api::{
        ClientContext, DownloadRequestStructureIdentifier, DownloadResultType, StructureType,
    };
    use lessonsync_core::structure::{ImageContainerType, ImageType};
    use lessonsync_core::{ChannelSyncEmitter, LanguageType, NoopSyncEmitter, SyncEvent};
    use url::Url;

    use super::*;
    use crate::debug::ApiDebugRecorder;
    use crate::http::testing::{CannedResponse, FakeBackend};

    fn client(backend: FakeBackend, debug: ApiDebugRecorder) -> GaeClient<FakeBackend> {
        GaeClient::with_backend(backend, Url::parse("https://backend.test").unwrap(), debug)
    }

    fn list_request() -> TopicListRequest {
        TopicListRequest::new(
            ClientContext::default(),
            LanguageType::English,
            vec![LanguageType::Arabic],
        )
    }

    #[test]
    fn test_map_error_statuses() {
        let failed = |status| GaeError::ApiRequestFailed {
            status,
            url: "u".to_string(),
        };
        assert!(matches!(
            map_error("topic_list", failed(404)),
            EndpointPortError::NotFound { .. }
        ));
        assert!(matches!(
            map_error("topic_list", failed(403)),
            EndpointPortError::Unauthorized { .. }
        ));
        assert!(matches!(
            map_error("topic_list", failed(429)),
            EndpointPortError::RateLimited
        ));
        assert!(matches!(
            map_error("topic_list", failed(500)),
            EndpointPortError::Network { .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_topic_list_records_debug_files_and_progress() {
        let temp = tempfile::tempdir().unwrap();
        let backend = FakeBackend::new().with_response(
            "topic_list",
            CannedResponse::Body(
                r#"{"proto_version":{"version":1},"available_topics":[],"future_topics":[]}"#
                    .to_string(),
            ),
        );
        let client = client(backend, ApiDebugRecorder::new(Some(temp.path().to_path_buf())));
        let (emitter, mut events) = ChannelSyncEmitter::channel();

        let response = client
            .fetch_topic_list(&list_request(), Arc::new(emitter))
            .await
            .unwrap();

        assert!(response.available_topics.is_empty());
        assert!(temp.path().join("topic_list_request.json").is_file());
        let recorded = std::fs::read_to_string(temp.path().join("topic_list_response.json")).unwrap();
        assert!(recorded.contains("available_topics"));
        assert_eq!(
            events.recv().await,
            Some(SyncEvent::Progress {
                phase: SyncPhase::TopicList,
                finished: 0,
                total: 1
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_topic_content_decodes_results() {
        let identifier = DownloadRequestStructureIdentifier::new(
            3,
            StructureType::TopicSummaryId("topic_1".to_string()),
        );
        let canned = TopicContentResponse::new(vec![
            lessonsync_core::DownloadResult::new(
                identifier.clone(),
                DownloadResultType::SkippedShouldRetry,
            ),
        ]);
        let backend = FakeBackend::new().with_response(
            "topic_content",
            CannedResponse::Body(serde_json::to_string(&canned).unwrap()),
        );
        let client = client(backend, ApiDebugRecorder::default());
        let request = TopicContentRequest::new(ClientContext::default(), vec![identifier], 0);

        let response = client
            .fetch_topic_content(&request, Arc::new(NoopSyncEmitter::new()))
            .await
            .unwrap();

        assert_eq!(response, canned);
        let posted = client.backend.posted();
        assert!(posted[0].0.ends_with("/android_data/topic_content"));
        assert!(posted[0].1.contains("topic_1"));
    }

    #[tokio::test]
    async fn test_unauthorized_backend_maps_to_port_error() {
        let backend = FakeBackend::new().with_default(CannedResponse::Status(401));
        let client = client(backend, ApiDebugRecorder::default());

        let err = client
            .fetch_topic_list(&list_request(), Arc::new(NoopSyncEmitter::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, EndpointPortError::Unauthorized { endpoint } if endpoint == "topic_list"));
    }

    #[tokio::test]
    async fn test_malformed_response_is_invalid() {
        let backend = FakeBackend::new().with_default(CannedResponse::Body("<html>".to_string()));
        let client = client(backend, ApiDebugRecorder::default());

        let err = client
            .fetch_topic_list(&list_request(), Arc::new(NoopSyncEmitter::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, EndpointPortError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_image_store_fetches_and_reports_missing() {
        let backend = FakeBackend::new()
            .with_response("/thumbnail/present.png", CannedResponse::Bytes(vec![1, 2, 3]))
            .with_response("/thumbnail/broken.png", CannedResponse::Status(500));
        let store = GcsImageStore::with_backend(
            backend,
            Url::parse("https://storage.test").unwrap(),
            "bucket",
        );
        let location = |filename: &str| ImageLocation {
            container_type: ImageContainerType::Topic,
            image_type: ImageType::Thumbnail,
            entity_id: "topic_1".to_string(),
            filename: filename.to_string(),
        };

        assert_eq!(
            store.fetch_image(&location("present.png")).await.unwrap(),
            Some(vec![1, 2, 3])
        );
        assert_eq!(store.fetch_image(&location("absent.png")).await.unwrap(), None);
        assert!(matches!(
            store.fetch_image(&location("broken.png")).await,
            Err(ImageStoreError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[test]
    fn test_image_store_reports_image_url() {
        let store = GcsImageStore::with_backend(
            FakeBackend::new(),
            Url::parse("https://storage.test/base").unwrap(),
            "bucket",
        );
        let location = ImageLocation {
            container_type: ImageContainerType::Exploration,
            image_type: ImageType::HtmlImage,
            entity_id: "exp_1".to_string(),
            filename: "missing.png".to_string(),
        };

        assert_eq!(
            store.image_url(&location).as_deref(),
            Some("https://storage.test/base/bucket/exploration/exp_1/assets/image/missing.png")
        );
    }
}
