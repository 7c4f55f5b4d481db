//! Top-level synchronization coordinator.
//!
//! A sync is two round trips: the catalog call, then a single batched content
//! call for every identifier the catalog implies. Individual content results
//! may be skipped; the batch as a whole never fails because of them, and no
//! retry happens here. Callers re-run with [`SyncReport::retry_identifiers`].

mod config;
mod report;

use std::collections::HashSet;
use std::sync::Arc;

use lessonsync_core::recommendation::{TopicDependencyResolver, TopicDependencyTable};
use lessonsync_core::structure::DownloadableTopicSummaryDto;
use lessonsync_core::{
    DownloadRequestStructureIdentifier, DownloadResult, LessonEndpointPort, SyncEvent, SyncEventEmitterPort, SyncPhase, TopicContentRequest,
    TopicContentResponse, TopicListRequest, TopicListResponse,
};
use tracing::{debug, info, warn};

pub use config::SyncConfig;
pub use report::{
    FetchedContent, KindBreakdown, ResultTally, SuccessCount, SyncReport, breakdown_by_kind,
};

use crate::error::{SyncError, SyncResult};
use crate::identifiers::ContentIdentifierGenerator;

/// Coordinates the catalog fetch, recommendations and the batched content fetch.
pub struct DownloadOrchestrator {
    endpoint: Arc<dyn LessonEndpointPort>,
    resolver: TopicDependencyResolver,
    config: SyncConfig,
}

impl DownloadOrchestrator {
    /// Create an orchestrator using the production dependency table extended
    /// with the configured test topics.
    pub fn new(endpoint: Arc<dyn LessonEndpointPort>, config: SyncConfig) -> Self {
        let table =
            TopicDependencyTable::default_table().with_test_topics(config.test_topic_ids.clone());
        Self::with_resolver(endpoint, TopicDependencyResolver::new(table), config)
    }

    pub const fn with_resolver(
        endpoint: Arc<dyn LessonEndpointPort>,
        resolver: TopicDependencyResolver,
        config: SyncConfig,
    ) -> Self {
        Self {
            endpoint,
            resolver,
            config,
        }
    }

    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn topic_list_request(&self) -> TopicListRequest {
        TopicListRequest::new(
            self.config.client_context.clone(),
            self.config.default_language,
            self.config.requested_languages.clone(),
        )
    }

    /// Request for every structure of `topics`, de-duplicated.
    pub fn topic_content_request(
        &self,
        topics: &[DownloadableTopicSummaryDto],
        include_topic_summaries: bool,
    ) -> TopicContentRequest {
        let identifiers = ContentIdentifierGenerator::new(
            self.config.default_language,
            self.config.requested_languages.clone(),
        )
        .with_topic_summaries(include_topic_summaries)
        .build_identifiers(topics);
        TopicContentRequest::new(
            self.config.client_context.clone(),
            identifiers,
            self.config.max_payload_size_bytes,
        )
    }

    pub async fn fetch_topic_list(
        &self,
        emitter: &Arc<dyn SyncEventEmitterPort>,
    ) -> SyncResult<TopicListResponse> {
        let request = self.topic_list_request();
        emitter.emit(SyncEvent::PhaseStarted {
            phase: SyncPhase::TopicList,
            total: 1,
        });
        let response = self
            .endpoint
            .fetch_topic_list(&request, Arc::clone(emitter))
            .await
            .map_err(|source| SyncError::TopicList { source })?;
        emitter.emit(SyncEvent::PhaseFinished {
            phase: SyncPhase::TopicList,
        });
        info!(
            available = response.available_topics.len(),
            future = response.future_topics.len(),
            "Fetched topic list"
        );
        Ok(response)
    }

    pub async fn fetch_content(
        &self,
        request: &TopicContentRequest,
        emitter: &Arc<dyn SyncEventEmitterPort>,
    ) -> SyncResult<TopicContentResponse> {
        emitter.emit(SyncEvent::PhaseStarted {
            phase: SyncPhase::TopicContent,
            total: request.identifiers.len() as u64,
        });
        let response = self
            .endpoint
            .fetch_topic_content(request, Arc::clone(emitter))
            .await
            .map_err(|source| SyncError::TopicContent { source })?;
        emitter.emit(SyncEvent::PhaseFinished {
            phase: SyncPhase::TopicContent,
        });

        if response.download_results.len() != request.identifiers.len() {
            warn!(
                requested = request.identifiers.len(),
                returned = response.download_results.len(),
                "Content response does not cover every requested identifier"
            );
        }
        let unrequested = count_unrequested(&request.identifiers, &response.download_results);
        if unrequested > 0 {
            warn!(count = unrequested, "Content response includes unrequested identifiers");
        }
        Ok(response)
    }

    /// Fetch the catalog and the full content set for its downloadable topics.
    ///
    /// Topic summaries are requested alongside the other structures so the
    /// report holds everything needed to convert and export the content.
    pub async fn sync_lessons(
        &self,
        emitter: Arc<dyn SyncEventEmitterPort>,
    ) -> SyncResult<SyncReport> {
        let catalog = self.fetch_topic_list(&emitter).await?;
        let downloadable: Vec<DownloadableTopicSummaryDto> =
            catalog.downloadable_topics().cloned().collect();
        let downloadable_ids: Vec<String> =
            downloadable.iter().map(|topic| topic.id.clone()).collect();

        let recommended = self
            .resolver
            .recommend_next_topics(&self.config.topic_progress, &downloadable_ids);
        debug!(count = recommended.len(), "Computed topic recommendations");

        let request = self.topic_content_request(&downloadable, true);
        info!(
            topics = downloadable.len(),
            identifiers = request.identifiers.len(),
            "Requesting topic content"
        );
        let content = self.fetch_content(&request, &emitter).await?;

        let report = SyncReport::new(catalog, recommended, request.identifiers, content);
        info!(
            succeeded = report.tally.success,
            failed = report.tally.skipped_from_failure,
            retry = report.tally.skipped_should_retry,
            "Topic content downloaded"
        );
        Ok(report)
    }
}

/// Number of results whose identifier was not part of the request.
fn count_unrequested(
    requested: &[DownloadRequestStructureIdentifier],
    results: &[DownloadResult],
) -> usize {
    let requested: HashSet<&DownloadRequestStructureIdentifier> = requested.iter().collect();
    results
        .iter()
        .filter(|result| !requested.contains(&result.identifier))
        .count()
}
