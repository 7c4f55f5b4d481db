use serde::{Deserialize, Serialize};

use super::identifier::DownloadRequestStructureIdentifier;
use super::{ClientContext, ProtoVersion, TOPIC_CONTENT_PROTO_VERSION};
use crate::structure::{
    ConceptCardDto, ConceptCardLanguagePackDto, DownloadableTopicSummaryDto, ExplorationDto,
    ExplorationLanguagePackDto, RevisionCardDto, RevisionCardLanguagePackDto,
};

/// A single batched request for many structures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicContentRequest {
    pub proto_version: ProtoVersion,
    pub client_context: ClientContext,
    pub identifiers: Vec<DownloadRequestStructureIdentifier>,
    /// Zero means no limit.
    #[serde(default)]
    pub requested_max_payload_size_bytes: u64,
}

impl TopicContentRequest {
    pub const fn new(
        client_context: ClientContext,
        identifiers: Vec<DownloadRequestStructureIdentifier>,
        requested_max_payload_size_bytes: u64,
    ) -> Self {
        Self {
            proto_version: ProtoVersion::new(TOPIC_CONTENT_PROTO_VERSION),
            client_context,
            identifiers,
            requested_max_payload_size_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicContentResponse {
    pub proto_version: ProtoVersion,
    #[serde(default)]
    pub download_results: Vec<DownloadResult>,
}

/// Outcome of fetching one identifier. The batch never fails as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub identifier: DownloadRequestStructureIdentifier,
    pub result_type: DownloadResultType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadResultType {
    TopicSummary(DownloadableTopicSummaryDto),
    RevisionCard(RevisionCardDto),
    ConceptCard(ConceptCardDto),
    Exploration(ExplorationDto),
    RevisionCardLanguagePack(RevisionCardLanguagePackDto),
    ConceptCardLanguagePack(ConceptCardLanguagePackDto),
    ExplorationLanguagePack(ExplorationLanguagePackDto),
    /// The backend has no structure for this identifier.
    SkippedDoesNotExist,
    /// The structure could not be produced and re-requesting will not help.
    SkippedFromFailure,
    /// A transient failure; the identifier may be re-requested.
    SkippedShouldRetry,
}

/// Coarse classification of a [`DownloadResultType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOutcome {
    Success,
    SkippedDoesNotExist,
    SkippedFromFailure,
    SkippedShouldRetry,
}

impl DownloadResult {
    pub const fn new(
        identifier: DownloadRequestStructureIdentifier,
        result_type: DownloadResultType,
    ) -> Self {
        Self {
            identifier,
            result_type,
        }
    }

    pub const fn outcome(&self) -> ResultOutcome {
        match self.result_type {
            DownloadResultType::SkippedDoesNotExist => ResultOutcome::SkippedDoesNotExist,
            DownloadResultType::SkippedFromFailure => ResultOutcome::SkippedFromFailure,
            DownloadResultType::SkippedShouldRetry => ResultOutcome::SkippedShouldRetry,
            _ => ResultOutcome::Success,
        }
    }

    /// Content version carried by a fetched structure, if any.
    pub const fn fetched_content_version(&self) -> Option<u32> {
        match &self.result_type {
            DownloadResultType::TopicSummary(dto) => Some(dto.content_version),
            DownloadResultType::RevisionCard(dto) => Some(dto.content_version),
            DownloadResultType::ConceptCard(dto) => Some(dto.content_version),
            DownloadResultType::Exploration(dto) => Some(dto.content_version),
            _ => None,
        }
    }
}

impl TopicContentResponse {
    pub const fn new(download_results: Vec<DownloadResult>) -> Self {
        Self {
            proto_version: ProtoVersion::new(TOPIC_CONTENT_PROTO_VERSION),
            download_results,
        }
    }
}
