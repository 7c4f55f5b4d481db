use serde::{Deserialize, Serialize};

use super::{ClientContext, CompatibilityContext, ProtoVersion, TOPIC_LIST_PROTO_VERSION};
use crate::language::LanguageType;
use crate::structure::{DownloadableTopicSummaryDto, UpcomingTopicSummaryDto};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicListRequest {
    pub proto_version: ProtoVersion,
    pub client_context: ClientContext,
    pub compatibility_context: CompatibilityContext,
    pub requested_default_language: LanguageType,
    pub required_additional_languages: Vec<LanguageType>,
}

impl TopicListRequest {
    pub fn new(
        client_context: ClientContext,
        default_language: LanguageType,
        additional_languages: Vec<LanguageType>,
    ) -> Self {
        Self {
            proto_version: ProtoVersion::new(TOPIC_LIST_PROTO_VERSION),
            client_context,
            compatibility_context: CompatibilityContext::latest(),
            requested_default_language: default_language,
            required_additional_languages: additional_languages,
        }
    }
}

/// The content catalog: topics downloadable now and topics announced for later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicListResponse {
    pub proto_version: ProtoVersion,
    #[serde(default)]
    pub available_topics: Vec<AvailableTopicDto>,
    #[serde(default)]
    pub future_topics: Vec<FutureTopicDto>,
}

impl TopicListResponse {
    /// Summaries of every topic that can be downloaded now, in response order.
    pub fn downloadable_topics(&self) -> impl Iterator<Item = &DownloadableTopicSummaryDto> {
        self.available_topics.iter().filter_map(|topic| match topic {
            AvailableTopicDto::DownloadableTopic(downloadable) => {
                Some(&downloadable.topic_summary)
            }
            AvailableTopicDto::TopicRequiresAppUpdate(_) => None,
        })
    }

    /// Ids of all topics announced for a later release.
    pub fn future_topic_ids(&self) -> Vec<String> {
        self.future_topics
            .iter()
            .map(|topic| topic.topic_id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailableTopicDto {
    DownloadableTopic(DownloadableTopicDto),
    TopicRequiresAppUpdate(TopicRequiresAppUpdateDto),
}

impl AvailableTopicDto {
    pub fn topic_id(&self) -> &str {
        match self {
            Self::DownloadableTopic(topic) => &topic.topic_id,
            Self::TopicRequiresAppUpdate(topic) => &topic.topic_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadableTopicDto {
    pub topic_id: String,
    pub topic_summary: DownloadableTopicSummaryDto,
    #[serde(default)]
    pub download_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRequiresAppUpdateDto {
    pub topic_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FutureTopicDto {
    pub topic_id: String,
    pub topic_summary: UpcomingTopicSummaryDto,
}
