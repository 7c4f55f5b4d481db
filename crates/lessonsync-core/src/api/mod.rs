//! Request and response envelopes of the lesson content endpoint.

mod identifier;
mod topic_content;
mod topic_list;

use serde::{Deserialize, Serialize};

pub use identifier::{DownloadRequestStructureIdentifier, StructureKind, StructureType};
pub use topic_content::{
    DownloadResult, DownloadResultType, ResultOutcome, TopicContentRequest, TopicContentResponse,
};
pub use topic_list::{
    AvailableTopicDto, DownloadableTopicDto, FutureTopicDto, TopicListRequest, TopicListResponse,
    TopicRequiresAppUpdateDto,
};

/// Latest protocol version understood by this client for topic list calls.
pub const TOPIC_LIST_PROTO_VERSION: u32 = 1;
/// Latest protocol version understood by this client for topic content calls.
pub const TOPIC_CONTENT_PROTO_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtoVersion {
    pub version: u32,
}

impl ProtoVersion {
    pub const fn new(version: u32) -> Self {
        Self { version }
    }
}

/// Identifies the requesting client build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContext {
    pub app_version_name: String,
    pub app_version_code: u32,
}

impl Default for ClientContext {
    fn default() -> Self {
        Self {
            app_version_name: concat!("lessonsync-", env!("CARGO_PKG_VERSION")).to_string(),
            app_version_code: 0,
        }
    }
}

/// Structure versions the client can decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityContext {
    pub topic_list_request_response_proto_version: ProtoVersion,
    pub topic_content_request_response_proto_version: ProtoVersion,
    pub topic_summary_proto_version: ProtoVersion,
    pub revision_card_proto_version: ProtoVersion,
    pub concept_card_proto_version: ProtoVersion,
    pub exploration_proto_version: ProtoVersion,
    pub language_proto_version: ProtoVersion,
    pub image_proto_version: ProtoVersion,
}

impl CompatibilityContext {
    /// The structure versions this build understands.
    pub const fn latest() -> Self {
        let v1 = ProtoVersion::new(1);
        Self {
            topic_list_request_response_proto_version: ProtoVersion::new(TOPIC_LIST_PROTO_VERSION),
            topic_content_request_response_proto_version: ProtoVersion::new(
                TOPIC_CONTENT_PROTO_VERSION,
            ),
            topic_summary_proto_version: v1,
            revision_card_proto_version: v1,
            concept_card_proto_version: v1,
            exploration_proto_version: v1,
            language_proto_version: v1,
            image_proto_version: v1,
        }
    }
}

impl Default for CompatibilityContext {
    fn default() -> Self {
        Self::latest()
    }
}
