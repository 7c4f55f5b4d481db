//! Core types for lesson content synchronization.
//!
//! This crate holds everything the pipeline shares and nothing that performs
//! I/O:
//!
//! - [`structure`] and [`api`] - wire structures and request/response envelopes
//! - [`content`] - the normalized content model produced by conversion
//! - [`manifest`] - the `DownloadListVersions` snapshot and its text format
//! - [`recommendation`] - topic dependency table and next-topic resolver
//! - [`events`] and [`ports`] - progress events and infrastructure traits
#![deny(unused_crate_dependencies)]

pub mod api;
pub mod content;
pub mod events;
pub mod language;
pub mod manifest;
pub mod ports;
pub mod recommendation;
pub mod structure;
pub mod textproto;

// Re-export commonly used types for convenience
pub use api::{
    ClientContext, DownloadRequestStructureIdentifier, DownloadResult, DownloadResultType,
    ResultOutcome, StructureKind, StructureType, TopicContentRequest, TopicContentResponse,
    TopicListRequest, TopicListResponse,
};
pub use events::{SyncEvent, SyncPhase};
pub use language::{LanguageType, UnspecifiedLanguageError};
pub use manifest::DownloadListVersions;
pub use ports::{
    ChannelSyncEmitter, EndpointPortError, EndpointPortResult, ImageStoreError, ImageStorePort,
    ImageStoreResult, LessonEndpointPort, NoopSyncEmitter, SyncEventEmitterPort,
};
pub use recommendation::{
    DependencyError, PromotedTopicId, TopicDependencyResolver, TopicDependencyTable,
    TopicProgress,
};
pub use textproto::{TextFormat, TextFormatWriter};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
