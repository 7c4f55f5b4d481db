//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the synchronization pipeline expects from
//! infrastructure. They contain no implementation details and use only
//! types from this crate.

pub mod endpoint;
pub mod event_emitter;
pub mod image_store;

pub use endpoint::{EndpointPortError, EndpointPortResult, LessonEndpointPort};
pub use event_emitter::{ChannelSyncEmitter, NoopSyncEmitter, SyncEventEmitterPort};
pub use image_store::{ImageStoreError, ImageStorePort, ImageStoreResult};
