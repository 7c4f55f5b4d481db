//! Lesson synchronization pipeline.
//!
//! [`DownloadOrchestrator`] fetches the topic catalog and then every structure
//! of every downloadable topic in one batched request. The result is a
//! [`SyncReport`]; per-structure failures are counted there rather than
//! failing the run.
//!
//! The remaining pieces consume a report:
//!
//! - [`VersionCaptureService`] turns the catalog into a version manifest.
//! - [`collect_image_references`] and [`ImageDownloader`] fetch, repair and
//!   de-duplicate referenced images.
//! - [`convert_content`] and [`ContentExporter`] write converted records.
//! - [`analyze_compatibility`] reports content the app cannot show as intended.
//!
//! [`SyncExecutor`] drives all of this from synchronous code with cancellation
//! and a bounded shutdown.
#![deny(unused_crate_dependencies)]

mod analysis;
mod error;
mod executor;
mod export;
mod identifiers;
mod images;
mod orchestrator;
mod progress;
mod versions;

pub use analysis::{
    CompatibilityIssue, CompatibilityReport, ContentContainer, INVALID_TAGS, IssueBreakdown,
    IssueKind, TextReference, analyze_compatibility,
};
pub use error::{SyncError, SyncResult};
pub use executor::{DEFAULT_SHUTDOWN_GRACE, SyncExecutor};
pub use export::{
    CONTENT_DIR, ContentExporter, ConvertedContent, IMAGES_DIR, WIRE_DIR, convert_content,
};
pub use identifiers::ContentIdentifierGenerator;
pub use images::{
    DEFAULT_IMAGE_CONCURRENCY, DownloadedImage, ImageContainer, ImageDownloadReport,
    ImageDownloader, ImageReference, ImageStats, collect_image_references,
};
pub use orchestrator::{
    DownloadOrchestrator, FetchedContent, KindBreakdown, ResultTally, SuccessCount, SyncConfig,
    SyncReport, breakdown_by_kind,
};
pub use progress::ProgressThrottle;
pub use versions::{VersionCaptureError, VersionCaptureService};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
