//! Error types for the synchronization pipeline.

use std::path::PathBuf;
use std::time::Duration;

use lessonsync_convert::ConvertError;
use lessonsync_core::{EndpointPortError, ImageStoreError, UnspecifiedLanguageError};
use lessonsync_image::ImageRepairError;
use thiserror::Error;

use crate::versions::VersionCaptureError;

/// Errors that abort a synchronization run.
///
/// Per-item download failures are not errors; they are reported as
/// `DownloadResult`s in the [`SyncReport`](crate::SyncReport).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The catalog request failed.
    #[error("Failed to fetch topic list: {source}")]
    TopicList {
        #[source]
        source: EndpointPortError,
    },

    /// The batched content request failed as a whole.
    #[error("Failed to fetch topic content: {source}")]
    TopicContent {
        #[source]
        source: EndpointPortError,
    },

    #[error("Failed to fetch image {filename}: {source}")]
    ImageFetch {
        filename: String,
        #[source]
        source: ImageStoreError,
    },

    #[error(transparent)]
    ImageRepair(#[from] ImageRepairError),

    /// One original image filename was placed under several different names.
    #[error("Multiple files correspond to image {filename}: {}", candidates.join(", "))]
    ConflictingImageReplacements {
        filename: String,
        candidates: Vec<String>,
    },

    /// A replaced filename is also the target of another replacement.
    #[error("Cycle(s) found in image replacements: {}", filenames.join(", "))]
    ChainedImageReplacements { filenames: Vec<String> },

    #[error(transparent)]
    Conversion(#[from] ConvertError),

    /// A revision card arrived for a subtopic no topic summary lists.
    #[error("No subtopic summary for revision card {topic_id}/{subtopic_index}")]
    MissingSubtopic { topic_id: String, subtopic_index: u32 },

    #[error(transparent)]
    VersionCapture(#[from] VersionCaptureError),

    #[error(transparent)]
    UnspecifiedLanguage(#[from] UnspecifiedLanguageError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A pipeline task panicked or was aborted.
    #[error("Sync task failed: {message}")]
    TaskFailed { message: String },

    #[error("Failed to start sync runtime: {source}")]
    RuntimeSetup {
        #[source]
        source: std::io::Error,
    },

    #[error("Sync was cancelled")]
    Cancelled,

    #[error("Sync tasks did not terminate within {grace:?}")]
    ShutdownTimedOut { grace: Duration },
}

/// Result type for synchronization operations.
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_replacements_display() {
        let err = SyncError::ConflictingImageReplacements {
            filename: "a.svg".to_string(),
            candidates: vec!["a.png".to_string(), "a_2.png".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Multiple files correspond to image a.svg: a.png, a_2.png"
        );
    }

    #[test]
    fn test_endpoint_error_is_source() {
        let err = SyncError::TopicList {
            source: EndpointPortError::RateLimited,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
