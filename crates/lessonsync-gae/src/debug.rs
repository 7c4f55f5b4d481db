//! Recording of raw API traffic for troubleshooting.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GaeError, GaeResult};

/// Writes request and response bodies into a debug directory, when one is configured.
#[derive(Debug, Clone, Default)]
pub struct ApiDebugRecorder {
    dir: Option<PathBuf>,
}

impl ApiDebugRecorder {
    pub const fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Write `contents` to `{dir}/{endpoint}_{kind}.json`.
    pub async fn record(&self, endpoint: &str, kind: &str, contents: &str) -> GaeResult<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let path = dir.join(format!("{endpoint}_{kind}.json"));
        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| GaeError::DebugWrite {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = contents.len(), "Recorded API traffic");
        Ok(())
    }
}
