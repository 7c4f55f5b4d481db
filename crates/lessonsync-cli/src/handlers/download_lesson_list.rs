//! `download-lesson-list`: write the catalog's content versions as a manifest.

use std::path::Path;
use std::sync::Arc;

use lessonsync_core::{SyncEventEmitterPort, TextFormat};
use lessonsync_download::{SyncError, VersionCaptureService};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::topic_list_summary;

/// Read and trim the API secret; a missing or empty file is a configuration error.
pub fn read_api_secret(path: &Path) -> Result<String, CliError> {
    if !path.is_file() {
        return Err(CliError::Config(format!(
            "Expected API secret file to exist: {}",
            path.display()
        )));
    }
    let secret = std::fs::read_to_string(path)?.trim().to_string();
    if secret.is_empty() {
        return Err(CliError::Config(format!(
            "API secret file is empty: {}",
            path.display()
        )));
    }
    Ok(secret)
}

/// The manifest's parent directory must already exist.
pub fn check_output_path(path: &Path) -> Result<(), CliError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if parent.is_dir() {
        Ok(())
    } else {
        Err(CliError::Arguments(format!(
            "Expected output directory to exist: {}",
            parent.display()
        )))
    }
}

pub async fn execute(
    ctx: &CliContext,
    output_path: &Path,
    emitter: Arc<dyn SyncEventEmitterPort>,
) -> Result<(), CliError> {
    let catalog = ctx.orchestrator().fetch_topic_list(&emitter).await?;
    println!("{}", topic_list_summary(&catalog));

    let versions = VersionCaptureService::new()
        .capture_versions(&catalog)
        .map_err(SyncError::from)?;
    tokio::fs::write(output_path, versions.to_text_format()).await?;
    info!(
        topics = versions.topic_version_list.len(),
        skills = versions.skill_version_list.len(),
        "Captured content versions"
    );
    println!("Wrote download list versions to: {}", output_path.display());
    Ok(())
}
