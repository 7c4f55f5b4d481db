//! CLI bootstrap - the composition root.
//!
//! This is the only place concrete adapters are built:
//! - Lesson endpoint client (via lessonsync-gae)
//! - Image bucket store (via lessonsync-gae)
//! - Sync orchestrator (via lessonsync-download)
//!
//! Handlers receive the composed [`CliContext`] and work through its ports.

use std::path::PathBuf;
use std::sync::Arc;

use lessonsync_core::{ImageStorePort, LessonEndpointPort};
use lessonsync_download::{DownloadOrchestrator, ImageDownloader, SyncConfig};
use lessonsync_gae::{DefaultGaeClient, DefaultGcsImageStore, GaeClientConfig};
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration shared by both commands.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub base_url: String,
    pub gcs_base_url: String,
    pub gcs_bucket: String,
    pub api_secret: String,
    pub api_debug_dir: Option<PathBuf>,
    pub test_topic_ids: Vec<String>,
    pub image_concurrency: Option<usize>,
}

impl CliConfig {
    fn client_config(&self) -> GaeClientConfig {
        GaeClientConfig::new()
            .with_base_url(self.base_url.clone())
            .with_gcs_base_url(self.gcs_base_url.clone())
            .with_gcs_bucket(self.gcs_bucket.clone())
            .with_api_secret(self.api_secret.clone())
            .with_api_debug_dir(self.api_debug_dir.clone())
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub orchestrator: DownloadOrchestrator,
    pub image_store: Arc<dyn ImageStorePort>,
}

impl CliContext {
    pub const fn orchestrator(&self) -> &DownloadOrchestrator {
        &self.orchestrator
    }

    /// Image downloader sized by the sync configuration.
    pub fn image_downloader(&self) -> ImageDownloader {
        ImageDownloader::new(Arc::clone(&self.image_store))
            .with_concurrency(self.orchestrator.config().image_concurrency())
    }
}

/// Build the endpoint client, image store and orchestrator.
///
/// Creates the API debug directory when one is configured.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let client_config = config.client_config();
    let endpoint: Arc<dyn LessonEndpointPort> = Arc::new(DefaultGaeClient::new(&client_config)?);
    let image_store: Arc<dyn ImageStorePort> =
        Arc::new(DefaultGcsImageStore::new(&client_config)?);

    let mut sync_config = SyncConfig::new()
        .with_test_topic_ids(config.test_topic_ids.clone())
        .with_max_payload_size_bytes(client_config.max_payload_size_bytes());
    if let Some(concurrency) = config.image_concurrency {
        sync_config = sync_config.with_image_concurrency(concurrency);
    }
    debug!(
        base_url = %config.base_url,
        test_topics = config.test_topic_ids.len(),
        "Bootstrapped sync context"
    );

    Ok(CliContext {
        orchestrator: DownloadOrchestrator::new(endpoint, sync_config),
        image_store,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            base_url: "https://content.example.org".to_string(),
            gcs_base_url: "https://storage.example.org".to_string(),
            gcs_bucket: "bucket".to_string(),
            api_secret: "secret".to_string(),
            ..CliConfig::default()
        }
    }

    #[test]
    fn test_bootstrap_applies_sync_settings() {
        let config = CliConfig {
            test_topic_ids: vec!["test_topic".to_string()],
            image_concurrency: Some(3),
            ..config()
        };

        let ctx = bootstrap(&config).unwrap();

        let sync = ctx.orchestrator().config();
        assert_eq!(sync.test_topic_ids(), ["test_topic"]);
        assert_eq!(sync.image_concurrency(), 3);
    }

    #[test]
    fn test_bootstrap_creates_debug_dir() {
        let temp = tempfile::tempdir().unwrap();
        let debug_dir = temp.path().join("api_debug");
        let config = CliConfig {
            api_debug_dir: Some(debug_dir.clone()),
            ..config()
        };

        bootstrap(&config).unwrap();

        assert!(debug_dir.is_dir());
    }

    #[test]
    fn test_bootstrap_rejects_invalid_base_url() {
        let config = CliConfig {
            base_url: "not a url".to_string(),
            ..config()
        };

        let err = bootstrap(&config).err().unwrap();

        assert_eq!(err.exit_code(), 78);
    }
}
