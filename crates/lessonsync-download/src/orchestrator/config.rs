//! Synchronization run configuration.

use lessonsync_core::recommendation::TopicProgress;
use lessonsync_core::{ClientContext, LanguageType};

use crate::images::DEFAULT_IMAGE_CONCURRENCY;

/// Settings for one [`DownloadOrchestrator`](super::DownloadOrchestrator) run.
///
/// # Example
///
/// ```
/// use lessonsync_core::LanguageType;
/// use lessonsync_download::SyncConfig;
///
/// let config = SyncConfig::new()
///     .with_requested_languages(vec![LanguageType::Swahili])
///     .with_test_topic_ids(vec!["test_topic".to_string()]);
/// assert_eq!(config.requested_languages(), [LanguageType::Swahili]);
/// ```
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub(crate) client_context: ClientContext,
    pub(crate) default_language: LanguageType,
    pub(crate) requested_languages: Vec<LanguageType>,
    /// Topics added to the dependency table with no prerequisites.
    pub(crate) test_topic_ids: Vec<String>,
    /// Learner progress used for recommendations; empty for a headless sync.
    pub(crate) topic_progress: Vec<TopicProgress>,
    pub(crate) max_payload_size_bytes: u64,
    pub(crate) image_concurrency: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            client_context: ClientContext::default(),
            default_language: LanguageType::DEFAULT,
            requested_languages: LanguageType::REQUESTED_ADDITIONAL.to_vec(),
            test_topic_ids: Vec::new(),
            topic_progress: Vec::new(),
            max_payload_size_bytes: 0,
            image_concurrency: DEFAULT_IMAGE_CONCURRENCY,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_client_context(mut self, client_context: ClientContext) -> Self {
        self.client_context = client_context;
        self
    }

    #[must_use]
    pub const fn with_default_language(mut self, language: LanguageType) -> Self {
        self.default_language = language;
        self
    }

    #[must_use]
    pub fn with_requested_languages(mut self, languages: Vec<LanguageType>) -> Self {
        self.requested_languages = languages;
        self
    }

    #[must_use]
    pub fn with_test_topic_ids(mut self, topic_ids: Vec<String>) -> Self {
        self.test_topic_ids = topic_ids;
        self
    }

    #[must_use]
    pub fn with_topic_progress(mut self, progress: Vec<TopicProgress>) -> Self {
        self.topic_progress = progress;
        self
    }

    #[must_use]
    pub const fn with_max_payload_size_bytes(mut self, bytes: u64) -> Self {
        self.max_payload_size_bytes = bytes;
        self
    }

    #[must_use]
    pub fn with_image_concurrency(mut self, concurrency: usize) -> Self {
        self.image_concurrency = concurrency.max(1);
        self
    }

    pub const fn default_language(&self) -> LanguageType {
        self.default_language
    }

    pub fn requested_languages(&self) -> &[LanguageType] {
        &self.requested_languages
    }

    pub fn test_topic_ids(&self) -> &[String] {
        &self.test_topic_ids
    }

    pub const fn image_concurrency(&self) -> usize {
        self.image_concurrency
    }
}
