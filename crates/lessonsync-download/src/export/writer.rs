//! Writes fetched and converted content to an output directory.

use std::path::{Path, PathBuf};

use lessonsync_core::{DownloadResult, DownloadResultType};
use serde::Serialize;
use tracing::{debug, info};

use super::ConvertedContent;
use crate::error::{SyncError, SyncResult};

pub const WIRE_DIR: &str = "wire";
pub const CONTENT_DIR: &str = "content";
pub const IMAGES_DIR: &str = "images";

/// Lays out a sync's output as `wire/`, `content/` and `images/`.
#[derive(Debug, Clone)]
pub struct ContentExporter {
    output_dir: PathBuf,
}

impl ContentExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join(IMAGES_DIR)
    }

    /// Write each successful result's structure as `wire/{base_name}.json`.
    ///
    /// Returns the number of files written.
    pub async fn write_wire(&self, results: &[DownloadResult]) -> SyncResult<usize> {
        let dir = self.output_dir.join(WIRE_DIR);
        create_dir(&dir).await?;

        let mut written = 0;
        for result in results {
            let name = result.identifier.base_name()?;
            let payload = wire_payload(&result.result_type)
                .map_err(|source| SyncError::Serialize {
                    name: name.clone(),
                    source,
                })?;
            if let Some(payload) = payload {
                write_file(&dir.join(format!("{name}.json")), payload).await?;
                written += 1;
            }
        }
        info!(count = written, dir = %dir.display(), "Wrote wire structures");
        Ok(written)
    }

    /// Write converted records under `content/`.
    pub async fn write_content(&self, content: &ConvertedContent) -> SyncResult<usize> {
        let dir = self.output_dir.join(CONTENT_DIR);
        create_dir(&dir).await?;

        let mut written = 0;
        for topic in &content.topics {
            write_json(&dir, &format!("topic_{}", topic.id), topic).await?;
            written += 1;
        }
        for story in &content.stories {
            write_json(&dir, &format!("story_{}", story.story_id), story).await?;
            written += 1;
        }
        for (id, subtopic) in &content.subtopics {
            let name = format!("subtopic_{}_{}", id.topic_id, id.subtopic_index);
            write_json(&dir, &name, subtopic).await?;
            written += 1;
        }
        for exploration in &content.explorations {
            write_json(&dir, &format!("exploration_{}", exploration.id), exploration).await?;
            written += 1;
        }
        write_json(&dir, "skills", &content.concept_cards).await?;
        write_json(&dir, "topics", &content.topic_ids).await?;
        written += 2;

        info!(count = written, dir = %dir.display(), "Wrote converted content");
        Ok(written)
    }
}

fn wire_payload(result_type: &DownloadResultType) -> serde_json::Result<Option<String>> {
    let payload = match result_type {
        DownloadResultType::TopicSummary(dto) => serde_json::to_string_pretty(dto)?,
        DownloadResultType::RevisionCard(dto) => serde_json::to_string_pretty(dto)?,
        DownloadResultType::RevisionCardLanguagePack(dto) => serde_json::to_string_pretty(dto)?,
        DownloadResultType::ConceptCard(dto) => serde_json::to_string_pretty(dto)?,
        DownloadResultType::ConceptCardLanguagePack(dto) => serde_json::to_string_pretty(dto)?,
        DownloadResultType::Exploration(dto) => serde_json::to_string_pretty(dto)?,
        DownloadResultType::ExplorationLanguagePack(dto) => serde_json::to_string_pretty(dto)?,
        DownloadResultType::SkippedDoesNotExist
        | DownloadResultType::SkippedFromFailure
        | DownloadResultType::SkippedShouldRetry => return Ok(None),
    };
    Ok(Some(payload))
}

async fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> SyncResult<()> {
    let payload = serde_json::to_string_pretty(value).map_err(|source| SyncError::Serialize {
        name: name.to_string(),
        source,
    })?;
    write_file(&dir.join(format!("{name}.json")), payload).await
}

async fn create_dir(dir: &Path) -> SyncResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| SyncError::io(dir, source))
}

async fn write_file(path: &Path, contents: String) -> SyncResult<()> {
    debug!(path = %path.display(), "Writing");
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| SyncError::io(path, source))
}
