//! Topic, story, subtopic and skill summaries returned by the catalog call.

use serde::{Deserialize, Serialize};

use super::localization::{ContentLocalizationsDto, SubtitledTextDto};

/// Summary of a topic whose content can be downloaded now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadableTopicSummaryDto {
    pub id: String,
    pub name: SubtitledTextDto,
    pub description: SubtitledTextDto,
    pub content_version: u32,
    pub localizations: ContentLocalizationsDto,
    #[serde(default)]
    pub story_summaries: Vec<StorySummaryDto>,
    #[serde(default)]
    pub subtopic_summaries: Vec<SubtopicSummaryDto>,
    #[serde(default)]
    pub referenced_skills: Vec<SkillSummaryDto>,
}

/// Summary of a topic that is announced but not yet published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingTopicSummaryDto {
    pub id: String,
    pub name: SubtitledTextDto,
    pub description: SubtitledTextDto,
    pub content_version: u32,
    pub localizations: ContentLocalizationsDto,
    #[serde(default)]
    pub expected_release_date_millis: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySummaryDto {
    pub id: String,
    pub title: SubtitledTextDto,
    pub description: SubtitledTextDto,
    pub content_version: u32,
    #[serde(default)]
    pub chapters: Vec<ChapterSummaryDto>,
    pub localizations: ContentLocalizationsDto,
}

/// One chapter of a story; each chapter is backed by an exploration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummaryDto {
    pub title: SubtitledTextDto,
    pub description: SubtitledTextDto,
    pub exploration_id: String,
    pub content_version: u32,
    pub localizations: ContentLocalizationsDto,
}

/// A subtopic of a topic; backs exactly one revision card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicSummaryDto {
    pub index: u32,
    pub title: SubtitledTextDto,
    pub content_version: u32,
    #[serde(default)]
    pub referenced_skill_ids: Vec<String>,
    pub localizations: ContentLocalizationsDto,
}

/// A skill referenced by a topic; backs exactly one concept card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSummaryDto {
    pub id: String,
    pub name: SubtitledTextDto,
    pub content_version: u32,
    pub localizations: ContentLocalizationsDto,
}
