//! Revision cards, concept cards and their per-language packs.

use serde::{Deserialize, Serialize};

use super::localization::{ContentLocalizationDto, SubtitledTextDto};
use crate::language::LanguageType;

/// Identifies a subtopic page (revision card) within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubtopicPageIdDto {
    pub topic_id: String,
    pub subtopic_index: u32,
}

impl SubtopicPageIdDto {
    pub fn new(topic_id: impl Into<String>, subtopic_index: u32) -> Self {
        Self {
            topic_id: topic_id.into(),
            subtopic_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionCardDto {
    pub id: SubtopicPageIdDto,
    pub title: SubtitledTextDto,
    pub content: SubtitledTextDto,
    pub default_localization: ContentLocalizationDto,
    pub content_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedRevisionCardIdDto {
    pub id: SubtopicPageIdDto,
    pub language: LanguageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionCardLanguagePackDto {
    pub id: LocalizedRevisionCardIdDto,
    pub localization: ContentLocalizationDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedExampleDto {
    pub question: SubtitledTextDto,
    pub explanation: SubtitledTextDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCardDto {
    pub skill_id: String,
    #[serde(default)]
    pub description: Option<SubtitledTextDto>,
    #[serde(default)]
    pub explanation: Option<SubtitledTextDto>,
    #[serde(default)]
    pub worked_examples: Vec<WorkedExampleDto>,
    pub default_localization: ContentLocalizationDto,
    pub content_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedConceptCardIdDto {
    pub skill_id: String,
    pub language: LanguageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCardLanguagePackDto {
    pub id: LocalizedConceptCardIdDto,
    pub localization: ContentLocalizationDto,
}
