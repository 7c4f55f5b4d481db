use serde::{Deserialize, Serialize};

use super::common::{LessonThumbnail, RecordedVoiceovers, SubtitledHtml, WrittenTranslations};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id: String,
    pub written_translations: WrittenTranslations,
    pub translatable_title: SubtitledHtml,
    pub translatable_description: SubtitledHtml,
    pub canonical_story_ids: Vec<String>,
    pub subtopic_ids: Vec<u32>,
    pub is_published: bool,
    pub topic_thumbnail: Option<LessonThumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub story_id: String,
    pub written_translations: WrittenTranslations,
    pub translatable_story_name: SubtitledHtml,
    pub story_thumbnail: Option<LessonThumbnail>,
    pub chapters: Vec<ChapterRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub exploration_id: String,
    pub chapter_thumbnail: Option<LessonThumbnail>,
    pub written_translations: WrittenTranslations,
    pub translatable_title: SubtitledHtml,
    pub translatable_description: SubtitledHtml,
}

/// A revision card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicRecord {
    pub title: SubtitledHtml,
    pub page_contents: SubtitledHtml,
    pub recorded_voiceovers: RecordedVoiceovers,
    pub written_translations: WrittenTranslations,
    pub skill_ids: Vec<String>,
    pub subtopic_thumbnail: Option<LessonThumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCard {
    pub skill_id: String,
    pub skill_description: Option<String>,
    pub explanation: Option<SubtitledHtml>,
    pub worked_examples: Vec<SubtitledHtml>,
    pub recorded_voiceovers: RecordedVoiceovers,
    pub written_translations: WrittenTranslations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCardList {
    pub concept_cards: Vec<ConceptCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicIdList {
    pub topic_ids: Vec<String>,
}
