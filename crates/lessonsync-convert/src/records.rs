//! Topic, story, revision card and concept card conversion.

use std::collections::BTreeMap;

use lessonsync_core::content::{
    ChapterRecord, ConceptCard, ConceptCardList, StoryRecord, SubtopicRecord, TopicIdList,
    TopicRecord,
};
use lessonsync_core::structure::{
    ChapterSummaryDto, ConceptCardDto, ConceptCardLanguagePackDto, DownloadableTopicSummaryDto,
    RevisionCardDto, RevisionCardLanguagePackDto, StorySummaryDto, SubtopicSummaryDto,
    UpcomingTopicSummaryDto,
};
use tracing::debug;

use crate::error::ConvertResult;
use crate::localization::{
    ImageReplacements, default_html, to_recorded_voiceovers, to_thumbnail,
    to_written_translations,
};
use crate::tracker::ContentIdTracker;

static NO_REPLACEMENTS: ImageReplacements = BTreeMap::new();

pub fn convert_downloadable_topic(
    dto: &DownloadableTopicSummaryDto,
    replacements: &ImageReplacements,
) -> ConvertResult<TopicRecord> {
    let default = &dto.localizations.default_mapping;
    Ok(TopicRecord {
        id: dto.id.clone(),
        written_translations: to_written_translations(
            &dto.localizations.localizations,
            replacements,
            None,
        )?,
        translatable_title: default_html(default, &dto.name)?,
        translatable_description: default_html(default, &dto.description)?,
        canonical_story_ids: dto.story_summaries.iter().map(|story| story.id.clone()).collect(),
        subtopic_ids: dto
            .subtopic_summaries
            .iter()
            .map(|subtopic| subtopic.index)
            .collect(),
        is_published: true,
        topic_thumbnail: to_thumbnail(default.thumbnail.as_ref(), replacements),
    })
}

/// Converts an announced topic; it has no stories or subtopics yet.
pub fn convert_upcoming_topic(
    dto: &UpcomingTopicSummaryDto,
    replacements: &ImageReplacements,
) -> ConvertResult<TopicRecord> {
    let default = &dto.localizations.default_mapping;
    Ok(TopicRecord {
        id: dto.id.clone(),
        written_translations: to_written_translations(
            &dto.localizations.localizations,
            replacements,
            None,
        )?,
        translatable_title: default_html(default, &dto.name)?,
        translatable_description: default_html(default, &dto.description)?,
        canonical_story_ids: Vec::new(),
        subtopic_ids: Vec::new(),
        is_published: false,
        topic_thumbnail: to_thumbnail(default.thumbnail.as_ref(), replacements),
    })
}

pub fn convert_story(
    dto: &StorySummaryDto,
    replacements: &ImageReplacements,
) -> ConvertResult<StoryRecord> {
    let default = &dto.localizations.default_mapping;
    let chapters = dto
        .chapters
        .iter()
        .map(|chapter| convert_chapter(chapter, replacements))
        .collect::<ConvertResult<Vec<_>>>()?;
    Ok(StoryRecord {
        story_id: dto.id.clone(),
        written_translations: to_written_translations(
            &dto.localizations.localizations,
            replacements,
            None,
        )?,
        translatable_story_name: default_html(default, &dto.title)?,
        story_thumbnail: to_thumbnail(default.thumbnail.as_ref(), replacements),
        chapters,
    })
}

fn convert_chapter(
    dto: &ChapterSummaryDto,
    replacements: &ImageReplacements,
) -> ConvertResult<ChapterRecord> {
    let default = &dto.localizations.default_mapping;
    Ok(ChapterRecord {
        exploration_id: dto.exploration_id.clone(),
        chapter_thumbnail: to_thumbnail(default.thumbnail.as_ref(), replacements),
        written_translations: to_written_translations(
            &dto.localizations.localizations,
            replacements,
            None,
        )?,
        translatable_title: default_html(default, &dto.title)?,
        translatable_description: default_html(default, &dto.description)?,
    })
}

/// Converts a revision card together with its language packs.
///
/// Every pack entry is attached as is; only the packs contribute voiceovers.
pub fn convert_revision_card(
    dto: &RevisionCardDto,
    subtopic: &SubtopicSummaryDto,
    packs: &[RevisionCardLanguagePackDto],
    replacements: &ImageReplacements,
) -> ConvertResult<SubtopicRecord> {
    let mut tracker = ContentIdTracker::new(&dto.default_localization, replacements);
    let title = tracker.extract_subtitled_html(&dto.title)?;
    let page_contents = tracker.extract_subtitled_html(&dto.content)?;
    let pack_localizations = || packs.iter().map(|pack| &pack.localization);
    Ok(SubtopicRecord {
        title,
        page_contents,
        recorded_voiceovers: to_recorded_voiceovers(pack_localizations(), None)?,
        written_translations: to_written_translations(pack_localizations(), replacements, None)?,
        skill_ids: subtopic.referenced_skill_ids.clone(),
        subtopic_thumbnail: to_thumbnail(dto.default_localization.thumbnail.as_ref(), replacements),
    })
}

pub fn convert_concept_card(
    dto: &ConceptCardDto,
    packs: &[ConceptCardLanguagePackDto],
    replacements: &ImageReplacements,
) -> ConvertResult<ConceptCard> {
    let mut tracker = ContentIdTracker::new(&dto.default_localization, replacements);
    let skill_description = dto
        .description
        .as_ref()
        .map(|description| tracker.extract_subtitled_html(description).map(|text| text.html))
        .transpose()?;
    let explanation = dto
        .explanation
        .as_ref()
        .map(|explanation| tracker.extract_subtitled_html(explanation))
        .transpose()?;
    let worked_examples = dto
        .worked_examples
        .iter()
        .map(|example| tracker.extract_subtitled_html(&example.explanation))
        .collect::<ConvertResult<Vec<_>>>()?;
    let pack_localizations = || packs.iter().map(|pack| &pack.localization);
    Ok(ConceptCard {
        skill_id: dto.skill_id.clone(),
        skill_description,
        explanation,
        worked_examples,
        recorded_voiceovers: to_recorded_voiceovers(pack_localizations(), None)?,
        written_translations: to_written_translations(pack_localizations(), replacements, None)?,
    })
}

/// Converts every concept card, each with the image replacements of its skill.
///
/// A skill without an entry in `replacements_by_skill` had no renamed images.
pub fn convert_concept_card_list(
    cards: &[(ConceptCardDto, Vec<ConceptCardLanguagePackDto>)],
    replacements_by_skill: &BTreeMap<String, ImageReplacements>,
) -> ConvertResult<ConceptCardList> {
    let concept_cards = cards
        .iter()
        .map(|(card, packs)| {
            let replacements = replacements_by_skill
                .get(&card.skill_id)
                .unwrap_or(&NO_REPLACEMENTS);
            convert_concept_card(card, packs, replacements)
        })
        .collect::<ConvertResult<Vec<_>>>()?;
    debug!(count = concept_cards.len(), "Converted concept cards");
    Ok(ConceptCardList { concept_cards })
}

pub fn convert_topic_id_list(topics: &[DownloadableTopicSummaryDto]) -> TopicIdList {
    TopicIdList {
        topic_ids: topics.iter().map(|topic| topic.id.clone()).collect(),
    }
}
