//! Conversion of a sync's fetched content into content records.

use std::collections::BTreeMap;

use lessonsync_convert::{
    ImageReplacements, convert_concept_card_list, convert_downloadable_topic, convert_exploration,
    convert_revision_card, convert_story, convert_topic_id_list, convert_upcoming_topic,
};
use lessonsync_core::content::{
    ConceptCardList, Exploration, StoryRecord, SubtopicRecord, TopicIdList, TopicRecord,
};
use lessonsync_core::structure::{
    DownloadableTopicSummaryDto, ImageContainerType, SubtopicPageIdDto, SubtopicSummaryDto,
};
use lessonsync_core::TopicListResponse;
use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::images::ImageDownloadReport;
use crate::orchestrator::FetchedContent;

/// Every content record produced from one sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertedContent {
    /// Downloadable topics first, then upcoming ones.
    pub topics: Vec<TopicRecord>,
    pub stories: Vec<StoryRecord>,
    pub subtopics: Vec<(SubtopicPageIdDto, SubtopicRecord)>,
    pub explorations: Vec<Exploration>,
    pub concept_cards: ConceptCardList,
    pub topic_ids: TopicIdList,
}

/// Convert fetched content, rewriting image filenames per container.
pub fn convert_content(
    catalog: &TopicListResponse,
    fetched: &FetchedContent,
    images: &ImageDownloadReport,
) -> SyncResult<ConvertedContent> {
    let mut converted = ConvertedContent::default();

    for topic in &fetched.topic_summaries {
        let replacements = images.compute_replacements(ImageContainerType::Topic, &topic.id)?;
        converted
            .topics
            .push(convert_downloadable_topic(topic, &replacements)?);
        for story in &topic.story_summaries {
            let replacements = images.compute_replacements(ImageContainerType::Story, &story.id)?;
            converted.stories.push(convert_story(story, &replacements)?);
        }
    }
    for future in &catalog.future_topics {
        let replacements =
            images.compute_replacements(ImageContainerType::Topic, &future.topic_id)?;
        converted
            .topics
            .push(convert_upcoming_topic(&future.topic_summary, &replacements)?);
    }

    for card in &fetched.revision_cards {
        let subtopic = find_subtopic(catalog, fetched, &card.id)?;
        let packs = fetched
            .revision_card_packs
            .get(&card.id)
            .map_or(&[][..], Vec::as_slice);
        let replacements =
            images.compute_replacements(ImageContainerType::Topic, &card.id.topic_id)?;
        converted.subtopics.push((
            card.id.clone(),
            convert_revision_card(card, subtopic, packs, &replacements)?,
        ));
    }

    for exploration in &fetched.explorations {
        let packs = fetched
            .exploration_packs
            .get(&exploration.id)
            .map_or(&[][..], Vec::as_slice);
        let replacements =
            images.compute_replacements(ImageContainerType::Exploration, &exploration.id)?;
        converted
            .explorations
            .push(convert_exploration(exploration, packs, &replacements)?);
    }

    let mut skill_replacements: BTreeMap<String, ImageReplacements> = BTreeMap::new();
    let mut cards = Vec::with_capacity(fetched.concept_cards.len());
    for card in &fetched.concept_cards {
        skill_replacements.insert(
            card.skill_id.clone(),
            images.compute_replacements(ImageContainerType::Skill, &card.skill_id)?,
        );
        let packs = fetched
            .concept_card_packs
            .get(&card.skill_id)
            .cloned()
            .unwrap_or_default();
        cards.push((card.clone(), packs));
    }
    converted.concept_cards = convert_concept_card_list(&cards, &skill_replacements)?;

    let downloadable: Vec<DownloadableTopicSummaryDto> =
        catalog.downloadable_topics().cloned().collect();
    converted.topic_ids = convert_topic_id_list(&downloadable);

    debug!(
        topics = converted.topics.len(),
        stories = converted.stories.len(),
        subtopics = converted.subtopics.len(),
        explorations = converted.explorations.len(),
        concept_cards = converted.concept_cards.concept_cards.len(),
        "Converted content"
    );
    Ok(converted)
}

fn find_subtopic<'a>(
    catalog: &'a TopicListResponse,
    fetched: &'a FetchedContent,
    id: &SubtopicPageIdDto,
) -> SyncResult<&'a SubtopicSummaryDto> {
    catalog
        .downloadable_topics()
        .chain(&fetched.topic_summaries)
        .filter(|topic| topic.id == id.topic_id)
        .flat_map(|topic| &topic.subtopic_summaries)
        .find(|subtopic| subtopic.index == id.subtopic_index)
        .ok_or_else(|| SyncError::MissingSubtopic {
            topic_id: id.topic_id.clone(),
            subtopic_index: id.subtopic_index,
        })
}
