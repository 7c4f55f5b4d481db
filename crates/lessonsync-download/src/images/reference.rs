//! Image references gathered from downloaded content.

use indexmap::IndexSet;
use lessonsync_core::structure::{
    ContentLocalizationDto, ContentLocalizationsDto, DownloadableTopicSummaryDto,
    ImageContainerType, ImageLocation, ImageType,
};
use lessonsync_core::{DownloadResult, DownloadResultType, LanguageType};

/// The structure and localization an image was referenced from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageContainer {
    pub container_type: ImageContainerType,
    pub entity_id: String,
    pub language: LanguageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageReference {
    pub container: ImageContainer,
    pub image_type: ImageType,
    pub filename: String,
}

impl ImageReference {
    /// Where the image lives in the asset store.
    pub fn location(&self) -> ImageLocation {
        ImageLocation {
            container_type: self.container.container_type,
            image_type: self.image_type,
            entity_id: self.container.entity_id.clone(),
            filename: self.filename.clone(),
        }
    }
}

/// Collect every image referenced by successful results, first occurrence first.
pub fn collect_image_references(results: &[DownloadResult]) -> Vec<ImageReference> {
    let mut collector = ReferenceCollector::default();
    for result in results {
        match &result.result_type {
            DownloadResultType::TopicSummary(topic) => collector.add_topic(topic),
            DownloadResultType::RevisionCard(card) => collector.add_localization(
                ImageContainerType::Topic,
                &card.id.topic_id,
                &card.default_localization,
            ),
            DownloadResultType::RevisionCardLanguagePack(pack) => collector.add_localization(
                ImageContainerType::Topic,
                &pack.id.id.topic_id,
                &pack.localization,
            ),
            DownloadResultType::ConceptCard(card) => collector.add_localization(
                ImageContainerType::Skill,
                &card.skill_id,
                &card.default_localization,
            ),
            DownloadResultType::ConceptCardLanguagePack(pack) => collector.add_localization(
                ImageContainerType::Skill,
                &pack.id.skill_id,
                &pack.localization,
            ),
            DownloadResultType::Exploration(exploration) => collector.add_localization(
                ImageContainerType::Exploration,
                &exploration.id,
                &exploration.default_localization,
            ),
            DownloadResultType::ExplorationLanguagePack(pack) => collector.add_localization(
                ImageContainerType::Exploration,
                &pack.id.exploration_id,
                &pack.localization,
            ),
            DownloadResultType::SkippedDoesNotExist
            | DownloadResultType::SkippedFromFailure
            | DownloadResultType::SkippedShouldRetry => {}
        }
    }
    collector.references.into_iter().collect()
}

#[derive(Default)]
struct ReferenceCollector {
    references: IndexSet<ImageReference>,
}

impl ReferenceCollector {
    fn add_topic(&mut self, topic: &DownloadableTopicSummaryDto) {
        self.add_localizations(ImageContainerType::Topic, &topic.id, &topic.localizations);
        for story in &topic.story_summaries {
            self.add_localizations(ImageContainerType::Story, &story.id, &story.localizations);
            for chapter in &story.chapters {
                self.add_localizations(
                    ImageContainerType::Story,
                    &story.id,
                    &chapter.localizations,
                );
            }
        }
        for subtopic in &topic.subtopic_summaries {
            self.add_localizations(ImageContainerType::Topic, &topic.id, &subtopic.localizations);
        }
        for skill in &topic.referenced_skills {
            self.add_localizations(ImageContainerType::Skill, &skill.id, &skill.localizations);
        }
    }

    fn add_localizations(
        &mut self,
        container_type: ImageContainerType,
        entity_id: &str,
        localizations: &ContentLocalizationsDto,
    ) {
        for localization in localizations.all() {
            self.add_localization(container_type, entity_id, localization);
        }
    }

    fn add_localization(
        &mut self,
        container_type: ImageContainerType,
        entity_id: &str,
        localization: &ContentLocalizationDto,
    ) {
        let container = ImageContainer {
            container_type,
            entity_id: entity_id.to_string(),
            language: localization.language,
        };
        let html_images = localization
            .localized_image_list
            .referenced_images
            .iter()
            .map(|image| (ImageType::HtmlImage, &image.filename));
        let thumbnail = localization
            .thumbnail
            .iter()
            .map(|thumbnail| (ImageType::Thumbnail, &thumbnail.referenced_image.filename));
        for (image_type, filename) in html_images.chain(thumbnail) {
            self.references.insert(ImageReference {
                container: container.clone(),
                image_type,
                filename: filename.clone(),
            });
        }
    }
}
