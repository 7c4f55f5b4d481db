//! Structure identifiers needed to download whole topics.

use indexmap::IndexSet;
use lessonsync_core::structure::{
    DownloadableTopicSummaryDto, LocalizedConceptCardIdDto, LocalizedExplorationIdDto,
    LocalizedRevisionCardIdDto, SubtopicPageIdDto,
};
use lessonsync_core::{DownloadRequestStructureIdentifier, LanguageType, StructureType};

/// Builds the identifier list for a content request.
///
/// Every revision card, exploration and concept card reachable from a topic
/// yields one language-pack identifier per requested language followed by one
/// default-language structure identifier, all at the structure's current
/// content version. The output is de-duplicated preserving first occurrence,
/// since skills and explorations can be shared between topics.
#[derive(Debug, Clone)]
pub struct ContentIdentifierGenerator {
    default_language: LanguageType,
    requested_languages: Vec<LanguageType>,
    include_topic_summaries: bool,
}

impl ContentIdentifierGenerator {
    pub fn new(default_language: LanguageType, requested_languages: Vec<LanguageType>) -> Self {
        Self {
            default_language,
            requested_languages,
            include_topic_summaries: false,
        }
    }

    /// Also request each topic's summary after its per-topic structures.
    #[must_use]
    pub const fn with_topic_summaries(mut self, enabled: bool) -> Self {
        self.include_topic_summaries = enabled;
        self
    }

    pub fn build_identifiers(
        &self,
        topics: &[DownloadableTopicSummaryDto],
    ) -> Vec<DownloadRequestStructureIdentifier> {
        let mut identifiers = IndexSet::new();
        for topic in topics {
            self.add_topic(topic, &mut identifiers);
        }
        identifiers.into_iter().collect()
    }

    fn add_topic(
        &self,
        topic: &DownloadableTopicSummaryDto,
        identifiers: &mut IndexSet<DownloadRequestStructureIdentifier>,
    ) {
        for subtopic in &topic.subtopic_summaries {
            let page_id = SubtopicPageIdDto::new(topic.id.clone(), subtopic.index);
            self.add_structure(
                identifiers,
                subtopic.content_version,
                |language| LocalizedRevisionCardIdDto {
                    id: page_id.clone(),
                    language,
                },
                StructureType::RevisionCardLanguagePack,
                StructureType::RevisionCard,
            );
        }

        let chapters = topic
            .story_summaries
            .iter()
            .flat_map(|story| story.chapters.iter());
        for chapter in chapters {
            self.add_structure(
                identifiers,
                chapter.content_version,
                |language| LocalizedExplorationIdDto {
                    exploration_id: chapter.exploration_id.clone(),
                    language,
                },
                StructureType::ExplorationLanguagePack,
                StructureType::Exploration,
            );
        }

        for skill in &topic.referenced_skills {
            self.add_structure(
                identifiers,
                skill.content_version,
                |language| LocalizedConceptCardIdDto {
                    skill_id: skill.id.clone(),
                    language,
                },
                StructureType::ConceptCardLanguagePack,
                StructureType::ConceptCard,
            );
        }

        if self.include_topic_summaries {
            identifiers.insert(DownloadRequestStructureIdentifier::new(
                topic.content_version,
                StructureType::TopicSummaryId(topic.id.clone()),
            ));
        }
    }

    fn add_structure<L>(
        &self,
        identifiers: &mut IndexSet<DownloadRequestStructureIdentifier>,
        content_version: u32,
        localized_id: impl Fn(LanguageType) -> L,
        language_pack: fn(L) -> StructureType,
        structure: fn(L) -> StructureType,
    ) {
        for &language in &self.requested_languages {
            identifiers.insert(DownloadRequestStructureIdentifier::new(
                content_version,
                language_pack(localized_id(language)),
            ));
        }
        identifiers.insert(DownloadRequestStructureIdentifier::new(
            content_version,
            structure(localized_id(self.default_language)),
        ));
    }
}

impl Default for ContentIdentifierGenerator {
    fn default() -> Self {
        Self::new(
            LanguageType::DEFAULT,
            LanguageType::REQUESTED_ADDITIONAL.to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use lessonsync_core::StructureKind;
    use lessonsync_core::structure::{
        ChapterSummaryDto, ContentLocalizationDto, ContentLocalizationsDto, SkillSummaryDto,
        StorySummaryDto, SubtitledTextDto, SubtopicSummaryDto,
    };

    use super::*;

    fn localizations() -> ContentLocalizationsDto {
        ContentLocalizationsDto {
            default_mapping: ContentLocalizationDto::empty(LanguageType::English),
            localizations: Vec::new(),
        }
    }

    fn subtopic(index: u32, skill_ids: &[&str]) -> SubtopicSummaryDto {
        SubtopicSummaryDto {
            index,
            title: SubtitledTextDto::new("title"),
            content_version: 2,
            referenced_skill_ids: skill_ids.iter().map(ToString::to_string).collect(),
            localizations: localizations(),
        }
    }

    fn chapter(exploration_id: &str) -> ChapterSummaryDto {
        ChapterSummaryDto {
            title: SubtitledTextDto::new("title"),
            description: SubtitledTextDto::new("description"),
            exploration_id: exploration_id.to_string(),
            content_version: 7,
            localizations: localizations(),
        }
    }

    fn skill(id: &str) -> SkillSummaryDto {
        SkillSummaryDto {
            id: id.to_string(),
            name: SubtitledTextDto::new("name"),
            content_version: 3,
            localizations: localizations(),
        }
    }

    fn topic(id: &str, chapters: &[&str], skills: &[&str]) -> DownloadableTopicSummaryDto {
        DownloadableTopicSummaryDto {
            id: id.to_string(),
            name: SubtitledTextDto::new("name"),
            description: SubtitledTextDto::new("description"),
            content_version: 1,
            localizations: localizations(),
            story_summaries: vec![StorySummaryDto {
                id: format!("{id}_story"),
                title: SubtitledTextDto::new("title"),
                description: SubtitledTextDto::new("description"),
                content_version: 1,
                chapters: chapters.iter().map(|id| chapter(id)).collect(),
                localizations: localizations(),
            }],
            subtopic_summaries: vec![subtopic(1, skills), subtopic(2, &[])],
            referenced_skills: skills.iter().map(|id| skill(id)).collect(),
        }
    }

    fn count(identifiers: &[DownloadRequestStructureIdentifier], kind: StructureKind) -> usize {
        identifiers.iter().filter(|id| id.kind() == kind).count()
    }

    #[test]
    fn test_single_topic_with_one_additional_language() {
        let generator =
            ContentIdentifierGenerator::new(LanguageType::English, vec![LanguageType::Arabic]);
        let identifiers =
            generator.build_identifiers(&[topic("X", &["exp_1", "exp_2"], &["skill_1"])]);

        assert_eq!(count(&identifiers, StructureKind::RevisionCard), 2);
        assert_eq!(count(&identifiers, StructureKind::RevisionCardLanguagePack), 2);
        assert_eq!(count(&identifiers, StructureKind::Exploration), 2);
        assert_eq!(count(&identifiers, StructureKind::ExplorationLanguagePack), 2);
        assert_eq!(count(&identifiers, StructureKind::ConceptCard), 1);
        assert_eq!(count(&identifiers, StructureKind::ConceptCardLanguagePack), 1);
        assert_eq!(count(&identifiers, StructureKind::TopicSummary), 0);
        assert_eq!(identifiers.len(), 10);
    }

    #[test]
    fn test_language_packs_precede_default_structure() {
        let generator = ContentIdentifierGenerator::new(
            LanguageType::English,
            vec![LanguageType::Arabic, LanguageType::Swahili],
        );
        let identifiers = generator.build_identifiers(&[topic("X", &[], &[])]);

        let first_card: Vec<_> = identifiers[..3].iter().map(|id| (id.kind(), id.language())).collect();
        assert_eq!(
            first_card,
            vec![
                (StructureKind::RevisionCardLanguagePack, Some(LanguageType::Arabic)),
                (StructureKind::RevisionCardLanguagePack, Some(LanguageType::Swahili)),
                (StructureKind::RevisionCard, Some(LanguageType::English)),
            ]
        );
        assert!(identifiers.iter().all(|id| id.content_version == 2));
    }

    #[test]
    fn test_shared_structures_are_deduplicated() {
        let generator =
            ContentIdentifierGenerator::new(LanguageType::English, vec![LanguageType::Arabic]);
        let identifiers = generator.build_identifiers(&[
            topic("X", &["shared_exp"], &["shared_skill"]),
            topic("Y", &["shared_exp"], &["shared_skill", "other_skill"]),
        ]);

        assert_eq!(count(&identifiers, StructureKind::Exploration), 1);
        assert_eq!(count(&identifiers, StructureKind::ConceptCard), 2);
        let unique: HashSet<_> = identifiers.iter().collect();
        assert_eq!(unique.len(), identifiers.len());
    }

    #[test]
    fn test_identifier_set_is_order_independent() {
        let generator = ContentIdentifierGenerator::default();
        let x = topic("X", &["exp_1"], &["skill_1", "skill_2"]);
        let y = topic("Y", &["exp_2", "exp_1"], &["skill_2"]);

        let forward: HashSet<_> = generator
            .build_identifiers(&[x.clone(), y.clone()])
            .into_iter()
            .collect();
        let backward: HashSet<_> = generator.build_identifiers(&[y, x]).into_iter().collect();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_topic_summaries_are_opt_in() {
        let generator = ContentIdentifierGenerator::new(LanguageType::English, Vec::new())
            .with_topic_summaries(true);
        let identifiers = generator.build_identifiers(&[topic("X", &["exp_1"], &[])]);

        let last = identifiers.last().unwrap();
        assert_eq!(
            last.structure_type,
            StructureType::TopicSummaryId("X".to_string())
        );
        assert_eq!(last.content_version, 1);
    }
}
