use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::{LanguageType, UnspecifiedLanguageError};
use crate::structure::{
    LocalizedConceptCardIdDto, LocalizedExplorationIdDto, LocalizedRevisionCardIdDto,
};

/// A typed, versioned reference to one fetchable unit of content.
///
/// Equality and hashing cover both the structure and its content version, so
/// identifiers can be de-duplicated by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DownloadRequestStructureIdentifier {
    pub content_version: u32,
    pub structure_type: StructureType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    TopicSummaryId(String),
    RevisionCard(LocalizedRevisionCardIdDto),
    ConceptCard(LocalizedConceptCardIdDto),
    Exploration(LocalizedExplorationIdDto),
    RevisionCardLanguagePack(LocalizedRevisionCardIdDto),
    ConceptCardLanguagePack(LocalizedConceptCardIdDto),
    ExplorationLanguagePack(LocalizedExplorationIdDto),
}

/// Payload-free discriminant of [`StructureType`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    TopicSummary,
    RevisionCard,
    ConceptCard,
    Exploration,
    RevisionCardLanguagePack,
    ConceptCardLanguagePack,
    ExplorationLanguagePack,
}

impl StructureKind {
    pub const ALL: [Self; 7] = [
        Self::TopicSummary,
        Self::RevisionCard,
        Self::ConceptCard,
        Self::Exploration,
        Self::RevisionCardLanguagePack,
        Self::ConceptCardLanguagePack,
        Self::ExplorationLanguagePack,
    ];

    /// Whether results of this kind are broken down per language.
    pub const fn is_language_pack(self) -> bool {
        matches!(
            self,
            Self::RevisionCardLanguagePack
                | Self::ConceptCardLanguagePack
                | Self::ExplorationLanguagePack
        )
    }

    /// Plural, human-readable name used in reports.
    pub const fn display_plural(self) -> &'static str {
        match self {
            Self::TopicSummary => "topics",
            Self::RevisionCard => "revision cards",
            Self::ConceptCard => "concept cards",
            Self::Exploration => "explorations",
            Self::RevisionCardLanguagePack => "revision card language packs",
            Self::ConceptCardLanguagePack => "concept card language packs",
            Self::ExplorationLanguagePack => "exploration language packs",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_plural())
    }
}

impl DownloadRequestStructureIdentifier {
    pub const fn new(content_version: u32, structure_type: StructureType) -> Self {
        Self {
            content_version,
            structure_type,
        }
    }

    pub const fn kind(&self) -> StructureKind {
        match &self.structure_type {
            StructureType::TopicSummaryId(_) => StructureKind::TopicSummary,
            StructureType::RevisionCard(_) => StructureKind::RevisionCard,
            StructureType::ConceptCard(_) => StructureKind::ConceptCard,
            StructureType::Exploration(_) => StructureKind::Exploration,
            StructureType::RevisionCardLanguagePack(_) => StructureKind::RevisionCardLanguagePack,
            StructureType::ConceptCardLanguagePack(_) => StructureKind::ConceptCardLanguagePack,
            StructureType::ExplorationLanguagePack(_) => StructureKind::ExplorationLanguagePack,
        }
    }

    /// Language of the identified structure; topic summaries carry none.
    pub const fn language(&self) -> Option<LanguageType> {
        match &self.structure_type {
            StructureType::TopicSummaryId(_) => None,
            StructureType::RevisionCard(id) | StructureType::RevisionCardLanguagePack(id) => {
                Some(id.language)
            }
            StructureType::ConceptCard(id) | StructureType::ConceptCardLanguagePack(id) => {
                Some(id.language)
            }
            StructureType::Exploration(id) | StructureType::ExplorationLanguagePack(id) => {
                Some(id.language)
            }
        }
    }

    /// Stable, file-name-safe name for the identified structure.
    ///
    /// Subtopics collapse to `{topic_id}_{index}`; localized structures append
    /// the language's collapse code.
    pub fn base_name(&self) -> Result<String, UnspecifiedLanguageError> {
        let name = match &self.structure_type {
            StructureType::TopicSummaryId(topic_id) => format!("topic_summary_{topic_id}"),
            StructureType::RevisionCard(id) => format!(
                "revision_card_{}_{}_{}",
                id.id.topic_id,
                id.id.subtopic_index,
                id.language.collapse_code()?
            ),
            StructureType::RevisionCardLanguagePack(id) => format!(
                "revision_card_language_pack_{}_{}_{}",
                id.id.topic_id,
                id.id.subtopic_index,
                id.language.collapse_code()?
            ),
            StructureType::ConceptCard(id) => {
                format!("concept_card_{}_{}", id.skill_id, id.language.collapse_code()?)
            }
            StructureType::ConceptCardLanguagePack(id) => format!(
                "concept_card_language_pack_{}_{}",
                id.skill_id,
                id.language.collapse_code()?
            ),
            StructureType::Exploration(id) => format!(
                "exploration_{}_{}",
                id.exploration_id,
                id.language.collapse_code()?
            ),
            StructureType::ExplorationLanguagePack(id) => format!(
                "exploration_language_pack_{}_{}",
                id.exploration_id,
                id.language.collapse_code()?
            ),
        };
        Ok(name)
    }
}

impl fmt::Display for DownloadRequestStructureIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base_name() {
            Ok(name) => write!(f, "{name}@v{}", self.content_version),
            Err(_) => write!(f, "{:?}@v{}", self.structure_type, self.content_version),
        }
    }
}
