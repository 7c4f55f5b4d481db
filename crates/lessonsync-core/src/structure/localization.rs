//! Per-language content bundles attached to every wire structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::language::LanguageType;

/// Reference to one translatable unit of text inside a structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubtitledTextDto {
    pub content_id: String,
}

impl SubtitledTextDto {
    pub fn new(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
        }
    }
}

/// Localized text for a content id: either one string or a set of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalizableTextDto {
    SingleLocalizableText { text: String },
    SetOfLocalizableText { texts: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceoverFileDto {
    pub filename: String,
    pub file_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferencedImageDto {
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedImageListDto {
    #[serde(default)]
    pub referenced_images: Vec<ReferencedImageDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailDto {
    pub referenced_image: ReferencedImageDto,
    pub background_color_rgb: u32,
}

/// All localized content of one structure for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLocalizationDto {
    pub language: LanguageType,
    #[serde(default)]
    pub localizable_text_content_mapping: BTreeMap<String, LocalizableTextDto>,
    #[serde(default)]
    pub voiceover_content_mapping: BTreeMap<String, VoiceoverFileDto>,
    #[serde(default)]
    pub localized_image_list: ReferencedImageListDto,
    #[serde(default)]
    pub thumbnail: Option<ThumbnailDto>,
}

impl ContentLocalizationDto {
    /// An empty localization for `language`.
    pub const fn empty(language: LanguageType) -> Self {
        Self {
            language,
            localizable_text_content_mapping: BTreeMap::new(),
            voiceover_content_mapping: BTreeMap::new(),
            localized_image_list: ReferencedImageListDto {
                referenced_images: Vec::new(),
            },
            thumbnail: None,
        }
    }
}

/// Default localization plus any number of additional-language localizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLocalizationsDto {
    pub default_mapping: ContentLocalizationDto,
    #[serde(default)]
    pub localizations: Vec<ContentLocalizationDto>,
}

impl ContentLocalizationsDto {
    /// Iterates the default mapping followed by every additional localization.
    pub fn all(&self) -> impl Iterator<Item = &ContentLocalizationDto> {
        std::iter::once(&self.default_mapping).chain(self.localizations.iter())
    }
}
