use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitledHtml {
    pub content_id: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitledUnicode {
    pub content_id: String,
    pub unicode_str: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Translation {
    Html(String),
    HtmlList(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voiceover {
    pub file_name: String,
    pub file_size_bytes: u64,
}

/// Language code to translation for one content id.
pub type TranslationMapping = BTreeMap<String, Translation>;
/// Language code to voiceover for one content id.
pub type VoiceoverMapping = BTreeMap<String, Voiceover>;
/// Content id to its per-language translations.
pub type WrittenTranslations = BTreeMap<String, TranslationMapping>;
/// Content id to its per-language voiceovers.
pub type RecordedVoiceovers = BTreeMap<String, VoiceoverMapping>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonThumbnail {
    pub thumbnail_filename: String,
    pub background_color_rgb: u32,
}
