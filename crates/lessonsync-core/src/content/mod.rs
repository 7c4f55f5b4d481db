//! Normalized content model persisted for on-device use.
//!
//! Translations and voiceovers are keyed `{content_id -> {language -> value}}`,
//! the inverse of the wire's per-language packs.

mod common;
mod exploration;
mod topic;

pub use common::{
    LessonThumbnail, RecordedVoiceovers, SubtitledHtml, SubtitledUnicode, Translation,
    TranslationMapping, Voiceover, VoiceoverMapping, WrittenTranslations,
};
pub use exploration::{
    AnswerGroup, Exploration, Fraction, Hint, ImageWithRegions, Interaction, InteractionObject,
    LabeledRegion, Misconception, NormalizedRectangle2d, Outcome, Point2d, RuleSpec,
    SchemaObject, Solution, State, TranslatableSetOfNormalizedString,
};
pub use topic::{
    ChapterRecord, ConceptCard, ConceptCardList, StoryRecord, SubtopicRecord, TopicIdList,
    TopicRecord,
};
