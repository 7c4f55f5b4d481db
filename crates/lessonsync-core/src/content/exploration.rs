use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::{
    RecordedVoiceovers, SubtitledHtml, SubtitledUnicode, WrittenTranslations,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exploration {
    pub id: String,
    pub states: BTreeMap<String, State>,
    pub init_state_name: String,
    pub language_code: String,
    pub version: u32,
    pub translatable_title: SubtitledHtml,
    pub written_translations: WrittenTranslations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub content: SubtitledHtml,
    pub interaction: Interaction,
    pub recorded_voiceovers: RecordedVoiceovers,
    pub written_translations: WrittenTranslations,
}

/// A state's interaction, normalized to string-keyed arguments and rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub answer_groups: Vec<AnswerGroup>,
    pub solution: Option<Solution>,
    pub hints: Vec<Hint>,
    pub default_outcome: Option<Outcome>,
    pub customization_args: BTreeMap<String, SchemaObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerGroup {
    pub tagged_skill_misconception: Option<Misconception>,
    pub outcome: Outcome,
    pub rule_specs: Vec<RuleSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misconception {
    pub skill_id: String,
    pub misconception_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub dest_state_name: String,
    pub feedback: SubtitledHtml,
    pub labelled_as_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub hint_content: SubtitledHtml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub explanation: Option<SubtitledHtml>,
    pub correct_answer: InteractionObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub rule_type: String,
    pub inputs: BTreeMap<String, InteractionObject>,
}

impl RuleSpec {
    pub fn new<I, K>(rule_type: impl Into<String>, inputs: I) -> Self
    where
        I: IntoIterator<Item = (K, InteractionObject)>,
        K: Into<String>,
    {
        Self {
            rule_type: rule_type.into(),
            inputs: inputs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub is_negative: bool,
    pub whole_number: u32,
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatableSetOfNormalizedString {
    pub content_id: String,
    pub normalized_strings: Vec<String>,
}

/// A typed rule input or answer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionObject {
    NormalizedString(String),
    SignedInt(i32),
    NonNegativeInt(u32),
    Real(f64),
    Fraction(Fraction),
    RatioExpression(Vec<u32>),
    TranslatableSetOfNormalizedString(TranslatableSetOfNormalizedString),
    TranslatableHtmlContentId(String),
    SetOfTranslatableHtmlContentIds(Vec<String>),
    ListOfSetsOfTranslatableHtmlContentIds(Vec<Vec<String>>),
    MathExpression(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRectangle2d {
    pub upper_left: Point2d,
    pub lower_right: Point2d,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRegion {
    pub label: String,
    pub region: NormalizedRectangle2d,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageWithRegions {
    pub image_path: String,
    pub labeled_regions: Vec<LabeledRegion>,
}

/// A customization argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaObject {
    SubtitledUnicode(SubtitledUnicode),
    SubtitledHtml(SubtitledHtml),
    ImageWithRegions(ImageWithRegions),
    BoolValue(bool),
    SignedInt(i32),
    NormalizedString(String),
    SchemaObjectList(Vec<SchemaObject>),
}
