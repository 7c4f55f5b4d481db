//! Explorations, their states, and the building blocks shared by every interaction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::interaction::InteractionInstanceDto;
use super::localization::{ContentLocalizationDto, SubtitledTextDto};
use crate::language::LanguageType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationDto {
    pub id: String,
    pub title: SubtitledTextDto,
    pub init_state_name: String,
    pub states: BTreeMap<String, StateDto>,
    pub default_localization: ContentLocalizationDto,
    pub content_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedExplorationIdDto {
    pub exploration_id: String,
    pub language: LanguageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationLanguagePackDto {
    pub id: LocalizedExplorationIdDto,
    pub localization: ContentLocalizationDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDto {
    pub content: SubtitledTextDto,
    pub interaction: InteractionInstanceDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDto {
    pub destination_state: String,
    pub feedback: SubtitledTextDto,
    #[serde(default)]
    pub labelled_as_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisconceptionDto {
    pub skill_id: String,
    pub misconception_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintDto {
    pub hint_content: SubtitledTextDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAnswerGroupDto {
    pub outcome: OutcomeDto,
    #[serde(default)]
    pub tagged_skill_misconception: Option<MisconceptionDto>,
}

/// An answer group whose rules are drawn from the interaction-specific rule union `R`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerGroupDto<R> {
    pub base_answer_group: BaseAnswerGroupDto,
    #[serde(default = "Vec::new")]
    pub rule_specs: Vec<RuleSpecDto<R>>,
}

/// Wrapper around one rule of union `R`; an absent `rule_type` is a malformed rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpecDto<R> {
    #[serde(default = "Option::default")]
    pub rule_type: Option<R>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSolutionDto {
    #[serde(default)]
    pub explanation: Option<SubtitledTextDto>,
}

/// A worked solution whose answer has the interaction-specific type `A`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionDto<A> {
    #[serde(default = "BaseSolutionDto::default")]
    pub base_solution: BaseSolutionDto,
    pub correct_answer: A,
}
