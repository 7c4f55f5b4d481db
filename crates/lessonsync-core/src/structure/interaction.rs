//! Interaction instances, their customization arguments and rule unions.
//!
//! Every interaction kind shares the shape of [`InteractionDto`]; they differ in
//! their customization arguments `C`, their rule union `R` and the type `S` of a
//! solution's correct answer. Kinds without a solution use [`NoSolution`].

use serde::{Deserialize, Serialize};

use super::exploration::{AnswerGroupDto, HintDto, OutcomeDto, SolutionDto};
use super::localization::SubtitledTextDto;

/// Interaction attached to a state. An absent `interaction_type` is malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionInstanceDto {
    #[serde(default)]
    pub interaction_type: Option<InteractionTypeDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionTypeDto {
    ContinueInstance(ContinueInstanceDto),
    FractionInput(FractionInputInstanceDto),
    ItemSelectionInput(ItemSelectionInputInstanceDto),
    MultipleChoiceInput(MultipleChoiceInputInstanceDto),
    NumericInput(NumericInputInstanceDto),
    TextInput(TextInputInstanceDto),
    DragAndDropSortInput(DragAndDropSortInputInstanceDto),
    ImageClickInput(ImageClickInputInstanceDto),
    RatioExpressionInput(RatioExpressionInputInstanceDto),
    AlgebraicExpressionInput(AlgebraicExpressionInputInstanceDto),
    MathEquationInput(MathEquationInputInstanceDto),
    NumericExpressionInput(NumericExpressionInputInstanceDto),
    EndExploration,
}

/// Shared shape of every answerable interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDto<C, R, S> {
    pub customization_args: C,
    #[serde(default = "Vec::new")]
    pub answer_groups: Vec<AnswerGroupDto<R>>,
    #[serde(default = "Option::default")]
    pub solution: Option<SolutionDto<S>>,
    #[serde(default = "Vec::new")]
    pub hints: Vec<HintDto>,
    pub default_outcome: OutcomeDto,
}

/// Answer type of interactions that never carry a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoSolution {}

/// Rule union of interactions that have no rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoRules {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoCustomizationArgsDto {}

pub type ContinueInstanceDto = InteractionDto<ContinueArgsDto, NoRules, NoSolution>;
pub type FractionInputInstanceDto = InteractionDto<FractionInputArgsDto, FractionRuleDto, FractionDto>;
pub type ItemSelectionInputInstanceDto =
    InteractionDto<ItemSelectionInputArgsDto, ItemSelectionRuleDto, NoSolution>;
pub type MultipleChoiceInputInstanceDto =
    InteractionDto<MultipleChoiceInputArgsDto, MultipleChoiceRuleDto, NoSolution>;
pub type NumericInputInstanceDto = InteractionDto<NoCustomizationArgsDto, NumericInputRuleDto, f64>;
pub type TextInputInstanceDto = InteractionDto<TextInputArgsDto, TextInputRuleDto, String>;
pub type DragAndDropSortInputInstanceDto =
    InteractionDto<DragAndDropSortInputArgsDto, DragAndDropSortRuleDto, ListOfSetsOfContentIdsDto>;
pub type ImageClickInputInstanceDto =
    InteractionDto<ImageClickInputArgsDto, ImageClickRuleDto, NoSolution>;
pub type RatioExpressionInputInstanceDto =
    InteractionDto<RatioExpressionInputArgsDto, RatioExpressionRuleDto, RatioExpressionDto>;
pub type AlgebraicExpressionInputInstanceDto =
    InteractionDto<MathExpressionInputArgsDto, MathExpressionRuleDto, String>;
pub type MathEquationInputInstanceDto =
    InteractionDto<MathExpressionInputArgsDto, MathExpressionRuleDto, String>;
pub type NumericExpressionInputInstanceDto =
    InteractionDto<NumericExpressionInputArgsDto, MathExpressionRuleDto, String>;

// ============================================================================
// Answer values
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FractionDto {
    #[serde(default)]
    pub is_negative: bool,
    #[serde(default)]
    pub whole_number: u32,
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioExpressionDto {
    pub components: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOfContentIdsDto {
    pub content_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOfSetsOfContentIdsDto {
    pub content_id_sets: Vec<SetOfContentIdsDto>,
}

/// A set of normalized strings whose values live in the localization under `content_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatableSetOfNormalizedStringDto {
    pub content_id: String,
}

// ============================================================================
// Customization arguments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueArgsDto {
    pub button_text: SubtitledTextDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractionInputArgsDto {
    #[serde(default)]
    pub requires_simplest_form: bool,
    #[serde(default)]
    pub allow_improper_fractions: bool,
    #[serde(default)]
    pub allow_nonzero_integer_part: bool,
    pub placeholder: SubtitledTextDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSelectionInputArgsDto {
    pub min_allowable_selection_count: i32,
    pub max_allowable_selection_count: i32,
    pub choices: Vec<SubtitledTextDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceInputArgsDto {
    pub choices: Vec<SubtitledTextDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputArgsDto {
    pub placeholder: SubtitledTextDto,
    pub rows: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragAndDropSortInputArgsDto {
    pub choices: Vec<SubtitledTextDto>,
    #[serde(default)]
    pub allow_multiple_items_in_same_position: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageClickInputArgsDto {
    pub image_and_regions: ImageWithRegionsDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageWithRegionsDto {
    pub image_file_path: String,
    #[serde(default)]
    pub labeled_regions: Vec<LabeledRegionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRegionDto {
    pub label: String,
    /// Only normalized rectangles are understood; anything else is absent here.
    #[serde(default)]
    pub normalized_rectangle_2d: Option<NormalizedRectangle2dDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRectangle2dDto {
    pub top_left: Point2dDto,
    pub bottom_right: Point2dDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2dDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioExpressionInputArgsDto {
    pub placeholder: SubtitledTextDto,
    pub number_of_terms: i32,
}

/// Arguments shared by algebraic expression and math equation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathExpressionInputArgsDto {
    #[serde(default)]
    pub custom_osk_letters: Vec<String>,
    #[serde(default)]
    pub use_fraction_for_division: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericExpressionInputArgsDto {
    pub placeholder: SubtitledTextDto,
    #[serde(default)]
    pub use_fraction_for_division: bool,
}

// ============================================================================
// Rule unions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionRuleDto {
    IsExactlyEqualTo { input: FractionDto },
    IsEquivalentTo { input: FractionDto },
    IsEquivalentToAndInSimplestForm { input: FractionDto },
    IsLessThan { input: FractionDto },
    IsGreaterThan { input: FractionDto },
    HasNumeratorEqualTo { input: i32 },
    HasDenominatorEqualTo { input: u32 },
    HasIntegerPartEqualTo { input: i32 },
    HasNoFractionalPart,
    HasFractionalPartExactlyEqualTo { input: FractionDto },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSelectionRuleDto {
    Equals { input: SetOfContentIdsDto },
    ContainsAtLeastOneOf { input: SetOfContentIdsDto },
    DoesNotContainAtLeastOneOf { input: SetOfContentIdsDto },
    IsProperSubsetOf { input: SetOfContentIdsDto },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultipleChoiceRuleDto {
    Equals { input: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericInputRuleDto {
    Equals { input: f64 },
    IsLessThan { input: f64 },
    IsGreaterThan { input: f64 },
    IsLessThanOrEqualTo { input: f64 },
    IsGreaterThanOrEqualTo { input: f64 },
    IsInclusivelyBetween {
        input_lower_inclusive: f64,
        input_upper_inclusive: f64,
    },
    IsWithinTolerance {
        input_tolerance: f64,
        input_compared_value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextInputRuleDto {
    Equals { input: TranslatableSetOfNormalizedStringDto },
    StartsWith { input: TranslatableSetOfNormalizedStringDto },
    Contains { input: TranslatableSetOfNormalizedStringDto },
    FuzzyEquals { input: TranslatableSetOfNormalizedStringDto },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragAndDropSortRuleDto {
    IsEqualToOrdering {
        input: ListOfSetsOfContentIdsDto,
    },
    IsEqualToOrderingWithOneItemAtIncorrectPosition {
        input: ListOfSetsOfContentIdsDto,
    },
    HasElementXAtPositionY {
        element: String,
        position: u32,
    },
    HasElementXBeforeElementY {
        considered_element: String,
        later_element: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageClickRuleDto {
    IsInRegion { input_region: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioExpressionRuleDto {
    Equals { input: RatioExpressionDto },
    IsEquivalent { input: RatioExpressionDto },
    HasNumberOfTermsEqualTo { input_term_count: u32 },
    HasSpecificTermEqualTo {
        input_term_index: u32,
        input_expected_term_value: u32,
    },
}

/// Rules shared by the algebraic expression, math equation and numeric expression inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathExpressionRuleDto {
    MatchesExactlyWith { input: String },
    MatchesUpToTrivialManipulations { input: String },
    IsEquivalentTo { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_exploration_parses_as_unit_variant() {
        let parsed: InteractionInstanceDto =
            serde_json::from_str(r#"{"interaction_type":"end_exploration"}"#).unwrap();
        assert_eq!(
            parsed.interaction_type,
            Some(InteractionTypeDto::EndExploration)
        );
    }

    #[test]
    fn test_missing_interaction_type_is_none() {
        let parsed: InteractionInstanceDto = serde_json::from_str("{}").unwrap();
        assert!(parsed.interaction_type.is_none());
    }

    #[test]
    fn test_fraction_rule_without_inputs() {
        let rule: FractionRuleDto = serde_json::from_str(r#""has_no_fractional_part""#).unwrap();
        assert_eq!(rule, FractionRuleDto::HasNoFractionalPart);
    }
}
