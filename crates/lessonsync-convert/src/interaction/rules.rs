use lessonsync_core::content::{InteractionObject, RuleSpec, TranslatableSetOfNormalizedString};
use lessonsync_core::structure::{
    DragAndDropSortRuleDto, FractionDto, FractionRuleDto, ImageClickRuleDto, ItemSelectionRuleDto,
    MathExpressionRuleDto, MultipleChoiceRuleDto, NoRules, NumericInputRuleDto,
    RatioExpressionRuleDto, TextInputRuleDto, TranslatableSetOfNormalizedStringDto,
};

use super::{to_fraction, to_list_of_sets, to_ratio};
use crate::error::ConvertResult;
use crate::tracker::ContentIdTracker;

/// A rule union that converts into a named rule with typed inputs.
pub(crate) trait RuleConversion {
    fn to_rule_spec(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec>;
}

fn rule<const N: usize>(rule_type: &str, inputs: [(&str, InteractionObject); N]) -> RuleSpec {
    RuleSpec::new(rule_type, inputs)
}

impl RuleConversion for NoRules {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        match *self {}
    }
}

impl RuleConversion for FractionRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let fraction = |input: &FractionDto| InteractionObject::Fraction(to_fraction(input));
        Ok(match self {
            Self::IsExactlyEqualTo { input } => rule("IsExactlyEqualTo", [("f", fraction(input))]),
            Self::IsEquivalentTo { input } => rule("IsEquivalentTo", [("f", fraction(input))]),
            Self::IsEquivalentToAndInSimplestForm { input } => {
                rule("IsEquivalentToAndInSimplestForm", [("f", fraction(input))])
            }
            Self::IsLessThan { input } => rule("IsLessThan", [("f", fraction(input))]),
            Self::IsGreaterThan { input } => rule("IsGreaterThan", [("f", fraction(input))]),
            Self::HasNumeratorEqualTo { input } => {
                rule("HasNumeratorEqualTo", [("x", InteractionObject::SignedInt(*input))])
            }
            Self::HasDenominatorEqualTo { input } => rule(
                "HasDenominatorEqualTo",
                [("x", InteractionObject::NonNegativeInt(*input))],
            ),
            Self::HasIntegerPartEqualTo { input } => {
                rule("HasIntegerPartEqualTo", [("x", InteractionObject::SignedInt(*input))])
            }
            Self::HasNoFractionalPart => rule("HasNoFractionalPart", []),
            Self::HasFractionalPartExactlyEqualTo { input } => {
                rule("HasFractionalPartExactlyEqualTo", [("f", fraction(input))])
            }
        })
    }
}

impl RuleConversion for ItemSelectionRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let (rule_type, input) = match self {
            Self::Equals { input } => ("Equals", input),
            Self::ContainsAtLeastOneOf { input } => ("ContainsAtLeastOneOf", input),
            Self::DoesNotContainAtLeastOneOf { input } => ("DoesNotContainAtLeastOneOf", input),
            Self::IsProperSubsetOf { input } => ("IsProperSubsetOf", input),
        };
        let ids = InteractionObject::SetOfTranslatableHtmlContentIds(input.content_ids.clone());
        Ok(rule(rule_type, [("x", ids)]))
    }
}

impl RuleConversion for MultipleChoiceRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let Self::Equals { input } = self;
        Ok(rule("Equals", [("x", InteractionObject::NonNegativeInt(*input))]))
    }
}

impl RuleConversion for NumericInputRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let real = InteractionObject::Real;
        Ok(match self {
            Self::Equals { input } => rule("Equals", [("x", real(*input))]),
            Self::IsLessThan { input } => rule("IsLessThan", [("x", real(*input))]),
            Self::IsGreaterThan { input } => rule("IsGreaterThan", [("x", real(*input))]),
            Self::IsLessThanOrEqualTo { input } => {
                rule("IsLessThanOrEqualTo", [("x", real(*input))])
            }
            Self::IsGreaterThanOrEqualTo { input } => {
                rule("IsGreaterThanOrEqualTo", [("x", real(*input))])
            }
            Self::IsInclusivelyBetween {
                input_lower_inclusive,
                input_upper_inclusive,
            } => rule(
                "IsInclusivelyBetween",
                [
                    ("a", real(*input_lower_inclusive)),
                    ("b", real(*input_upper_inclusive)),
                ],
            ),
            Self::IsWithinTolerance {
                input_tolerance,
                input_compared_value,
            } => rule(
                "IsWithinTolerance",
                [
                    ("tol", real(*input_tolerance)),
                    ("x", real(*input_compared_value)),
                ],
            ),
        })
    }
}

impl RuleConversion for TextInputRuleDto {
    fn to_rule_spec(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let (rule_type, input) = match self {
            Self::Equals { input } => ("Equals", input),
            Self::StartsWith { input } => ("StartsWith", input),
            Self::Contains { input } => ("Contains", input),
            Self::FuzzyEquals { input } => ("FuzzyEquals", input),
        };
        let strings = translatable_strings(input, tracker)?;
        Ok(rule(rule_type, [("x", strings)]))
    }
}

fn translatable_strings(
    input: &TranslatableSetOfNormalizedStringDto,
    tracker: &mut ContentIdTracker<'_>,
) -> ConvertResult<InteractionObject> {
    Ok(InteractionObject::TranslatableSetOfNormalizedString(
        TranslatableSetOfNormalizedString {
            content_id: input.content_id.clone(),
            normalized_strings: tracker.extract_string_list(&input.content_id)?,
        },
    ))
}

impl RuleConversion for DragAndDropSortRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let content_id = |id: &String| InteractionObject::TranslatableHtmlContentId(id.clone());
        Ok(match self {
            Self::IsEqualToOrdering { input } => rule(
                "IsEqualToOrdering",
                [(
                    "x",
                    InteractionObject::ListOfSetsOfTranslatableHtmlContentIds(to_list_of_sets(input)),
                )],
            ),
            Self::IsEqualToOrderingWithOneItemAtIncorrectPosition { input } => rule(
                "IsEqualToOrderingWithOneItemAtIncorrectPosition",
                [(
                    "x",
                    InteractionObject::ListOfSetsOfTranslatableHtmlContentIds(to_list_of_sets(input)),
                )],
            ),
            Self::HasElementXAtPositionY { element, position } => rule(
                "HasElementXAtPositionY",
                [
                    ("x", content_id(element)),
                    ("y", InteractionObject::NonNegativeInt(*position)),
                ],
            ),
            Self::HasElementXBeforeElementY {
                considered_element,
                later_element,
            } => rule(
                "HasElementXBeforeElementY",
                [
                    ("x", content_id(considered_element)),
                    ("y", content_id(later_element)),
                ],
            ),
        })
    }
}

impl RuleConversion for ImageClickRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let Self::IsInRegion { input_region } = self;
        Ok(rule(
            "IsInRegion",
            [("x", InteractionObject::NormalizedString(input_region.clone()))],
        ))
    }
}

impl RuleConversion for RatioExpressionRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        Ok(match self {
            Self::Equals { input } => rule(
                "Equals",
                [("x", InteractionObject::RatioExpression(to_ratio(input)))],
            ),
            Self::IsEquivalent { input } => rule(
                "IsEquivalent",
                [("x", InteractionObject::RatioExpression(to_ratio(input)))],
            ),
            Self::HasNumberOfTermsEqualTo { input_term_count } => rule(
                "HasNumberOfTermsEqualTo",
                [("y", InteractionObject::NonNegativeInt(*input_term_count))],
            ),
            Self::HasSpecificTermEqualTo {
                input_term_index,
                input_expected_term_value,
            } => rule(
                "HasSpecificTermEqualTo",
                [
                    ("x", InteractionObject::NonNegativeInt(*input_term_index)),
                    ("y", InteractionObject::NonNegativeInt(*input_expected_term_value)),
                ],
            ),
        })
    }
}

impl RuleConversion for MathExpressionRuleDto {
    fn to_rule_spec(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<RuleSpec> {
        let (rule_type, input) = match self {
            Self::MatchesExactlyWith { input } => ("MatchesExactlyWith", input),
            Self::MatchesUpToTrivialManipulations { input } => {
                ("MatchesUpToTrivialManipulations", input)
            }
            Self::IsEquivalentTo { input } => ("IsEquivalentTo", input),
        };
        Ok(rule(
            rule_type,
            [("x", InteractionObject::MathExpression(input.clone()))],
        ))
    }
}
