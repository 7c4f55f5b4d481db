//! Interaction conversion.
//!
//! Every answerable interaction shares one shape on the wire
//! ([`InteractionDto`]); the per-interaction pieces are its customization
//! arguments, its rule union and its solution answer type. Those are handled
//! by [`CustomizationArgs`] and [`RuleConversion`] implementations plus an
//! answer closure passed to [`convert_answerable`].

mod args;
mod rules;

use std::collections::BTreeMap;

use lessonsync_core::content::{
    AnswerGroup, Fraction, Hint, Interaction, InteractionObject, Misconception, Outcome,
    RuleSpec, SchemaObject, Solution,
};
use lessonsync_core::structure::{
    AnswerGroupDto, FractionDto, HintDto, InteractionDto, InteractionInstanceDto,
    InteractionTypeDto, ListOfSetsOfContentIdsDto, MisconceptionDto, NoSolution, OutcomeDto,
    RatioExpressionDto, SolutionDto, SubtitledTextDto,
};

use crate::error::{ConvertError, ConvertResult};
use crate::tracker::ContentIdTracker;

pub(crate) use args::CustomizationArgs;
pub(crate) use rules::RuleConversion;

pub const CONTINUE: &str = "Continue";
pub const FRACTION_INPUT: &str = "FractionInput";
pub const ITEM_SELECTION_INPUT: &str = "ItemSelectionInput";
pub const MULTIPLE_CHOICE_INPUT: &str = "MultipleChoiceInput";
pub const NUMERIC_INPUT: &str = "NumericInput";
pub const TEXT_INPUT: &str = "TextInput";
pub const DRAG_AND_DROP_SORT_INPUT: &str = "DragAndDropSortInput";
pub const IMAGE_CLICK_INPUT: &str = "ImageClickInput";
pub const RATIO_EXPRESSION_INPUT: &str = "RatioExpressionInput";
pub const ALGEBRAIC_EXPRESSION_INPUT: &str = "AlgebraicExpressionInput";
pub const MATH_EQUATION_INPUT: &str = "MathEquationInput";
pub const NUMERIC_EXPRESSION_INPUT: &str = "NumericExpressionInput";
pub const END_EXPLORATION: &str = "EndExploration";

/// Converts the interaction of the state named `state_name`.
pub(crate) fn convert_interaction(
    instance: &InteractionInstanceDto,
    state_name: &str,
    tracker: &mut ContentIdTracker<'_>,
) -> ConvertResult<Interaction> {
    let Some(interaction_type) = &instance.interaction_type else {
        return Err(ConvertError::UnsetInteraction {
            state_name: state_name.to_string(),
        });
    };

    match interaction_type {
        InteractionTypeDto::ContinueInstance(dto) => {
            convert_answerable(CONTINUE, dto, tracker, unreachable_answer)
        }
        InteractionTypeDto::FractionInput(dto) => {
            convert_answerable(FRACTION_INPUT, dto, tracker, |answer| {
                InteractionObject::Fraction(to_fraction(answer))
            })
        }
        InteractionTypeDto::ItemSelectionInput(dto) => {
            convert_answerable(ITEM_SELECTION_INPUT, dto, tracker, unreachable_answer)
        }
        InteractionTypeDto::MultipleChoiceInput(dto) => {
            convert_answerable(MULTIPLE_CHOICE_INPUT, dto, tracker, unreachable_answer)
        }
        InteractionTypeDto::NumericInput(dto) => {
            convert_answerable(NUMERIC_INPUT, dto, tracker, |answer| {
                InteractionObject::Real(*answer)
            })
        }
        InteractionTypeDto::TextInput(dto) => convert_answerable(TEXT_INPUT, dto, tracker, |answer| {
            InteractionObject::NormalizedString(answer.clone())
        }),
        InteractionTypeDto::DragAndDropSortInput(dto) => {
            convert_answerable(DRAG_AND_DROP_SORT_INPUT, dto, tracker, |answer| {
                InteractionObject::ListOfSetsOfTranslatableHtmlContentIds(to_list_of_sets(answer))
            })
        }
        InteractionTypeDto::ImageClickInput(dto) => {
            convert_answerable(IMAGE_CLICK_INPUT, dto, tracker, unreachable_answer)
        }
        InteractionTypeDto::RatioExpressionInput(dto) => {
            convert_answerable(RATIO_EXPRESSION_INPUT, dto, tracker, |answer| {
                InteractionObject::RatioExpression(to_ratio(answer))
            })
        }
        InteractionTypeDto::AlgebraicExpressionInput(dto) => {
            convert_answerable(ALGEBRAIC_EXPRESSION_INPUT, dto, tracker, math_answer)
        }
        InteractionTypeDto::MathEquationInput(dto) => {
            convert_answerable(MATH_EQUATION_INPUT, dto, tracker, math_answer)
        }
        InteractionTypeDto::NumericExpressionInput(dto) => {
            convert_answerable(NUMERIC_EXPRESSION_INPUT, dto, tracker, math_answer)
        }
        InteractionTypeDto::EndExploration => Ok(Interaction {
            id: END_EXPLORATION.to_string(),
            ..Interaction::default()
        }),
    }
}

/// Converts an interaction with arguments `C`, rules `R` and answers `S`.
fn convert_answerable<C, R, S>(
    id: &'static str,
    dto: &InteractionDto<C, R, S>,
    tracker: &mut ContentIdTracker<'_>,
    answer: impl Fn(&S) -> InteractionObject,
) -> ConvertResult<Interaction>
where
    C: CustomizationArgs,
    R: RuleConversion,
{
    let answer_groups = dto
        .answer_groups
        .iter()
        .map(|group| convert_answer_group(id, group, tracker))
        .collect::<ConvertResult<Vec<_>>>()?;
    let solution = dto
        .solution
        .as_ref()
        .map(|solution| convert_solution(solution, tracker, &answer))
        .transpose()?;
    let hints = dto
        .hints
        .iter()
        .map(|hint| convert_hint(hint, tracker))
        .collect::<ConvertResult<Vec<_>>>()?;
    let default_outcome = convert_outcome(&dto.default_outcome, tracker)?;
    let customization_args = dto.customization_args.to_schema_objects(tracker)?;

    Ok(Interaction {
        id: id.to_string(),
        answer_groups,
        solution,
        hints,
        default_outcome: Some(default_outcome),
        customization_args,
    })
}

fn convert_answer_group<R: RuleConversion>(
    interaction_id: &'static str,
    group: &AnswerGroupDto<R>,
    tracker: &mut ContentIdTracker<'_>,
) -> ConvertResult<AnswerGroup> {
    let base = &group.base_answer_group;
    let outcome = convert_outcome(&base.outcome, tracker)?;
    let rule_specs = group
        .rule_specs
        .iter()
        .map(|spec| match &spec.rule_type {
            Some(rule) => rule.to_rule_spec(tracker),
            None => Err(ConvertError::UnsetRule { interaction_id }),
        })
        .collect::<ConvertResult<Vec<RuleSpec>>>()?;

    Ok(AnswerGroup {
        tagged_skill_misconception: base.tagged_skill_misconception.as_ref().map(to_misconception),
        outcome,
        rule_specs,
    })
}

fn convert_solution<S>(
    solution: &SolutionDto<S>,
    tracker: &mut ContentIdTracker<'_>,
    answer: &impl Fn(&S) -> InteractionObject,
) -> ConvertResult<Solution> {
    let explanation = solution
        .base_solution
        .explanation
        .as_ref()
        .map(|explanation| tracker.extract_subtitled_html(explanation))
        .transpose()?;
    Ok(Solution {
        explanation,
        correct_answer: answer(&solution.correct_answer),
    })
}

fn convert_hint(hint: &HintDto, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<Hint> {
    Ok(Hint {
        hint_content: tracker.extract_subtitled_html(&hint.hint_content)?,
    })
}

fn convert_outcome(outcome: &OutcomeDto, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<Outcome> {
    Ok(Outcome {
        dest_state_name: outcome.destination_state.clone(),
        feedback: tracker.extract_subtitled_html(&outcome.feedback)?,
        labelled_as_correct: outcome.labelled_as_correct,
    })
}

fn to_misconception(misconception: &MisconceptionDto) -> Misconception {
    Misconception {
        skill_id: misconception.skill_id.clone(),
        misconception_id: misconception.misconception_id.clone(),
    }
}

pub(crate) const fn to_fraction(fraction: &FractionDto) -> Fraction {
    Fraction {
        is_negative: fraction.is_negative,
        whole_number: fraction.whole_number,
        numerator: fraction.numerator,
        denominator: fraction.denominator,
    }
}

pub(crate) fn to_ratio(ratio: &RatioExpressionDto) -> Vec<u32> {
    ratio.components.clone()
}

pub(crate) fn to_list_of_sets(list: &ListOfSetsOfContentIdsDto) -> Vec<Vec<String>> {
    list.content_id_sets
        .iter()
        .map(|set| set.content_ids.clone())
        .collect()
}

#[allow(clippy::ptr_arg)]
fn math_answer(answer: &String) -> InteractionObject {
    InteractionObject::MathExpression(answer.clone())
}

fn unreachable_answer(answer: &NoSolution) -> InteractionObject {
    match *answer {}
}

/// Converts a list of choices into a schema list of html values.
pub(crate) fn html_choices(
    choices: &[SubtitledTextDto],
    tracker: &mut ContentIdTracker<'_>,
) -> ConvertResult<SchemaObject> {
    let choices = choices
        .iter()
        .map(|choice| tracker.extract_subtitled_html(choice).map(SchemaObject::SubtitledHtml))
        .collect::<ConvertResult<Vec<_>>>()?;
    Ok(SchemaObject::SchemaObjectList(choices))
}

/// Customization arguments keyed by argument name.
pub(crate) type SchemaArgs = BTreeMap<String, SchemaObject>;

#[cfg(test)]
mod tests;
