use lessonsync_core::LanguageType;
use lessonsync_core::content::{SubtitledHtml, SubtitledUnicode};
use lessonsync_core::structure::{
    AnswerGroupDto, BaseAnswerGroupDto, BaseSolutionDto, ContentLocalizationDto, ContinueArgsDto,
    DragAndDropSortInputArgsDto, DragAndDropSortRuleDto, FractionDto, FractionInputArgsDto,
    FractionRuleDto, ImageClickInputArgsDto, ImageWithRegionsDto, ItemSelectionInputArgsDto,
    ItemSelectionRuleDto, LabeledRegionDto, LocalizableTextDto, MathExpressionInputArgsDto,
    MathExpressionRuleDto, MisconceptionDto, MultipleChoiceInputArgsDto, MultipleChoiceRuleDto,
    NoCustomizationArgsDto, NumericExpressionInputArgsDto, NumericInputRuleDto, OutcomeDto,
    RatioExpressionInputArgsDto, RatioExpressionRuleDto, RuleSpecDto, SetOfContentIdsDto,
    SolutionDto, SubtitledTextDto, TextInputArgsDto, TextInputRuleDto,
    TranslatableSetOfNormalizedStringDto,
};

use super::*;
use crate::localization::ImageReplacements;

fn localization() -> ContentLocalizationDto {
    let mut loc = ContentLocalizationDto::empty(LanguageType::English);
    for id in ["feedback_1", "default_outcome", "hint_1", "solution", "placeholder"] {
        loc.localizable_text_content_mapping.insert(
            id.to_string(),
            LocalizableTextDto::SingleLocalizableText {
                text: format!("<p>{id}</p>"),
            },
        );
    }
    loc.localizable_text_content_mapping.insert(
        "rule_input_1".to_string(),
        LocalizableTextDto::SetOfLocalizableText {
            texts: vec!["paris".to_string(), "Paris".to_string()],
        },
    );
    loc
}

fn outcome(feedback: &str) -> OutcomeDto {
    OutcomeDto {
        destination_state: "Next".to_string(),
        feedback: SubtitledTextDto::new(feedback),
        labelled_as_correct: feedback != "default_outcome",
    }
}

fn answer_group<R>(rules: Vec<R>) -> AnswerGroupDto<R> {
    AnswerGroupDto {
        base_answer_group: BaseAnswerGroupDto {
            outcome: outcome("feedback_1"),
            tagged_skill_misconception: None,
        },
        rule_specs: rules
            .into_iter()
            .map(|rule| RuleSpecDto {
                rule_type: Some(rule),
            })
            .collect(),
    }
}

fn instance(interaction_type: InteractionTypeDto) -> InteractionInstanceDto {
    InteractionInstanceDto {
        interaction_type: Some(interaction_type),
    }
}

#[test]
fn test_fraction_input_converts_args_rules_and_solution() {
    let loc = localization();
    let replacements = ImageReplacements::new();
    let mut tracker = ContentIdTracker::new(&loc, &replacements);
    let half = FractionDto {
        is_negative: false,
        whole_number: 0,
        numerator: 1,
        denominator: 2,
    };
    let dto = InteractionDto {
        customization_args: FractionInputArgsDto {
            requires_simplest_form: true,
            allow_improper_fractions: false,
            allow_nonzero_integer_part: true,
            placeholder: SubtitledTextDto::new("placeholder"),
        },
        answer_groups: vec![answer_group(vec![
            FractionRuleDto::IsExactlyEqualTo { input: half },
            FractionRuleDto::HasDenominatorEqualTo { input: 2 },
            FractionRuleDto::HasNoFractionalPart,
        ])],
        solution: Some(SolutionDto {
            base_solution: BaseSolutionDto {
                explanation: Some(SubtitledTextDto::new("solution")),
            },
            correct_answer: half,
        }),
        hints: vec![HintDto {
            hint_content: SubtitledTextDto::new("hint_1"),
        }],
        default_outcome: outcome("default_outcome"),
    };

    let interaction = convert_interaction(
        &instance(InteractionTypeDto::FractionInput(dto)),
        "Fractions",
        &mut tracker,
    )
    .unwrap();

    assert_eq!(interaction.id, FRACTION_INPUT);
    let rules = &interaction.answer_groups[0].rule_specs;
    assert_eq!(rules[0].rule_type, "IsExactlyEqualTo");
    assert_eq!(rules[0].inputs["f"], InteractionObject::Fraction(to_fraction(&half)));
    assert_eq!(rules[1].inputs["x"], InteractionObject::NonNegativeInt(2));
    assert!(rules[2].inputs.is_empty());
    assert_eq!(
        interaction.customization_args["requireSimplestForm"],
        SchemaObject::BoolValue(true)
    );
    assert!(matches!(
        interaction.customization_args["customPlaceholder"],
        SchemaObject::SubtitledUnicode(_)
    ));
    let solution = interaction.solution.unwrap();
    assert_eq!(solution.explanation.unwrap().html, "<p>solution</p>");
    assert_eq!(interaction.hints[0].hint_content.content_id, "hint_1");
    assert!(!interaction.default_outcome.unwrap().labelled_as_correct);

    let tracked: Vec<_> = tracker.content_ids().iter().map(String::as_str).collect();
    assert_eq!(
        tracked,
        ["default_outcome", "feedback_1", "hint_1", "placeholder", "solution"]
    );
}

#[test]
fn test_text_input_rules_pull_string_lists() {
    let loc = localization();
    let replacements = ImageReplacements::new();
    let mut tracker = ContentIdTracker::new(&loc, &replacements);
    let mut group = answer_group(vec![TextInputRuleDto::FuzzyEquals {
        input: TranslatableSetOfNormalizedStringDto {
            content_id: "rule_input_1".to_string(),
        },
    }]);
    group.base_answer_group.tagged_skill_misconception = Some(MisconceptionDto {
        skill_id: "skill_1".to_string(),
        misconception_id: "3".to_string(),
    });
    let dto = InteractionDto {
        customization_args: TextInputArgsDto {
            placeholder: SubtitledTextDto::new("placeholder"),
            rows: 1,
        },
        answer_groups: vec![group],
        solution: None,
        hints: Vec::new(),
        default_outcome: outcome("default_outcome"),
    };

    let interaction =
        convert_interaction(&instance(InteractionTypeDto::TextInput(dto)), "Capital", &mut tracker)
            .unwrap();

    let group = &interaction.answer_groups[0];
    assert_eq!(group.tagged_skill_misconception.as_ref().unwrap().skill_id, "skill_1");
    let InteractionObject::TranslatableSetOfNormalizedString(strings) = &group.rule_specs[0].inputs["x"]
    else {
        panic!("expected a translatable string set");
    };
    assert_eq!(strings.normalized_strings, ["paris", "Paris"]);
    assert!(interaction.solution.is_none());
    assert!(tracker.content_ids().contains("rule_input_1"));
}

#[test]
fn test_numeric_tolerance_rule_input_names() {
    let rule = NumericInputRuleDto::IsWithinTolerance {
        input_tolerance: 0.5,
        input_compared_value: 3.0,
    };
    let loc = localization();
    let replacements = ImageReplacements::new();
    let mut tracker = ContentIdTracker::new(&loc, &replacements);

    let spec = rule.to_rule_spec(&mut tracker).unwrap();

    assert_eq!(spec.rule_type, "IsWithinTolerance");
    assert_eq!(spec.inputs["tol"], InteractionObject::Real(0.5));
    assert_eq!(spec.inputs["x"], InteractionObject::Real(3.0));
}

#[test]
fn test_missing_rule_type_fails() {
    let loc = localization();
    let replacements = ImageReplacements::new();
    let mut tracker = ContentIdTracker::new(&loc, &replacements);
    let mut group = answer_group::<NumericInputRuleDto>(Vec::new());
    group.rule_specs.push(RuleSpecDto { rule_type: None });
    let dto = InteractionDto {
        customization_args: NoCustomizationArgsDto {},
        answer_groups: vec![group],
        solution: None,
        hints: Vec::new(),
        default_outcome: outcome("default_outcome"),
    };

    let err = convert_interaction(&instance(InteractionTypeDto::NumericInput(dto)), "S", &mut tracker)
        .unwrap_err();

    assert_eq!(
        err,
        ConvertError::UnsetRule {
            interaction_id: NUMERIC_INPUT
        }
    );
}

#[test]
fn test_image_region_without_rectangle_fails() {
    let loc = localization();
    let replacements = ImageReplacements::new();
    let mut tracker = ContentIdTracker::new(&loc, &replacements);
    let args = ImageClickInputArgsDto {
        image_and_regions: ImageWithRegionsDto {
            image_file_path: "map.png".to_string(),
            labeled_regions: vec![LabeledRegionDto {
                label: "Asia".to_string(),
                normalized_rectangle_2d: None,
            }],
        },
    };

    let err = args.to_schema_objects(&mut tracker).unwrap_err();

    assert!(matches!(err, ConvertError::UnsupportedRegion { label } if label == "Asia"));
}

#[test]
fn test_unset_and_end_exploration() {
    let loc = localization();
    let replacements = ImageReplacements::new();
    let mut tracker = ContentIdTracker::new(&loc, &replacements);

    let err = convert_interaction(
        &InteractionInstanceDto {
            interaction_type: None,
        },
        "Broken",
        &mut tracker,
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::UnsetInteraction { state_name } if state_name == "Broken"));

    let end = convert_interaction(&instance(InteractionTypeDto::EndExploration), "End", &mut tracker)
        .unwrap();
    assert_eq!(end.id, END_EXPLORATION);
    assert!(end.default_outcome.is_none());
    assert!(tracker.content_ids().is_empty());
}

fn interaction_dto<C, R, S>(
    customization_args: C,
    answer_groups: Vec<AnswerGroupDto<R>>,
    correct_answer: Option<S>,
) -> InteractionDto<C, R, S> {
    InteractionDto {
        customization_args,
        answer_groups,
        solution: correct_answer.map(|correct_answer| SolutionDto {
            base_solution: BaseSolutionDto { explanation: None },
            correct_answer,
        }),
        hints: Vec::new(),
        default_outcome: outcome("default_outcome"),
    }
}

/// Converts `interaction_type` against the shared localization plus `texts`.
fn convert_with(
    texts: &[(&str, &str)],
    interaction_type: InteractionTypeDto,
) -> (Interaction, Vec<String>) {
    let mut loc = localization();
    for (content_id, text) in texts {
        loc.localizable_text_content_mapping.insert(
            (*content_id).to_string(),
            LocalizableTextDto::SingleLocalizableText {
                text: (*text).to_string(),
            },
        );
    }
    let replacements = ImageReplacements::new();
    let mut tracker = ContentIdTracker::new(&loc, &replacements);
    let interaction = convert_interaction(&instance(interaction_type), "State", &mut tracker).unwrap();
    (interaction, tracker.into_content_ids().into_iter().collect())
}

const CHOICES: [(&str, &str); 3] = [
    ("ca_choices_0", "<p>red</p>"),
    ("ca_choices_1", "<p>green</p>"),
    ("ca_choices_2", "<p>blue</p>"),
];

fn choices() -> Vec<SubtitledTextDto> {
    CHOICES.iter().map(|(id, _)| SubtitledTextDto::new(*id)).collect()
}

fn content_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_string()).collect()
}

#[test]
fn test_continue_converts_button_text_without_rules() {
    let dto = interaction_dto(
        ContinueArgsDto {
            button_text: SubtitledTextDto::new("ca_buttonText"),
        },
        Vec::new(),
        None,
    );

    let (interaction, tracked) = convert_with(
        &[("ca_buttonText", "Continue")],
        InteractionTypeDto::ContinueInstance(dto),
    );

    assert_eq!(interaction.id, CONTINUE);
    assert!(interaction.answer_groups.is_empty());
    assert!(interaction.solution.is_none());
    assert_eq!(
        interaction.customization_args["buttonText"],
        SchemaObject::SubtitledUnicode(SubtitledUnicode {
            content_id: "ca_buttonText".to_string(),
            unicode_str: "Continue".to_string(),
        })
    );
    assert_eq!(tracked, ["ca_buttonText", "default_outcome"]);
}

#[test]
fn test_item_selection_rules_take_content_id_sets() {
    let dto = interaction_dto(
        ItemSelectionInputArgsDto {
            min_allowable_selection_count: 1,
            max_allowable_selection_count: 2,
            choices: choices(),
        },
        vec![answer_group(vec![
            ItemSelectionRuleDto::Equals {
                input: SetOfContentIdsDto {
                    content_ids: content_ids(&["ca_choices_0", "ca_choices_2"]),
                },
            },
            ItemSelectionRuleDto::IsProperSubsetOf {
                input: SetOfContentIdsDto {
                    content_ids: content_ids(&["ca_choices_1"]),
                },
            },
        ])],
        None,
    );

    let (interaction, tracked) = convert_with(&CHOICES, InteractionTypeDto::ItemSelectionInput(dto));

    assert_eq!(interaction.id, ITEM_SELECTION_INPUT);
    let rules = &interaction.answer_groups[0].rule_specs;
    assert_eq!(rules[0].rule_type, "Equals");
    assert_eq!(
        rules[0].inputs["x"],
        InteractionObject::SetOfTranslatableHtmlContentIds(content_ids(&[
            "ca_choices_0",
            "ca_choices_2"
        ]))
    );
    assert_eq!(rules[1].rule_type, "IsProperSubsetOf");
    let args = &interaction.customization_args;
    assert_eq!(args["minAllowableSelectionCount"], SchemaObject::SignedInt(1));
    assert_eq!(args["maxAllowableSelectionCount"], SchemaObject::SignedInt(2));
    let SchemaObject::SchemaObjectList(converted) = &args["choices"] else {
        panic!("expected a list of choices");
    };
    assert_eq!(converted.len(), 3);
    assert!(tracked.contains(&"ca_choices_2".to_string()));
}

#[test]
fn test_multiple_choice_equals_takes_choice_index() {
    let dto = interaction_dto(
        MultipleChoiceInputArgsDto { choices: choices() },
        vec![answer_group(vec![MultipleChoiceRuleDto::Equals { input: 2 }])],
        None,
    );

    let (interaction, _) = convert_with(&CHOICES, InteractionTypeDto::MultipleChoiceInput(dto));

    assert_eq!(interaction.id, MULTIPLE_CHOICE_INPUT);
    let rule = &interaction.answer_groups[0].rule_specs[0];
    assert_eq!(rule.rule_type, "Equals");
    assert_eq!(rule.inputs["x"], InteractionObject::NonNegativeInt(2));
    let SchemaObject::SchemaObjectList(converted) = &interaction.customization_args["choices"] else {
        panic!("expected a list of choices");
    };
    assert_eq!(
        converted[1],
        SchemaObject::SubtitledHtml(SubtitledHtml {
            content_id: "ca_choices_1".to_string(),
            html: "<p>green</p>".to_string(),
        })
    );
}

#[test]
fn test_drag_and_drop_rules_and_solution() {
    let ordering = ListOfSetsOfContentIdsDto {
        content_id_sets: vec![
            SetOfContentIdsDto {
                content_ids: content_ids(&["ca_choices_1"]),
            },
            SetOfContentIdsDto {
                content_ids: content_ids(&["ca_choices_0", "ca_choices_2"]),
            },
        ],
    };
    let dto = interaction_dto(
        DragAndDropSortInputArgsDto {
            choices: choices(),
            allow_multiple_items_in_same_position: true,
        },
        vec![answer_group(vec![
            DragAndDropSortRuleDto::IsEqualToOrdering {
                input: ordering.clone(),
            },
            DragAndDropSortRuleDto::HasElementXAtPositionY {
                element: "ca_choices_1".to_string(),
                position: 1,
            },
            DragAndDropSortRuleDto::HasElementXBeforeElementY {
                considered_element: "ca_choices_0".to_string(),
                later_element: "ca_choices_2".to_string(),
            },
        ])],
        Some(ordering),
    );

    let (interaction, _) = convert_with(&CHOICES, InteractionTypeDto::DragAndDropSortInput(dto));

    assert_eq!(interaction.id, DRAG_AND_DROP_SORT_INPUT);
    let expected_ordering = vec![
        content_ids(&["ca_choices_1"]),
        content_ids(&["ca_choices_0", "ca_choices_2"]),
    ];
    let rules = &interaction.answer_groups[0].rule_specs;
    assert_eq!(rules[0].rule_type, "IsEqualToOrdering");
    assert_eq!(
        rules[0].inputs["x"],
        InteractionObject::ListOfSetsOfTranslatableHtmlContentIds(expected_ordering.clone())
    );
    assert_eq!(rules[1].rule_type, "HasElementXAtPositionY");
    assert_eq!(
        rules[1].inputs["x"],
        InteractionObject::TranslatableHtmlContentId("ca_choices_1".to_string())
    );
    assert_eq!(rules[1].inputs["y"], InteractionObject::NonNegativeInt(1));
    assert_eq!(rules[2].rule_type, "HasElementXBeforeElementY");
    assert_eq!(
        rules[2].inputs["y"],
        InteractionObject::TranslatableHtmlContentId("ca_choices_2".to_string())
    );
    assert_eq!(
        interaction.customization_args["allowMultipleItemsInSamePosition"],
        SchemaObject::BoolValue(true)
    );
    assert_eq!(
        interaction.solution.unwrap().correct_answer,
        InteractionObject::ListOfSetsOfTranslatableHtmlContentIds(expected_ordering)
    );
}

#[test]
fn test_ratio_expression_rules_and_solution() {
    let ratio = RatioExpressionDto {
        components: vec![1, 2, 3],
    };
    let dto = interaction_dto(
        RatioExpressionInputArgsDto {
            placeholder: SubtitledTextDto::new("placeholder"),
            number_of_terms: 3,
        },
        vec![answer_group(vec![
            RatioExpressionRuleDto::IsEquivalent {
                input: ratio.clone(),
            },
            RatioExpressionRuleDto::HasNumberOfTermsEqualTo { input_term_count: 3 },
            RatioExpressionRuleDto::HasSpecificTermEqualTo {
                input_term_index: 1,
                input_expected_term_value: 2,
            },
        ])],
        Some(ratio),
    );

    let (interaction, _) = convert_with(&[], InteractionTypeDto::RatioExpressionInput(dto));

    assert_eq!(interaction.id, RATIO_EXPRESSION_INPUT);
    let rules = &interaction.answer_groups[0].rule_specs;
    assert_eq!(rules[0].rule_type, "IsEquivalent");
    assert_eq!(rules[0].inputs["x"], InteractionObject::RatioExpression(vec![1, 2, 3]));
    assert_eq!(rules[1].rule_type, "HasNumberOfTermsEqualTo");
    assert_eq!(rules[1].inputs["y"], InteractionObject::NonNegativeInt(3));
    assert!(!rules[1].inputs.contains_key("x"));
    assert_eq!(rules[2].inputs["x"], InteractionObject::NonNegativeInt(1));
    assert_eq!(rules[2].inputs["y"], InteractionObject::NonNegativeInt(2));
    assert_eq!(interaction.customization_args["numberOfTerms"], SchemaObject::SignedInt(3));
    assert_eq!(
        interaction.solution.unwrap().correct_answer,
        InteractionObject::RatioExpression(vec![1, 2, 3])
    );
}

#[test]
fn test_algebraic_expression_letters_and_rules() {
    let dto = interaction_dto(
        MathExpressionInputArgsDto {
            custom_osk_letters: content_ids(&["x", "y"]),
            use_fraction_for_division: true,
        },
        vec![answer_group(vec![
            MathExpressionRuleDto::MatchesUpToTrivialManipulations {
                input: "x+y".to_string(),
            },
        ])],
        Some("y+x".to_string()),
    );

    let (interaction, _) = convert_with(&[], InteractionTypeDto::AlgebraicExpressionInput(dto));

    assert_eq!(interaction.id, ALGEBRAIC_EXPRESSION_INPUT);
    let rule = &interaction.answer_groups[0].rule_specs[0];
    assert_eq!(rule.rule_type, "MatchesUpToTrivialManipulations");
    assert_eq!(rule.inputs["x"], InteractionObject::MathExpression("x+y".to_string()));
    assert_eq!(
        interaction.customization_args["customOskLetters"],
        SchemaObject::SchemaObjectList(vec![
            SchemaObject::NormalizedString("x".to_string()),
            SchemaObject::NormalizedString("y".to_string()),
        ])
    );
    assert_eq!(
        interaction.customization_args["useFractionForDivision"],
        SchemaObject::BoolValue(true)
    );
    assert_eq!(
        interaction.solution.unwrap().correct_answer,
        InteractionObject::MathExpression("y+x".to_string())
    );
}

#[test]
fn test_math_equation_uses_its_own_id() {
    let dto = interaction_dto(
        MathExpressionInputArgsDto {
            custom_osk_letters: Vec::new(),
            use_fraction_for_division: false,
        },
        vec![answer_group(vec![MathExpressionRuleDto::MatchesExactlyWith {
            input: "y=2x".to_string(),
        }])],
        None,
    );

    let (interaction, _) = convert_with(&[], InteractionTypeDto::MathEquationInput(dto));

    assert_eq!(interaction.id, MATH_EQUATION_INPUT);
    let rule = &interaction.answer_groups[0].rule_specs[0];
    assert_eq!(rule.rule_type, "MatchesExactlyWith");
    assert_eq!(rule.inputs["x"], InteractionObject::MathExpression("y=2x".to_string()));
    assert_eq!(
        interaction.customization_args["customOskLetters"],
        SchemaObject::SchemaObjectList(Vec::new())
    );
}

#[test]
fn test_numeric_expression_placeholder_and_rules() {
    let dto = interaction_dto(
        NumericExpressionInputArgsDto {
            placeholder: SubtitledTextDto::new("placeholder"),
            use_fraction_for_division: false,
        },
        vec![answer_group(vec![MathExpressionRuleDto::IsEquivalentTo {
            input: "6/3".to_string(),
        }])],
        Some("2".to_string()),
    );

    let (interaction, tracked) = convert_with(&[], InteractionTypeDto::NumericExpressionInput(dto));

    assert_eq!(interaction.id, NUMERIC_EXPRESSION_INPUT);
    let rule = &interaction.answer_groups[0].rule_specs[0];
    assert_eq!(rule.rule_type, "IsEquivalentTo");
    assert_eq!(rule.inputs["x"], InteractionObject::MathExpression("6/3".to_string()));
    assert!(matches!(
        &interaction.customization_args["placeholder"],
        SchemaObject::SubtitledUnicode(text) if text.unicode_str == "<p>placeholder</p>"
    ));
    assert!(tracked.contains(&"placeholder".to_string()));
}
