use lessonsync_core::content::{
    ImageWithRegions, LabeledRegion, NormalizedRectangle2d, Point2d, SchemaObject,
};
use lessonsync_core::structure::{
    ContinueArgsDto, DragAndDropSortInputArgsDto, FractionInputArgsDto, ImageClickInputArgsDto,
    ItemSelectionInputArgsDto, LabeledRegionDto, MathExpressionInputArgsDto,
    MultipleChoiceInputArgsDto, NoCustomizationArgsDto, NumericExpressionInputArgsDto,
    Point2dDto, RatioExpressionInputArgsDto, TextInputArgsDto,
};

use super::{SchemaArgs, html_choices};
use crate::error::{ConvertError, ConvertResult};
use crate::tracker::ContentIdTracker;

/// Customization arguments of one interaction type.
pub(crate) trait CustomizationArgs {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs>;
}

fn args<const N: usize>(entries: [(&str, SchemaObject); N]) -> SchemaArgs {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

impl CustomizationArgs for NoCustomizationArgsDto {
    fn to_schema_objects(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        Ok(SchemaArgs::new())
    }
}

impl CustomizationArgs for ContinueArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        let button_text = tracker.extract_subtitled_unicode(&self.button_text)?;
        Ok(args([("buttonText", SchemaObject::SubtitledUnicode(button_text))]))
    }
}

impl CustomizationArgs for FractionInputArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        let placeholder = tracker.extract_subtitled_unicode(&self.placeholder)?;
        Ok(args([
            ("requireSimplestForm", SchemaObject::BoolValue(self.requires_simplest_form)),
            ("allowImproperFraction", SchemaObject::BoolValue(self.allow_improper_fractions)),
            (
                "allowNonzeroIntegerPart",
                SchemaObject::BoolValue(self.allow_nonzero_integer_part),
            ),
            ("customPlaceholder", SchemaObject::SubtitledUnicode(placeholder)),
        ]))
    }
}

impl CustomizationArgs for ItemSelectionInputArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        Ok(args([
            (
                "minAllowableSelectionCount",
                SchemaObject::SignedInt(self.min_allowable_selection_count),
            ),
            (
                "maxAllowableSelectionCount",
                SchemaObject::SignedInt(self.max_allowable_selection_count),
            ),
            ("choices", html_choices(&self.choices, tracker)?),
        ]))
    }
}

impl CustomizationArgs for MultipleChoiceInputArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        Ok(args([("choices", html_choices(&self.choices, tracker)?)]))
    }
}

impl CustomizationArgs for TextInputArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        let placeholder = tracker.extract_subtitled_unicode(&self.placeholder)?;
        Ok(args([
            ("placeholder", SchemaObject::SubtitledUnicode(placeholder)),
            ("rows", SchemaObject::SignedInt(self.rows)),
        ]))
    }
}

impl CustomizationArgs for DragAndDropSortInputArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        Ok(args([
            ("choices", html_choices(&self.choices, tracker)?),
            (
                "allowMultipleItemsInSamePosition",
                SchemaObject::BoolValue(self.allow_multiple_items_in_same_position),
            ),
        ]))
    }
}

impl CustomizationArgs for ImageClickInputArgsDto {
    fn to_schema_objects(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        let image = &self.image_and_regions;
        let labeled_regions = image
            .labeled_regions
            .iter()
            .map(to_labeled_region)
            .collect::<ConvertResult<Vec<_>>>()?;
        let image_and_regions = ImageWithRegions {
            image_path: image.image_file_path.clone(),
            labeled_regions,
        };
        Ok(args([(
            "imageAndRegions",
            SchemaObject::ImageWithRegions(image_and_regions),
        )]))
    }
}

fn to_labeled_region(region: &LabeledRegionDto) -> ConvertResult<LabeledRegion> {
    let Some(rectangle) = &region.normalized_rectangle_2d else {
        return Err(ConvertError::UnsupportedRegion {
            label: region.label.clone(),
        });
    };
    Ok(LabeledRegion {
        label: region.label.clone(),
        region: NormalizedRectangle2d {
            upper_left: to_point(rectangle.top_left),
            lower_right: to_point(rectangle.bottom_right),
        },
    })
}

const fn to_point(point: Point2dDto) -> Point2d {
    Point2d {
        x: point.x,
        y: point.y,
    }
}

impl CustomizationArgs for RatioExpressionInputArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        let placeholder = tracker.extract_subtitled_unicode(&self.placeholder)?;
        Ok(args([
            ("placeholder", SchemaObject::SubtitledUnicode(placeholder)),
            ("numberOfTerms", SchemaObject::SignedInt(self.number_of_terms)),
        ]))
    }
}

impl CustomizationArgs for MathExpressionInputArgsDto {
    fn to_schema_objects(&self, _: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        let letters = self
            .custom_osk_letters
            .iter()
            .cloned()
            .map(SchemaObject::NormalizedString)
            .collect();
        Ok(args([
            ("customOskLetters", SchemaObject::SchemaObjectList(letters)),
            (
                "useFractionForDivision",
                SchemaObject::BoolValue(self.use_fraction_for_division),
            ),
        ]))
    }
}

impl CustomizationArgs for NumericExpressionInputArgsDto {
    fn to_schema_objects(&self, tracker: &mut ContentIdTracker<'_>) -> ConvertResult<SchemaArgs> {
        let placeholder = tracker.extract_subtitled_unicode(&self.placeholder)?;
        Ok(args([
            ("placeholder", SchemaObject::SubtitledUnicode(placeholder)),
            (
                "useFractionForDivision",
                SchemaObject::BoolValue(self.use_fraction_for_division),
            ),
        ]))
    }
}
