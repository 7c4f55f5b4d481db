//! Wire structures exchanged with the lesson content backend.
//!
//! These mirror the backend's Android content protocol. They are decoded once
//! per synchronization run and then converted into the content model in
//! [`crate::content`].

mod cards;
mod exploration;
mod image;
mod interaction;
mod localization;
mod topic;

pub use cards::{
    ConceptCardDto, ConceptCardLanguagePackDto, LocalizedConceptCardIdDto,
    LocalizedRevisionCardIdDto, RevisionCardDto, RevisionCardLanguagePackDto, SubtopicPageIdDto,
    WorkedExampleDto,
};
pub use exploration::{
    AnswerGroupDto, BaseAnswerGroupDto, BaseSolutionDto, ExplorationDto,
    ExplorationLanguagePackDto, HintDto, LocalizedExplorationIdDto, MisconceptionDto, OutcomeDto,
    RuleSpecDto, SolutionDto, StateDto,
};
pub use image::{ImageContainerType, ImageLocation, ImageType};
pub use interaction::{
    AlgebraicExpressionInputInstanceDto, ContinueArgsDto, ContinueInstanceDto,
    DragAndDropSortInputArgsDto, DragAndDropSortInputInstanceDto, DragAndDropSortRuleDto,
    FractionDto, FractionInputArgsDto, FractionInputInstanceDto, FractionRuleDto,
    ImageClickInputArgsDto, ImageClickInputInstanceDto, ImageClickRuleDto, ImageWithRegionsDto,
    InteractionDto, InteractionInstanceDto, InteractionTypeDto, ItemSelectionInputArgsDto,
    ItemSelectionInputInstanceDto, ItemSelectionRuleDto, LabeledRegionDto,
    ListOfSetsOfContentIdsDto, MathEquationInputInstanceDto, MathExpressionInputArgsDto,
    MathExpressionRuleDto, MultipleChoiceInputArgsDto, MultipleChoiceInputInstanceDto,
    MultipleChoiceRuleDto, NoCustomizationArgsDto, NoRules, NoSolution,
    NormalizedRectangle2dDto, NumericExpressionInputArgsDto, NumericExpressionInputInstanceDto,
    NumericInputInstanceDto, NumericInputRuleDto, Point2dDto, RatioExpressionDto,
    RatioExpressionInputArgsDto, RatioExpressionInputInstanceDto, RatioExpressionRuleDto,
    SetOfContentIdsDto, TextInputArgsDto, TextInputInstanceDto, TextInputRuleDto,
    TranslatableSetOfNormalizedStringDto,
};
pub use localization::{
    ContentLocalizationDto, ContentLocalizationsDto, LocalizableTextDto, ReferencedImageDto,
    ReferencedImageListDto, SubtitledTextDto, ThumbnailDto, VoiceoverFileDto,
};
pub use topic::{
    ChapterSummaryDto, DownloadableTopicSummaryDto, SkillSummaryDto, StorySummaryDto,
    SubtopicSummaryDto, UpcomingTopicSummaryDto,
};
