//! Aggregated results of a synchronization run.

use std::collections::BTreeMap;

use lessonsync_core::recommendation::PromotedTopicId;
use lessonsync_core::structure::{
    ConceptCardDto, ConceptCardLanguagePackDto, DownloadableTopicSummaryDto, ExplorationDto,
    ExplorationLanguagePackDto, RevisionCardDto, RevisionCardLanguagePackDto, SubtopicPageIdDto,
};
use lessonsync_core::{
    DownloadRequestStructureIdentifier, DownloadResult, DownloadResultType, LanguageType,
    ResultOutcome, StructureKind, TopicContentResponse, TopicListResponse,
};

// ============================================================================
// Tallies
// ============================================================================

/// Result counts by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultTally {
    pub success: usize,
    pub skipped_does_not_exist: usize,
    pub skipped_from_failure: usize,
    pub skipped_should_retry: usize,
}

impl ResultTally {
    pub fn from_results(results: &[DownloadResult]) -> Self {
        let mut tally = Self::default();
        for result in results {
            tally.record(result.outcome());
        }
        tally
    }

    pub const fn record(&mut self, outcome: ResultOutcome) {
        match outcome {
            ResultOutcome::Success => self.success += 1,
            ResultOutcome::SkippedDoesNotExist => self.skipped_does_not_exist += 1,
            ResultOutcome::SkippedFromFailure => self.skipped_from_failure += 1,
            ResultOutcome::SkippedShouldRetry => self.skipped_should_retry += 1,
        }
    }

    pub const fn total(&self) -> usize {
        self.success
            + self.skipped_does_not_exist
            + self.skipped_from_failure
            + self.skipped_should_retry
    }
}

/// Succeeded / returned counts for one slice of the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuccessCount {
    pub succeeded: usize,
    pub total: usize,
}

impl SuccessCount {
    const fn record(&mut self, outcome: ResultOutcome) {
        self.total += 1;
        if matches!(outcome, ResultOutcome::Success) {
            self.succeeded += 1;
        }
    }
}

/// Counts for one structure kind, split by language for language packs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindBreakdown {
    pub overall: SuccessCount,
    pub by_language: BTreeMap<LanguageType, SuccessCount>,
}

/// Per-structure-kind breakdown, in [`StructureKind::ALL`] order.
pub fn breakdown_by_kind(results: &[DownloadResult]) -> BTreeMap<StructureKind, KindBreakdown> {
    let mut breakdown: BTreeMap<StructureKind, KindBreakdown> = StructureKind::ALL
        .into_iter()
        .map(|kind| (kind, KindBreakdown::default()))
        .collect();
    for result in results {
        let kind = result.identifier.kind();
        let outcome = result.outcome();
        let entry = breakdown.entry(kind).or_default();
        entry.overall.record(outcome);
        if let Some(language) = result.identifier.language().filter(|_| kind.is_language_pack()) {
            entry.by_language.entry(language).or_default().record(outcome);
        }
    }
    breakdown
}

// ============================================================================
// Fetched content
// ============================================================================

/// Successful results grouped by structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedContent {
    pub topic_summaries: Vec<DownloadableTopicSummaryDto>,
    pub revision_cards: Vec<RevisionCardDto>,
    pub revision_card_packs: BTreeMap<SubtopicPageIdDto, Vec<RevisionCardLanguagePackDto>>,
    pub concept_cards: Vec<ConceptCardDto>,
    pub concept_card_packs: BTreeMap<String, Vec<ConceptCardLanguagePackDto>>,
    pub explorations: Vec<ExplorationDto>,
    pub exploration_packs: BTreeMap<String, Vec<ExplorationLanguagePackDto>>,
}

impl FetchedContent {
    pub fn from_results(results: &[DownloadResult]) -> Self {
        let mut content = Self::default();
        for result in results {
            match &result.result_type {
                DownloadResultType::TopicSummary(dto) => content.topic_summaries.push(dto.clone()),
                DownloadResultType::RevisionCard(dto) => content.revision_cards.push(dto.clone()),
                DownloadResultType::RevisionCardLanguagePack(dto) => content
                    .revision_card_packs
                    .entry(dto.id.id.clone())
                    .or_default()
                    .push(dto.clone()),
                DownloadResultType::ConceptCard(dto) => content.concept_cards.push(dto.clone()),
                DownloadResultType::ConceptCardLanguagePack(dto) => content
                    .concept_card_packs
                    .entry(dto.id.skill_id.clone())
                    .or_default()
                    .push(dto.clone()),
                DownloadResultType::Exploration(dto) => content.explorations.push(dto.clone()),
                DownloadResultType::ExplorationLanguagePack(dto) => content
                    .exploration_packs
                    .entry(dto.id.exploration_id.clone())
                    .or_default()
                    .push(dto.clone()),
                DownloadResultType::SkippedDoesNotExist
                | DownloadResultType::SkippedFromFailure
                | DownloadResultType::SkippedShouldRetry => {}
            }
        }
        content
    }
}

// ============================================================================
// Report
// ============================================================================

/// Everything a full synchronization run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub catalog: TopicListResponse,
    pub downloadable_topic_ids: Vec<String>,
    pub future_topic_ids: Vec<String>,
    pub recommended_topics: Vec<PromotedTopicId>,
    pub requested_identifiers: Vec<DownloadRequestStructureIdentifier>,
    pub content: TopicContentResponse,
    pub tally: ResultTally,
    pub breakdown: BTreeMap<StructureKind, KindBreakdown>,
    /// Identifiers worth requesting again in a later run.
    pub retry_identifiers: Vec<DownloadRequestStructureIdentifier>,
    pub fetched: FetchedContent,
}

impl SyncReport {
    pub(crate) fn new(
        catalog: TopicListResponse,
        recommended_topics: Vec<PromotedTopicId>,
        requested_identifiers: Vec<DownloadRequestStructureIdentifier>,
        content: TopicContentResponse,
    ) -> Self {
        let results = &content.download_results;
        let retry_identifiers = results
            .iter()
            .filter(|result| result.outcome() == ResultOutcome::SkippedShouldRetry)
            .map(|result| result.identifier.clone())
            .collect();
        Self {
            downloadable_topic_ids: catalog
                .downloadable_topics()
                .map(|topic| topic.id.clone())
                .collect(),
            future_topic_ids: catalog.future_topic_ids(),
            tally: ResultTally::from_results(results),
            breakdown: breakdown_by_kind(results),
            fetched: FetchedContent::from_results(results),
            retry_identifiers,
            catalog,
            recommended_topics,
            requested_identifiers,
            content,
        }
    }

    pub const fn success_count(&self) -> usize {
        self.tally.success
    }

    /// Number of topics the catalog listed as available, downloadable or not.
    pub fn available_topic_count(&self) -> usize {
        self.catalog.available_topics.len()
    }
}
