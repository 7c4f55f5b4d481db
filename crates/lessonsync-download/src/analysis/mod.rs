//! Compatibility analysis of fetched content.
//!
//! Scans the structures of a sync run for content the app cannot show as
//! intended: GIF images, images missing from some languages, HTML using
//! unsupported tags and texts without translations. Issues are grouped by the
//! structure they were found in and sorted for stable console output.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use lessonsync_core::structure::{
    ContentLocalizationDto, ContentLocalizationsDto, DownloadableTopicSummaryDto,
    LocalizableTextDto, SubtitledTextDto,
};
use lessonsync_core::{LanguageType, TopicListResponse};
use tracing::debug;

use crate::images::{DownloadedImage, ImageDownloadReport, ImageReference};
use crate::orchestrator::FetchedContent;

/// Rich-text components the app cannot render.
pub const INVALID_TAGS: [&str; 4] = [
    "oppia-noninteractive-link",
    "oppia-noninteractive-tabs",
    "oppia-noninteractive-video",
    "oppia-noninteractive-collapsible",
];

const INVALID_IMAGE_EXTENSION: &str = "gif";

/// The structure an issue was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentContainer {
    Topic {
        topic_id: String,
    },
    Story {
        topic_id: String,
        story_id: String,
    },
    Chapter {
        topic_id: String,
        story_id: String,
        exploration_id: String,
    },
    Skill {
        topic_id: String,
        skill_id: String,
    },
    Exploration {
        exploration_id: String,
    },
}

impl ContentContainer {
    /// The topic or exploration this container belongs to.
    ///
    /// Content ids are unique within a root, so texts and translations are
    /// matched per root.
    pub fn root(&self) -> Self {
        match self {
            Self::Topic { topic_id }
            | Self::Story { topic_id, .. }
            | Self::Chapter { topic_id, .. }
            | Self::Skill { topic_id, .. } => Self::Topic {
                topic_id: topic_id.clone(),
            },
            Self::Exploration { exploration_id } => Self::Exploration {
                exploration_id: exploration_id.clone(),
            },
        }
    }
}

impl fmt::Display for ContentContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic { topic_id } => write!(f, "topic {topic_id}"),
            Self::Story { topic_id, story_id } => {
                write!(f, "story {story_id} in topic {topic_id}")
            }
            Self::Chapter {
                topic_id,
                story_id,
                exploration_id,
            } => write!(
                f,
                "chapter (exp: {exploration_id}) in story {story_id} in topic {topic_id}"
            ),
            Self::Skill { topic_id, skill_id } => {
                write!(f, "skill {skill_id} in topic {topic_id}")
            }
            Self::Exploration { exploration_id } => write!(f, "exploration {exploration_id}"),
        }
    }
}

/// A translatable text of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextReference {
    pub container: ContentContainer,
    pub content_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueKind {
    InvalidImageExtension,
    ImageInconsistency,
    InvalidHtmlTag,
    MissingTranslation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompatibilityIssue {
    ImageHasInvalidExtension {
        container: ContentContainer,
        language: LanguageType,
        filename: String,
        invalid_extension: &'static str,
    },
    /// An html image referenced in some languages of a structure but not all.
    ImageInconsistencies {
        container: ContentContainer,
        filename: String,
        present_languages: BTreeSet<LanguageType>,
        missing_languages: BTreeSet<LanguageType>,
    },
    HtmlHasInvalidTag {
        language: LanguageType,
        text: TextReference,
        invalid_tag: &'static str,
    },
    TextMissingTranslations {
        text: TextReference,
        present_languages: BTreeSet<LanguageType>,
        missing_languages: BTreeSet<LanguageType>,
    },
}

impl CompatibilityIssue {
    pub const fn kind(&self) -> IssueKind {
        match self {
            Self::ImageHasInvalidExtension { .. } => IssueKind::InvalidImageExtension,
            Self::ImageInconsistencies { .. } => IssueKind::ImageInconsistency,
            Self::HtmlHasInvalidTag { .. } => IssueKind::InvalidHtmlTag,
            Self::TextMissingTranslations { .. } => IssueKind::MissingTranslation,
        }
    }

    pub const fn container(&self) -> &ContentContainer {
        match self {
            Self::ImageHasInvalidExtension { container, .. }
            | Self::ImageInconsistencies { container, .. } => container,
            Self::HtmlHasInvalidTag { text, .. } | Self::TextMissingTranslations { text, .. } => {
                &text.container
            }
        }
    }
}

/// Issue counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueBreakdown {
    pub total: usize,
    pub invalid_extensions: usize,
    pub image_inconsistencies: usize,
    pub invalid_tags: usize,
    pub missing_translations: usize,
}

/// Everything found by [`analyze_compatibility`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityReport {
    /// Sorted by container, then kind.
    pub issues: Vec<CompatibilityIssue>,
    /// Images the store did not have, in reference order.
    pub failed_images: Vec<ImageReference>,
}

impl CompatibilityReport {
    pub fn breakdown(&self) -> IssueBreakdown {
        let mut breakdown = IssueBreakdown {
            total: self.issues.len(),
            ..IssueBreakdown::default()
        };
        for issue in &self.issues {
            let counter = match issue.kind() {
                IssueKind::InvalidImageExtension => &mut breakdown.invalid_extensions,
                IssueKind::ImageInconsistency => &mut breakdown.image_inconsistencies,
                IssueKind::InvalidHtmlTag => &mut breakdown.invalid_tags,
                IssueKind::MissingTranslation => &mut breakdown.missing_translations,
            };
            *counter += 1;
        }
        breakdown
    }

    /// Issues of one kind, in report order.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &CompatibilityIssue> {
        self.issues.iter().filter(move |issue| issue.kind() == kind)
    }
}

/// Scan topics, upcoming topics and explorations for compatibility issues.
///
/// `expected_languages` are the languages every text and image should exist
/// in, normally the requested languages plus the default one. Revision and
/// concept cards are not scanned.
pub fn analyze_compatibility(
    catalog: &TopicListResponse,
    fetched: &FetchedContent,
    images: &ImageDownloadReport,
    expected_languages: &BTreeSet<LanguageType>,
) -> CompatibilityReport {
    let mut tracker = ContentTracker::default();
    for topic in &fetched.topic_summaries {
        tracker.track_topic(topic);
    }
    for future in &catalog.future_topics {
        let summary = &future.topic_summary;
        let container = ContentContainer::Topic {
            topic_id: summary.id.clone(),
        };
        tracker.track_texts(&container, [&summary.name, &summary.description]);
        tracker.track_localizations(&container, &summary.localizations);
    }
    for exploration in &fetched.explorations {
        let container = ContentContainer::Exploration {
            exploration_id: exploration.id.clone(),
        };
        // Every text of an exploration lives in its default localization.
        tracker.texts.extend(
            exploration
                .default_localization
                .localizable_text_content_mapping
                .keys()
                .map(|content_id| TextReference {
                    container: container.clone(),
                    content_id: content_id.clone(),
                }),
        );
        tracker.track_localization(&container, &exploration.default_localization);
        let packs = fetched
            .exploration_packs
            .get(&exploration.id)
            .map_or(&[][..], Vec::as_slice);
        for pack in packs {
            tracker.track_localization(&container, &pack.localization);
        }
    }

    let mut issues = Vec::new();
    issues.extend(tracker.invalid_extensions());
    issues.extend(tracker.image_inconsistencies(expected_languages));
    issues.extend(tracker.invalid_tags());
    issues.extend(tracker.missing_translations(expected_languages));
    // Stable, so each kind keeps its own order within a container.
    issues.sort_by(|a, b| {
        a.container()
            .cmp(b.container())
            .then_with(|| a.kind().cmp(&b.kind()))
    });

    let failed_images: Vec<ImageReference> = images
        .images
        .iter()
        .filter(|(_, image)| matches!(image, DownloadedImage::FailedCouldNotFind))
        .map(|(reference, _)| reference.clone())
        .collect();

    debug!(
        issues = issues.len(),
        failed_images = failed_images.len(),
        "Analyzed content compatibility"
    );
    CompatibilityReport {
        issues,
        failed_images,
    }
}

struct TrackedLocalization<'a> {
    container: ContentContainer,
    localization: &'a ContentLocalizationDto,
}

#[derive(Default)]
struct ContentTracker<'a> {
    texts: Vec<TextReference>,
    localizations: Vec<TrackedLocalization<'a>>,
}

impl<'a> ContentTracker<'a> {
    fn track_topic(&mut self, topic: &'a DownloadableTopicSummaryDto) {
        let topic_id = &topic.id;
        let container = ContentContainer::Topic {
            topic_id: topic_id.clone(),
        };
        self.track_texts(&container, [&topic.name, &topic.description]);
        self.track_localizations(&container, &topic.localizations);

        for story in &topic.story_summaries {
            let story_container = ContentContainer::Story {
                topic_id: topic_id.clone(),
                story_id: story.id.clone(),
            };
            self.track_texts(&story_container, [&story.title, &story.description]);
            self.track_localizations(&story_container, &story.localizations);
            for chapter in &story.chapters {
                let chapter_container = ContentContainer::Chapter {
                    topic_id: topic_id.clone(),
                    story_id: story.id.clone(),
                    exploration_id: chapter.exploration_id.clone(),
                };
                self.track_texts(&chapter_container, [&chapter.title, &chapter.description]);
                self.track_localizations(&chapter_container, &chapter.localizations);
            }
        }
        for skill in &topic.referenced_skills {
            let skill_container = ContentContainer::Skill {
                topic_id: topic_id.clone(),
                skill_id: skill.id.clone(),
            };
            self.track_texts(&skill_container, [&skill.name]);
            self.track_localizations(&skill_container, &skill.localizations);
        }
    }

    fn track_texts<'t>(
        &mut self,
        container: &ContentContainer,
        texts: impl IntoIterator<Item = &'t SubtitledTextDto>,
    ) {
        self.texts.extend(texts.into_iter().map(|text| TextReference {
            container: container.clone(),
            content_id: text.content_id.clone(),
        }));
    }

    fn track_localizations(
        &mut self,
        container: &ContentContainer,
        localizations: &'a ContentLocalizationsDto,
    ) {
        for localization in localizations.all() {
            self.track_localization(container, localization);
        }
    }

    fn track_localization(
        &mut self,
        container: &ContentContainer,
        localization: &'a ContentLocalizationDto,
    ) {
        self.localizations.push(TrackedLocalization {
            container: container.clone(),
            localization,
        });
    }

    fn invalid_extensions(&self) -> Vec<CompatibilityIssue> {
        let mut issues = Vec::new();
        for tracked in &self.localizations {
            let localization = tracked.localization;
            let html_images = localization
                .localized_image_list
                .referenced_images
                .iter()
                .map(|image| &image.filename);
            let thumbnail = localization
                .thumbnail
                .iter()
                .map(|thumbnail| &thumbnail.referenced_image.filename);
            for filename in html_images.chain(thumbnail) {
                if has_extension(filename, INVALID_IMAGE_EXTENSION) {
                    issues.push(CompatibilityIssue::ImageHasInvalidExtension {
                        container: tracked.container.clone(),
                        language: localization.language,
                        filename: filename.clone(),
                        invalid_extension: INVALID_IMAGE_EXTENSION,
                    });
                }
            }
        }
        issues.sort_by(|a, b| invalid_extension_key(a).cmp(&invalid_extension_key(b)));
        issues
    }

    fn image_inconsistencies(
        &self,
        expected_languages: &BTreeSet<LanguageType>,
    ) -> Vec<CompatibilityIssue> {
        let mut languages_by_image: BTreeMap<(&ContentContainer, &str), BTreeSet<LanguageType>> =
            BTreeMap::new();
        for tracked in &self.localizations {
            for image in &tracked.localization.localized_image_list.referenced_images {
                languages_by_image
                    .entry((&tracked.container, image.filename.as_str()))
                    .or_default()
                    .insert(tracked.localization.language);
            }
        }
        languages_by_image
            .into_iter()
            .filter_map(|((container, filename), present_languages)| {
                let missing_languages: BTreeSet<LanguageType> = expected_languages
                    .difference(&present_languages)
                    .copied()
                    .collect();
                (!missing_languages.is_empty()).then(|| CompatibilityIssue::ImageInconsistencies {
                    container: container.clone(),
                    filename: filename.to_string(),
                    present_languages,
                    missing_languages,
                })
            })
            .collect()
    }

    fn invalid_tags(&self) -> Vec<CompatibilityIssue> {
        let texts_by_id = self.texts_by_root_content_id();
        let mut issues = Vec::new();
        for tracked in &self.localizations {
            let root = tracked.container.root();
            for (content_id, text) in &tracked.localization.localizable_text_content_mapping {
                let htmls: &[String] = match text {
                    LocalizableTextDto::SingleLocalizableText { text } => std::slice::from_ref(text),
                    LocalizableTextDto::SetOfLocalizableText { texts } => texts,
                };
                for invalid_tag in INVALID_TAGS {
                    if !htmls.iter().any(|html| html.contains(invalid_tag)) {
                        continue;
                    }
                    let text = texts_by_id
                        .get(&(root.clone(), content_id.as_str()))
                        .map_or_else(
                            || TextReference {
                                container: tracked.container.clone(),
                                content_id: content_id.clone(),
                            },
                            |text| (*text).clone(),
                        );
                    issues.push(CompatibilityIssue::HtmlHasInvalidTag {
                        language: tracked.localization.language,
                        text,
                        invalid_tag,
                    });
                }
            }
        }
        issues.sort_by(|a, b| invalid_tag_key(a).cmp(&invalid_tag_key(b)));
        issues
    }

    fn missing_translations(
        &self,
        expected_languages: &BTreeSet<LanguageType>,
    ) -> Vec<CompatibilityIssue> {
        let mut languages_by_text: BTreeMap<(ContentContainer, &str), BTreeSet<LanguageType>> =
            BTreeMap::new();
        for tracked in &self.localizations {
            let root = tracked.container.root();
            for content_id in tracked.localization.localizable_text_content_mapping.keys() {
                languages_by_text
                    .entry((root.clone(), content_id.as_str()))
                    .or_default()
                    .insert(tracked.localization.language);
            }
        }

        // Sorted and de-duplicated by the set.
        self.texts
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|text| {
                let present_languages = languages_by_text
                    .get(&(text.container.root(), text.content_id.as_str()))
                    .cloned()
                    .unwrap_or_default();
                let missing_languages: BTreeSet<LanguageType> = expected_languages
                    .difference(&present_languages)
                    .copied()
                    .collect();
                (!missing_languages.is_empty()).then(|| CompatibilityIssue::TextMissingTranslations {
                    text: text.clone(),
                    present_languages,
                    missing_languages,
                })
            })
            .collect()
    }

    /// First text reference for each `(root, content id)`.
    fn texts_by_root_content_id(&self) -> BTreeMap<(ContentContainer, &str), &TextReference> {
        let mut texts = BTreeMap::new();
        for text in &self.texts {
            texts
                .entry((text.container.root(), text.content_id.as_str()))
                .or_insert(text);
        }
        texts
    }
}

fn invalid_extension_key(issue: &CompatibilityIssue) -> Option<(LanguageType, &str)> {
    match issue {
        CompatibilityIssue::ImageHasInvalidExtension {
            language, filename, ..
        } => Some((*language, filename.as_str())),
        _ => None,
    }
}

fn invalid_tag_key(issue: &CompatibilityIssue) -> Option<(LanguageType, &str, &TextReference)> {
    match issue {
        CompatibilityIssue::HtmlHasInvalidTag {
            language,
            text,
            invalid_tag,
        } => Some((*language, *invalid_tag, text)),
        _ => None,
    }
}

fn has_extension(filename: &str, extension: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests;
