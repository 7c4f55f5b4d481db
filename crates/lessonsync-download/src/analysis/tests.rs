use std::collections::BTreeMap;

use lessonsync_core::api::{FutureTopicDto, ProtoVersion};
use lessonsync_core::structure::{
    ExplorationDto, ExplorationLanguagePackDto, ImageContainerType, ImageType,
    LocalizedExplorationIdDto, ReferencedImageDto, ReferencedImageListDto, SkillSummaryDto,
    ThumbnailDto, UpcomingTopicSummaryDto,
};

use super::*;
use crate::images::ImageContainer;

fn localization(
    language: LanguageType,
    texts: &[(&str, &str)],
    images: &[&str],
) -> ContentLocalizationDto {
    let mut localization = ContentLocalizationDto::empty(language);
    for (content_id, text) in texts {
        localization.localizable_text_content_mapping.insert(
            (*content_id).to_string(),
            LocalizableTextDto::SingleLocalizableText {
                text: (*text).to_string(),
            },
        );
    }
    localization.localized_image_list = ReferencedImageListDto {
        referenced_images: images
            .iter()
            .map(|filename| ReferencedImageDto {
                filename: (*filename).to_string(),
            })
            .collect(),
    };
    localization
}

fn topic(localizations: Vec<ContentLocalizationDto>) -> DownloadableTopicSummaryDto {
    let mut localizations = localizations.into_iter();
    let default_mapping = localizations
        .next()
        .unwrap_or_else(|| ContentLocalizationDto::empty(LanguageType::English));
    DownloadableTopicSummaryDto {
        id: "topic_1".to_string(),
        name: SubtitledTextDto::new("name"),
        description: SubtitledTextDto::new("description"),
        content_version: 1,
        localizations: ContentLocalizationsDto {
            default_mapping,
            localizations: localizations.collect(),
        },
        story_summaries: Vec::new(),
        subtopic_summaries: Vec::new(),
        referenced_skills: Vec::new(),
    }
}

fn exploration(default_localization: ContentLocalizationDto) -> ExplorationDto {
    ExplorationDto {
        id: "exp_1".to_string(),
        title: SubtitledTextDto::new("title"),
        init_state_name: "Start".to_string(),
        states: BTreeMap::new(),
        default_localization,
        content_version: 1,
    }
}

fn exploration_pack(localization: ContentLocalizationDto) -> ExplorationLanguagePackDto {
    ExplorationLanguagePackDto {
        id: LocalizedExplorationIdDto {
            exploration_id: "exp_1".to_string(),
            language: localization.language,
        },
        localization,
    }
}

fn empty_catalog() -> TopicListResponse {
    TopicListResponse {
        proto_version: ProtoVersion::new(1),
        available_topics: Vec::new(),
        future_topics: Vec::new(),
    }
}

fn english_and_arabic() -> BTreeSet<LanguageType> {
    BTreeSet::from([LanguageType::English, LanguageType::Arabic])
}

fn analyze(fetched: &FetchedContent) -> CompatibilityReport {
    analyze_compatibility(
        &empty_catalog(),
        fetched,
        &ImageDownloadReport::default(),
        &english_and_arabic(),
    )
}

fn exp_container() -> ContentContainer {
    ContentContainer::Exploration {
        exploration_id: "exp_1".to_string(),
    }
}

#[test]
fn test_gif_images_and_thumbnails_have_invalid_extension() {
    let mut topic_default = localization(
        LanguageType::English,
        &[("name", "Name"), ("description", "About")],
        &[],
    );
    topic_default.thumbnail = Some(ThumbnailDto {
        referenced_image: ReferencedImageDto {
            filename: "cover.GIF".to_string(),
        },
        background_color_rgb: 0,
    });
    let mut fetched = FetchedContent {
        topic_summaries: vec![topic(vec![topic_default])],
        ..FetchedContent::default()
    };
    fetched.explorations.push(exploration(localization(
        LanguageType::English,
        &[("title", "Title")],
        &["still.png", "spin.gif"],
    )));

    let report = analyze(&fetched);

    let found: Vec<_> = report
        .issues_of(IssueKind::InvalidImageExtension)
        .map(|issue| match issue {
            CompatibilityIssue::ImageHasInvalidExtension {
                container,
                filename,
                invalid_extension,
                ..
            } => (container.to_string(), filename.as_str(), *invalid_extension),
            other => panic!("unexpected issue {other:?}"),
        })
        .collect();
    assert_eq!(
        found,
        vec![
            ("topic topic_1".to_string(), "cover.GIF", "gif"),
            ("exploration exp_1".to_string(), "spin.gif", "gif"),
        ]
    );
}

#[test]
fn test_image_missing_from_a_language_is_inconsistent() {
    let fetched = FetchedContent {
        explorations: vec![exploration(localization(
            LanguageType::English,
            &[("title", "Title")],
            &["shared.png", "english_only.png"],
        ))],
        exploration_packs: BTreeMap::from([(
            "exp_1".to_string(),
            vec![exploration_pack(localization(
                LanguageType::Arabic,
                &[("title", "عنوان")],
                &["shared.png"],
            ))],
        )]),
        ..FetchedContent::default()
    };

    let report = analyze(&fetched);

    let inconsistencies: Vec<_> = report.issues_of(IssueKind::ImageInconsistency).collect();
    assert_eq!(
        inconsistencies,
        vec![&CompatibilityIssue::ImageInconsistencies {
            container: exp_container(),
            filename: "english_only.png".to_string(),
            present_languages: BTreeSet::from([LanguageType::English]),
            missing_languages: BTreeSet::from([LanguageType::Arabic]),
        }]
    );
    assert_eq!(report.breakdown().missing_translations, 0);
}

#[test]
fn test_unsupported_tags_are_attributed_to_their_text() {
    let video = r#"<p>Watch</p><oppia-noninteractive-video video_id-with-value="x"></oppia-noninteractive-video>"#;
    let link = r#"<oppia-noninteractive-link url-with-value="y"></oppia-noninteractive-link>"#;
    let fetched = FetchedContent {
        explorations: vec![exploration(localization(
            LanguageType::English,
            &[("title", "Title"), ("content_1", video)],
            &[],
        ))],
        exploration_packs: BTreeMap::from([(
            "exp_1".to_string(),
            vec![exploration_pack(localization(
                LanguageType::Arabic,
                &[("title", "عنوان"), ("content_1", link)],
                &[],
            ))],
        )]),
        ..FetchedContent::default()
    };

    let report = analyze(&fetched);

    let text = TextReference {
        container: exp_container(),
        content_id: "content_1".to_string(),
    };
    let tags: Vec<_> = report.issues_of(IssueKind::InvalidHtmlTag).collect();
    assert_eq!(
        tags,
        vec![
            &CompatibilityIssue::HtmlHasInvalidTag {
                language: LanguageType::English,
                text: text.clone(),
                invalid_tag: "oppia-noninteractive-video",
            },
            &CompatibilityIssue::HtmlHasInvalidTag {
                language: LanguageType::Arabic,
                text,
                invalid_tag: "oppia-noninteractive-link",
            },
        ]
    );
}

#[test]
fn test_texts_without_every_language_are_missing_translations() {
    let fetched = FetchedContent {
        topic_summaries: vec![topic(vec![
            localization(
                LanguageType::English,
                &[("name", "Fractions"), ("description", "Parts of a whole")],
                &[],
            ),
            localization(LanguageType::Arabic, &[("name", "الكسور")], &[]),
        ])],
        ..FetchedContent::default()
    };

    let report = analyze(&fetched);

    assert_eq!(
        report.issues,
        vec![CompatibilityIssue::TextMissingTranslations {
            text: TextReference {
                container: ContentContainer::Topic {
                    topic_id: "topic_1".to_string(),
                },
                content_id: "description".to_string(),
            },
            present_languages: BTreeSet::from([LanguageType::English]),
            missing_languages: BTreeSet::from([LanguageType::Arabic]),
        }]
    );
}

#[test]
fn test_translations_of_nested_structures_count_toward_their_topic() {
    let mut dto = topic(vec![localization(
        LanguageType::English,
        &[("name", "Name"), ("description", "About")],
        &[],
    )]);
    dto.localizations
        .localizations
        .push(localization(LanguageType::Arabic, &[("name", "اسم")], &[]));
    dto.referenced_skills.push(SkillSummaryDto {
        id: "skill_1".to_string(),
        name: SubtitledTextDto::new("skill_name"),
        content_version: 1,
        localizations: ContentLocalizationsDto {
            default_mapping: localization(LanguageType::English, &[("skill_name", "Skill")], &[]),
            // The topic description is translated in the skill's localizations.
            localizations: vec![localization(
                LanguageType::Arabic,
                &[("skill_name", "مهارة"), ("description", "حول")],
                &[],
            )],
        },
    });
    let fetched = FetchedContent {
        topic_summaries: vec![dto],
        ..FetchedContent::default()
    };

    let report = analyze(&fetched);

    assert!(report.issues.is_empty(), "{:?}", report.issues);
}

#[test]
fn test_upcoming_topics_are_scanned() {
    let mut catalog = empty_catalog();
    catalog.future_topics.push(FutureTopicDto {
        topic_id: "topic_2".to_string(),
        topic_summary: UpcomingTopicSummaryDto {
            id: "topic_2".to_string(),
            name: SubtitledTextDto::new("name"),
            description: SubtitledTextDto::new("description"),
            content_version: 1,
            localizations: ContentLocalizationsDto {
                default_mapping: localization(
                    LanguageType::English,
                    &[("name", "Soon"), ("description", "Later")],
                    &[],
                ),
                localizations: Vec::new(),
            },
            expected_release_date_millis: None,
        },
    });

    let report = analyze_compatibility(
        &catalog,
        &FetchedContent::default(),
        &ImageDownloadReport::default(),
        &english_and_arabic(),
    );

    let breakdown = report.breakdown();
    assert_eq!(breakdown.total, 2);
    assert_eq!(breakdown.missing_translations, 2);
    assert!(
        report
            .issues
            .iter()
            .all(|issue| issue.container().to_string() == "topic topic_2")
    );
}

#[test]
fn test_issues_are_grouped_by_container_then_kind() {
    let exploration_default = localization(
        LanguageType::English,
        &[
            ("title", "Title"),
            ("content_1", "<oppia-noninteractive-tabs></oppia-noninteractive-tabs>"),
        ],
        &["anim.gif"],
    );
    let fetched = FetchedContent {
        topic_summaries: vec![topic(vec![localization(
            LanguageType::English,
            &[("name", "Name"), ("description", "About")],
            &[],
        )])],
        explorations: vec![exploration(exploration_default)],
        ..FetchedContent::default()
    };

    let report = analyze(&fetched);

    let order: Vec<_> = report
        .issues
        .iter()
        .map(|issue| (issue.container().to_string(), issue.kind()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("topic topic_1".to_string(), IssueKind::MissingTranslation),
            ("topic topic_1".to_string(), IssueKind::MissingTranslation),
            ("exploration exp_1".to_string(), IssueKind::InvalidImageExtension),
            ("exploration exp_1".to_string(), IssueKind::ImageInconsistency),
            ("exploration exp_1".to_string(), IssueKind::InvalidHtmlTag),
            ("exploration exp_1".to_string(), IssueKind::MissingTranslation),
            ("exploration exp_1".to_string(), IssueKind::MissingTranslation),
        ]
    );
    let breakdown = report.breakdown();
    assert_eq!(breakdown.total, 7);
    assert_eq!(breakdown.invalid_extensions, 1);
    assert_eq!(breakdown.image_inconsistencies, 1);
    assert_eq!(breakdown.invalid_tags, 1);
    assert_eq!(breakdown.missing_translations, 4);
}

#[test]
fn test_failed_images_are_listed_in_reference_order() {
    let reference = |filename: &str| ImageReference {
        container: ImageContainer {
            container_type: ImageContainerType::Exploration,
            entity_id: "exp_1".to_string(),
            language: LanguageType::Swahili,
        },
        image_type: ImageType::HtmlImage,
        filename: filename.to_string(),
    };
    let images = ImageDownloadReport {
        images: vec![
            (reference("missing_b.png"), DownloadedImage::FailedCouldNotFind),
            (reference("present.png"), DownloadedImage::Succeeded),
            (reference("missing_a.png"), DownloadedImage::FailedCouldNotFind),
        ],
    };

    let report = analyze_compatibility(
        &empty_catalog(),
        &FetchedContent::default(),
        &images,
        &english_and_arabic(),
    );

    let filenames: Vec<_> = report
        .failed_images
        .iter()
        .map(|image| image.filename.as_str())
        .collect();
    assert_eq!(filenames, vec!["missing_b.png", "missing_a.png"]);
    assert!(report.issues.is_empty());
}

#[test]
fn test_container_descriptions() {
    let chapter = ContentContainer::Chapter {
        topic_id: "t".to_string(),
        story_id: "s".to_string(),
        exploration_id: "e".to_string(),
    };

    assert_eq!(chapter.to_string(), "chapter (exp: e) in story s in topic t");
    assert_eq!(
        chapter.root(),
        ContentContainer::Topic {
            topic_id: "t".to_string()
        }
    );
    assert_eq!(exp_container().root(), exp_container());
}
