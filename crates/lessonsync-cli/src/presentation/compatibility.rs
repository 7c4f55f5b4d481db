//! Compatibility report lines printed after conversion.

use std::collections::{BTreeMap, BTreeSet};

use lessonsync_core::LanguageType;
use lessonsync_download::{
    CompatibilityIssue, CompatibilityReport, ContentContainer, ImageReference, IssueKind,
};

/// Issue breakdown, per-kind details and images the store did not have.
///
/// Images missing across translations are counted but not listed.
pub fn compatibility_lines(
    report: &CompatibilityReport,
    image_url: impl Fn(&ImageReference) -> String,
) -> Vec<String> {
    let breakdown = report.breakdown();
    let total = breakdown.total;
    let mut lines = vec![
        format!("{total} issues were found during import. High-level break-down:"),
        format!(
            "- {}/{total} correspond to invalid image extensions",
            breakdown.invalid_extensions
        ),
        format!(
            "- {}/{total} correspond to images missing across translations",
            breakdown.image_inconsistencies
        ),
        format!(
            "- {}/{total} correspond to invalid tags found in HTML",
            breakdown.invalid_tags
        ),
        format!(
            "- {}/{total} correspond to missing translations",
            breakdown.missing_translations
        ),
        String::new(),
        "Images with invalid extensions:".to_string(),
    ];
    for (container, issues) in by_container(report, IssueKind::InvalidImageExtension) {
        lines.push(format!("- Within {container}:"));
        for issue in issues {
            if let CompatibilityIssue::ImageHasInvalidExtension {
                language,
                filename,
                invalid_extension,
                ..
            } = issue
            {
                lines.push(format!(
                    "  - Image {filename} (language: {language}) has invalid extension: {invalid_extension}"
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("Images missing across translations: (Hidden)".to_string());

    lines.push(String::new());
    lines.push("HTML strings with invalid tags:".to_string());
    for (container, issues) in by_container(report, IssueKind::InvalidHtmlTag) {
        lines.push(format!("- Within {container}:"));
        let mut current_language = None;
        for issue in issues {
            if let CompatibilityIssue::HtmlHasInvalidTag {
                language,
                text,
                invalid_tag,
            } = issue
            {
                if current_language != Some(*language) {
                    lines.push(format!("  - For language {language}:"));
                    current_language = Some(*language);
                }
                lines.push(format!(
                    "    - Text with content ID {} has references tag: {invalid_tag}",
                    text.content_id
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("Strings missing translations:".to_string());
    for (container, issues) in by_container(report, IssueKind::MissingTranslation) {
        lines.push(format!("- Within {container}:"));
        for issue in issues {
            if let CompatibilityIssue::TextMissingTranslations {
                text,
                present_languages,
                missing_languages,
            } = issue
            {
                lines.push(format!(
                    "  - Text with content ID {} exists in languages: {}, but is missing in: {}",
                    text.content_id,
                    join_languages(present_languages),
                    join_languages(missing_languages)
                ));
            }
        }
    }

    if !report.failed_images.is_empty() {
        lines.push(String::new());
        lines.push("Images that failed to download:".to_string());
        for reference in &report.failed_images {
            lines.push(format!(
                "- Image failed to download (could not find image, language: {}): {}",
                reference.container.language,
                image_url(reference)
            ));
        }
    }
    lines
}

/// Fallback when the image store has no address for an image.
pub fn describe_image_location(reference: &ImageReference) -> String {
    let location = reference.location();
    format!(
        "{}/{}/assets/{}/{}",
        location.container_type.path_segment(),
        location.entity_id,
        location.image_type.path_segment(),
        location.filename
    )
}

fn by_container(
    report: &CompatibilityReport,
    kind: IssueKind,
) -> BTreeMap<&ContentContainer, Vec<&CompatibilityIssue>> {
    let mut grouped: BTreeMap<&ContentContainer, Vec<&CompatibilityIssue>> = BTreeMap::new();
    for issue in report.issues_of(kind) {
        grouped.entry(issue.container()).or_default().push(issue);
    }
    grouped
}

fn join_languages(languages: &BTreeSet<LanguageType>) -> String {
    languages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
