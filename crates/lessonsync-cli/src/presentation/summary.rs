//! Summary lines printed between sync phases.

use std::collections::BTreeMap;

use lessonsync_core::{LanguageType, StructureKind, TopicListResponse};
use lessonsync_download::{DownloadedImage, ImageDownloadReport, ImageStats, KindBreakdown};

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub fn topic_list_summary(catalog: &TopicListResponse) -> String {
    let downloadable: Vec<&str> = catalog
        .downloadable_topics()
        .map(|topic| topic.id.as_str())
        .collect();
    let future = catalog.future_topic_ids();
    format!(
        "Downloaded topic results: {} topics are available, {} are downloadable, IDs: {:?}. \
         {} topics will later be available, IDs: {:?}.",
        catalog.available_topics.len(),
        downloadable.len(),
        downloadable,
        future.len(),
        future,
    )
}

/// One line per structure kind; language packs get a line per language.
pub fn download_result_lines(
    breakdown: &BTreeMap<StructureKind, KindBreakdown>,
    languages: &[LanguageType],
) -> Vec<String> {
    let mut lines = vec!["Download results:".to_string()];
    for kind in StructureKind::ALL {
        let counts = breakdown.get(&kind).cloned().unwrap_or_default();
        lines.push(format!(
            "- {}/{} {} succeeded",
            counts.overall.succeeded,
            counts.overall.total,
            kind.display_plural()
        ));
        if kind.is_language_pack() {
            for language in languages {
                let count = counts.by_language.get(language).copied().unwrap_or_default();
                lines.push(format!(
                    "  - {language}: {}/{} succeeded",
                    count.succeeded, count.total
                ));
            }
        }
    }
    lines
}

pub fn image_stats_lines(stats: &ImageStats) -> Vec<String> {
    let total = stats.total;
    vec![
        format!("{}/{total} images successfully downloaded.", stats.succeeded),
        format!("{}/{total} images were de-duplicated.", stats.duplicated),
        format!("{}/{total} images required renaming due to conflicts.", stats.renamed),
        format!("{}/{total} images required repairing from SVG to PNG.", stats.converted_svg),
        format!("{}/{total} images required repairing from GIF to PNG.", stats.converted_gif),
        format!("{}/{total} images could not be found.", stats.missing),
    ]
}

/// Images whose stored name differs from the referenced one.
pub fn image_repair_lines(report: &ImageDownloadReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (reference, image) in &report.images {
        let container = &reference.container;
        let detail = match image {
            DownloadedImage::Renamed {
                old_filename,
                new_filename,
            } => format!("- Image {old_filename} was renamed to {new_filename}"),
            DownloadedImage::ConvertedSvgToPng {
                new_filename,
                width,
                height,
            } => format!(
                "- Image {} was rendered to {new_filename} at {width}x{height}",
                reference.filename
            ),
            DownloadedImage::ConvertedGifToPng { new_filename } => format!(
                "- Image {} was converted to {new_filename}",
                reference.filename
            ),
            DownloadedImage::Succeeded
            | DownloadedImage::Duplicated
            | DownloadedImage::FailedCouldNotFind => continue,
        };
        lines.push(format!(
            "{detail} ({} {}, {})",
            container.container_type.path_segment(),
            container.entity_id,
            container.language
        ));
    }
    if !lines.is_empty() {
        lines.insert(0, "Please manually verify the following repaired images:".to_string());
    }
    lines
}
