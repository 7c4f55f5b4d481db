//! `download-lessons`: fetch every structure, optionally exporting it with images.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use lessonsync_core::{LanguageType, SyncEventEmitterPort};
use lessonsync_download::{
    ContentExporter, SyncReport, analyze_compatibility, collect_image_references,
    convert_content,
};
use tracing::{info, warn};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{
    compatibility_lines, describe_image_location, download_result_lines, image_repair_lines,
    image_stats_lines, print_lines, topic_list_summary,
};

pub async fn execute(
    ctx: &CliContext,
    output_dir: Option<&Path>,
    emitter: Arc<dyn SyncEventEmitterPort>,
) -> Result<SyncReport, CliError> {
    let orchestrator = ctx.orchestrator();
    let report = orchestrator.sync_lessons(Arc::clone(&emitter)).await?;

    println!("{}", topic_list_summary(&report.catalog));
    println!(
        "Requested {} content items.",
        report.requested_identifiers.len()
    );
    println!();
    print_lines(&download_result_lines(
        &report.breakdown,
        orchestrator.config().requested_languages(),
    ));
    if !report.retry_identifiers.is_empty() {
        warn!(
            count = report.retry_identifiers.len(),
            "Some structures should be requested again"
        );
        println!(
            "{} structures can be retried in a later run.",
            report.retry_identifiers.len()
        );
    }

    if let Some(output_dir) = output_dir {
        export(ctx, &report, output_dir, &emitter).await?;
    }
    Ok(report)
}

async fn export(
    ctx: &CliContext,
    report: &SyncReport,
    output_dir: &Path,
    emitter: &Arc<dyn SyncEventEmitterPort>,
) -> Result<(), CliError> {
    let exporter = ContentExporter::new(output_dir);
    println!();
    println!("Writing successful results to: {}/...", output_dir.display());
    exporter.write_wire(&report.content.download_results).await?;

    let references = collect_image_references(&report.content.download_results);
    let images = ctx
        .image_downloader()
        .download_all(&references, &exporter.images_dir(), emitter)
        .await?;
    println!("Images downloaded to: {}/.", exporter.images_dir().display());
    println!();
    print_lines(&image_stats_lines(&images.stats()));
    print_lines(&image_repair_lines(&images));

    let converted = convert_content(&report.catalog, &report.fetched, &images)?;
    let config = ctx.orchestrator().config();
    let expected_languages: BTreeSet<LanguageType> = config
        .requested_languages()
        .iter()
        .copied()
        .chain([config.default_language()])
        .collect();
    let compatibility = analyze_compatibility(
        &report.catalog,
        &report.fetched,
        &images,
        &expected_languages,
    );
    println!();
    print_lines(&compatibility_lines(&compatibility, |reference| {
        ctx.image_store
            .image_url(&reference.location())
            .unwrap_or_else(|| describe_image_location(reference))
    }));
    let written = exporter.write_content(&converted).await?;
    info!(files = written, "Export complete");
    println!("Converted content written to: {}", output_dir.display());
    Ok(())
}
