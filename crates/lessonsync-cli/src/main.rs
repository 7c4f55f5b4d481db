//! CLI entry point.
//!
//! Parses arguments, wires the context through [`bootstrap`] and runs the
//! selected handler on a dedicated sync executor so Ctrl-C can cancel it.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lessonsync_cli::presentation::{ConsoleProgress, ConsoleSyncEmitter};
use lessonsync_cli::{
    Cli, CliConfig, CliContext, CliError, Commands, bootstrap, handlers, run_to_completion,
};
use lessonsync_core::SyncEventEmitterPort;
use lessonsync_download::{DEFAULT_SHUTDOWN_GRACE, SyncExecutor};
use tracing::warn;
use tracing_subscriber::EnvFilter;

enum Job {
    LessonList { output_path: PathBuf },
    Lessons { output_dir: Option<PathBuf> },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lessonsync=debug,warn"
    } else {
        "lessonsync=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command preconditions and split the command into bootstrap config and job.
fn prepare(command: Commands) -> Result<(CliConfig, Job), CliError> {
    match command {
        Commands::DownloadLessonList {
            base_url,
            gcs_base_url,
            gcs_bucket,
            api_secret_file_path,
            output_textproto_path,
            api_debug_dir_path,
        } => {
            handlers::download_lesson_list::check_output_path(&output_textproto_path)?;
            let api_secret =
                handlers::download_lesson_list::read_api_secret(&api_secret_file_path)?;
            let config = CliConfig {
                base_url,
                gcs_base_url,
                gcs_bucket,
                api_secret,
                api_debug_dir: Some(api_debug_dir_path),
                ..CliConfig::default()
            };
            Ok((
                config,
                Job::LessonList {
                    output_path: output_textproto_path,
                },
            ))
        }
        Commands::DownloadLessons {
            base_url,
            gcs_base_url,
            gcs_bucket,
            api_secret,
            test_topic_ids,
            output_dir,
            api_debug_dir,
            image_concurrency,
        } => {
            let config = CliConfig {
                base_url,
                gcs_base_url,
                gcs_bucket,
                api_secret,
                api_debug_dir,
                test_topic_ids,
                image_concurrency,
            };
            Ok((config, Job::Lessons { output_dir }))
        }
    }
}

async fn run_job(
    ctx: Arc<CliContext>,
    job: Job,
    emitter: Arc<dyn SyncEventEmitterPort>,
) -> Result<(), CliError> {
    match job {
        Job::LessonList { output_path } => {
            handlers::download_lesson_list::execute(&ctx, &output_path, emitter).await
        }
        Job::Lessons { output_dir } => {
            handlers::download_lessons::execute(&ctx, output_dir.as_deref(), emitter)
                .await
                .map(|_| ())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (config, job) = prepare(cli.command)?;
    let ctx = Arc::new(bootstrap(&config)?);

    let executor = SyncExecutor::new()?;
    let token = executor.cancellation_token();
    executor.handle().spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling sync");
            token.cancel();
        }
    });

    let emitter: Arc<dyn SyncEventEmitterPort> =
        Arc::new(ConsoleSyncEmitter::new(ConsoleProgress::new()));
    run_to_completion(executor, DEFAULT_SHUTDOWN_GRACE, run_job(ctx, job, emitter))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
