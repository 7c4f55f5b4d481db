//! Root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Synchronizes lesson content from the Oppia backend.
#[derive(Parser)]
#[command(name = "lessonsync")]
#[command(about = "Download lesson catalogs and content from the Oppia backend")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
