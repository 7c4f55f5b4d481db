//! Command-line front end for lesson synchronization.
//!
//! `download-lesson-list` captures the catalog's content versions as a
//! text-format manifest; `download-lessons` fetches every structure and can
//! export it together with its images.

#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod runner;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
pub use runner::run_to_completion;
