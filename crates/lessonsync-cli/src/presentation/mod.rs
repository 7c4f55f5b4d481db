//! Console output for sync runs.
//!
//! Keep this module format-only; counting happens in the sync report.

pub mod compatibility;
pub mod progress;
pub mod summary;

pub use compatibility::{compatibility_lines, describe_image_location};
pub use progress::{CONSOLE_COLUMN_COUNT, ConsoleProgress, ConsoleSyncEmitter};
pub use summary::{
    download_result_lines, image_repair_lines, image_stats_lines, print_lines,
    topic_list_summary,
};
