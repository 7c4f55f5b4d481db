//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the topic catalog and write its content versions as a text-format manifest
    DownloadLessonList {
        /// Base url of the lesson backend
        base_url: String,
        /// Base url of the image bucket host
        gcs_base_url: String,
        /// Image bucket name
        gcs_bucket: String,
        /// File holding the API secret
        api_secret_file_path: PathBuf,
        /// Where to write the manifest; its directory must exist
        output_textproto_path: PathBuf,
        /// Directory for raw request/response dumps (created if absent)
        api_debug_dir_path: PathBuf,
    },

    /// Download every structure of every downloadable topic
    DownloadLessons {
        /// Base url of the lesson backend
        base_url: String,
        /// Base url of the image bucket host
        gcs_base_url: String,
        /// Image bucket name
        gcs_bucket: String,
        /// API secret, taken literally
        api_secret: String,
        /// Comma-separated topic ids treated as having no prerequisites
        #[arg(value_delimiter = ',')]
        test_topic_ids: Vec<String>,
        /// Write wire structures, converted content and images here
        #[arg(long, env = "LESSONSYNC_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
        /// Directory for raw request/response dumps
        #[arg(long, env = "LESSONSYNC_API_DEBUG_DIR")]
        api_debug_dir: Option<PathBuf>,
        /// Number of images fetched at once
        #[arg(long, env = "LESSONSYNC_IMAGE_CONCURRENCY")]
        image_concurrency: Option<usize>,
    },
}
