//! CLI error types and exit codes.

use lessonsync_download::SyncError;
use lessonsync_gae::GaeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The sync itself failed.
    #[error("{0}")]
    Sync(String),

    /// Invalid command line input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The backend returned content that could not be used.
    #[error("Data error: {0}")]
    Data(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Missing or unusable configuration such as the API secret.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to a sysexits-style exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Sync(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Data(_) => 65,     // EX_DATAERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<SyncError> for CliError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::ConflictingImageReplacements { .. }
            | SyncError::ChainedImageReplacements { .. }
            | SyncError::Conversion(_)
            | SyncError::MissingSubtopic { .. }
            | SyncError::VersionCapture(_)
            | SyncError::UnspecifiedLanguage(_)
            | SyncError::ImageRepair(_) => Self::Data(err.to_string()),
            SyncError::Io { .. } => Self::Io(err.to_string()),
            _ => Self::Sync(err.to_string()),
        }
    }
}

impl From<GaeError> for CliError {
    fn from(err: GaeError) -> Self {
        match err {
            GaeError::DebugWrite { .. } => Self::Io(err.to_string()),
            _ => Self::Config(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
