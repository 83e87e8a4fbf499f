use std::path::PathBuf;

use thiserror::Error;

use super::model::CleanupOutcome;
use crate::transport::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("Invalid track data: audio link is missing.")]
    MissingAudioLink,

    #[error("Destination path is required.")]
    MissingDestination,

    #[error("Cannot derive a file name from audio link: {0}")]
    UnusableLink(String),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("Folder prompt failed: {0}")]
    Prompt(String),

    /// Only the download failure is displayed; `cleanup` is diagnostic.
    #[error("{source}")]
    Download {
        #[source]
        source: DownloadError,
        cleanup: CleanupOutcome,
    },

    #[error("Command channel error: {0}")]
    Channel(String),
}

impl SaveError {
    pub fn cleanup(&self) -> Option<&CleanupOutcome> {
        match self {
            SaveError::Download { cleanup, .. } => Some(cleanup),
            _ => None,
        }
    }
}
