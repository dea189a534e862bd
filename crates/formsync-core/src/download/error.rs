use thiserror::Error;

use crate::messages;
use crate::openrosa::FetchError;
use crate::validate::ValidationError;

/// Why one form could not be downloaded. Never aborts the rest of the batch.
#[derive(Debug, Error)]
pub enum FormDownloadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("form list entry has no download URL")]
    MissingDownloadUrl,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{file}: expected md5:{expected}, downloaded md5:{actual}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
    #[error("media file \"{0}\" has no hash")]
    MediaMissingHash(String),
    #[error("media file \"{0}\" has no download URL")]
    MediaMissingDownloadUrl(String),
    #[error("media file name \"{0}\" is not usable")]
    BadMediaFilename(String),
    #[error("manifest lists more than one media file saved as \"{0}\"")]
    DuplicateMediaFilename(String),
    #[error("storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("form store: {0:#}")]
    Store(anyhow::Error),
    #[error("download task failed: {0}")]
    Task(String),
}

impl FormDownloadError {
    /// Text for the failure details view.
    pub fn user_message(&self) -> String {
        match self {
            FormDownloadError::Validation(e) => e.user_message(),
            FormDownloadError::MediaMissingHash(file) => messages::media_with_no_hash_detail(file),
            FormDownloadError::HashMismatch { file, .. } => messages::join(&[
                &format!(
                    "The downloaded file \"{}\" does not match the hash the server published for it.",
                    file
                ),
                messages::REPORT_TO_PROJECT_LEAD,
            ]),
            other => other.to_string(),
        }
    }

    /// True when retrying cannot help without a server-side change.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            FormDownloadError::Validation(_)
                | FormDownloadError::MissingDownloadUrl
                | FormDownloadError::HashMismatch { .. }
                | FormDownloadError::MediaMissingHash(_)
                | FormDownloadError::MediaMissingDownloadUrl(_)
                | FormDownloadError::BadMediaFilename(_)
                | FormDownloadError::DuplicateMediaFilename(_)
        )
    }
}
