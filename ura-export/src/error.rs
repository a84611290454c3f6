//! Export error types.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while delivering an exported document.
///
/// Compiling a non-empty project never fails; everything here comes from
/// the delivery modes.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The project has no pages to export.
    #[error("Project has no pages to export")]
    EmptyProject,

    /// Building the zip archive failed.
    #[error("Failed to package the project: {0}")]
    Packaging(String),

    /// Share mode was requested without an upload collaborator.
    #[error("No uploader configured for share mode")]
    UploaderMissing,

    /// The upload collaborator failed.
    #[error("Failed to upload the project zip file: {0}")]
    Upload(#[from] UploadError),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Packaging(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Packaging(err.to_string())
    }
}

/// Errors reported by an [`Uploader`](crate::upload::Uploader).
#[derive(Debug, Error)]
pub enum UploadError {
    /// The upload endpoint URL is invalid.
    #[error("invalid upload URL: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, timeout, etc.).
    #[cfg(feature = "upload")]
    #[error("upload HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("upload rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The host answered successfully but without a usable URL.
    #[error("unexpected upload response: {0}")]
    UnexpectedResponse(String),
}

impl UploadError {
    /// Returns true if retrying the upload may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "upload")]
            Self::Http(_) => true,
            Self::Rejected { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidUrl(_) | Self::UnexpectedResponse(_) => false,
        }
    }
}
