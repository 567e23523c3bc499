//! Error types for each stage of the import.
//!
//! Extraction errors are per-file and never abort a run. API errors raised
//! while resetting the knowledge source abort the run; API errors raised while
//! uploading are wrapped in [`UploadError`] together with the article id.

use thiserror::Error;

/// Failure to open or enumerate the documentation archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to open archive: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Failure to turn one markdown file into a page document.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to decode front matter: {0}")]
    Metadata(#[from] serde_yaml::Error),
    #[error("front matter is not a key/value mapping")]
    NotAMapping,
    #[error("front matter is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Failure talking to the knowledge-base API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected API response: {0}")]
    Decode(String),
}

/// A single article upload that failed.
#[derive(Debug, Error)]
#[error("failed to upload article `{article_id}`: {source}")]
pub struct UploadError {
    pub article_id: String,
    #[source]
    pub source: ApiError,
}

/// A setup failure that aborts the whole import before any upload.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read documentation archive: {0}")]
    Archive(#[from] ArchiveError),
    #[error("could not reset knowledge source: {0}")]
    Source(#[source] ApiError),
}
