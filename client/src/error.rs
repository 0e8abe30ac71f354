use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Any failure of the ingest call. Callers treat every variant the same way.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upload rejected with status {status}: {detail}")]
    Status { status: StatusCode, detail: String },
    #[error("upload response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Any failure of the ask call.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("ask request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("ask rejected with status {status}: {detail}")]
    Status { status: StatusCode, detail: String },
    #[error("ask response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

impl UploadError {
    pub fn notice(&self) -> &'static str {
        "Failed to upload PDF. Please try again."
    }
}

impl AskError {
    pub fn notice(&self) -> &'static str {
        "Failed to get an answer. Please try again."
    }
}
