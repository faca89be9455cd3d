use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single remote call.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("invalid node URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build request: {0}")]
    Request(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status} - {message}")]
    Status { status: u16, message: String },
    #[error("remote error: {0}")]
    Remote(String),
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed session file {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no user id in session")]
    MissingUserId,
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Call(#[from] CallError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("unexpected user record: {0}")]
    Decode(String),
}
