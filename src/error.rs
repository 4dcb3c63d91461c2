use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("file not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    #[error("cannot read domain list {}: {source}", path.display())]
    TargetUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file {} is empty or contains no valid domains", .0.display())]
    EmptyTargetList(PathBuf),

    #[error("invalid domain: {0:?}")]
    InvalidDomain(String),

    #[error("output directory {} is not usable: {reason}", path.display())]
    OutputDir { path: PathBuf, reason: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("every search query failed for {0}")]
    SearchUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CResult<T> = Result<T, HarvestError>;
