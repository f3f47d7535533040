//! Errors that end a scan.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{} is not a valid accounts input file", .0.display())]
    AccountsFileNotFound(PathBuf),

    #[error("Failed to read accounts file {}: {source}", .path.display())]
    AccountsFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line} of the accounts file is not a GitHub profile URL: {content}")]
    InvalidAccountLine { line: usize, content: String },

    #[error("Rate limit remaining {}", .remaining.map_or_else(|| "unknown".to_string(), |r| r.to_string()))]
    RateLimitExhausted {
        remaining: Option<u64>,
        #[source]
        source: ApiError,
    },

    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
