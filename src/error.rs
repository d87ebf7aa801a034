// Error types for leetfind.
// Covers GitHub requests, CSV parsing, cache I/O, and filter errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeetfindError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch file list from GitHub: {reason}")]
    DirectoryListFailed { reason: String },

    #[error("Column '{0}' is missing from the table")]
    MissingColumn(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LeetfindError>;
