//! Error types for rollno-dl
//!
//! Errors fall into two groups:
//! - Per-identifier failures ([`FetchError`]) which are logged at the fetcher
//!   boundary and turned into [`Outcome::Absent`](crate::types::Outcome::Absent).
//!   They never reach the coordinator.
//! - Run-level failures ([`Error`]) such as bad configuration or an archive
//!   that cannot be written. These terminate the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rollno-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rollno-dl
///
/// Every variant is fatal to a run. Per-identifier problems use [`FetchError`].
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "ROLL_NUMBERS_RANGE")
        key: Option<String>,
    },

    /// Archive could not be created
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Spreadsheet could not be written
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging subscriber could not be installed
    #[error("logging error: {0}")]
    Logging(String),
}

impl Error {
    /// Build a [`Error::Config`] tagged with the offending key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Archive-related errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// An input file does not exist
    #[error("input file not found: {path}")]
    MissingFile {
        /// The missing path
        path: PathBuf,
    },

    /// The archive password is empty
    #[error("archive password must not be empty")]
    EmptyPassword,

    /// The zip writer failed
    #[error("failed to write {archive}: {reason}")]
    WriteFailed {
        /// The archive being written
        archive: PathBuf,
        /// Underlying failure
        reason: String,
    },
}

/// Failure of a single record lookup
///
/// These are caught inside the fetcher, logged, and converted to
/// [`Outcome::Absent`](crate::types::Outcome::Absent).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or a non-2xx status
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body is not valid JSON or lacks the result object
    #[error("parse error: {reason}")]
    Parse {
        /// What went wrong
        reason: String,
        /// The raw body, lossily decoded, for the log line
        body: String,
    },

    /// Well-formed response that carries no record
    #[error("no record: {0}")]
    EmptyResult(String),
}

impl FetchError {
    /// Whether this failure is the remote's way of saying "no such record"
    ///
    /// Empty results are logged as warnings, everything else as errors.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, FetchError::EmptyResult(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("request timed out: {}", e)
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else if let Some(status) = e.status() {
            format!("HTTP {}: {}", status, e)
        } else {
            e.to_string()
        };
        FetchError::Transport(message)
    }
}
