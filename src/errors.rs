//! Shared error types for linestat.
//!
//! Every failure a run can end with is a variant of [`Error`]. The binary
//! maps each variant to a process exit status via [`Error::exit_code`].
//!
//! # Example
//!
//! ```rust
//! use linestat::errors::Error;
//!
//! let err = Error::invalid_directory("/etc/hostname");
//! assert_eq!(err.exit_code(), 2);
//! assert!(err.to_string().contains("/etc/hostname"));
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for linestat operations
#[derive(Debug, Error)]
pub enum Error {
    /// The root argument does not exist or is not a directory
    #[error("'{}' is not a directory", path.display())]
    InvalidDirectory { path: PathBuf },

    /// A file could not be opened or read during analysis
    #[error("failed to read '{}'", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Aggregation was attempted over zero analyzed files
    #[error("no files to analyze")]
    EmptyCorpus,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The run was cancelled before every file was analyzed
    #[error("analysis cancelled")]
    Cancelled,

    /// Worker pool construction errors
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_directory(path: impl Into<PathBuf>) -> Self {
        Self::InvalidDirectory { path: path.into() }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Path the error is about, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidDirectory { path } | Self::FileRead { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }

    /// Process exit status for this error.
    ///
    /// Bad input (arguments, configuration) exits with 2, everything that
    /// fails once analysis started exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidDirectory { .. } | Self::Configuration(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// A file that was skipped because it could not be analyzed.
///
/// Only produced when the run tolerates unreadable files; under the
/// default fail-fast policy the first failure ends the run instead.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnalysisFailure {
    #[serde(serialize_with = "crate::core::serialize_lossy_path")]
    pub path: PathBuf,
    pub error: String, // String for Clone, preserves error message
}

impl AnalysisFailure {
    pub fn new(path: impl Into<PathBuf>, error: &Error) -> Self {
        Self {
            path: path.into(),
            error: error_chain(error),
        }
    }
}

/// `error` followed by each of its causes, separated by `": "`.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}
