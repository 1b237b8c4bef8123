//! Error types for gi-cleaner

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gi-cleaner operations
#[derive(Error, Debug)]
pub enum CleanerError {
    /// Scan root errors
    #[error("Directory '{path}' does not exist.")]
    RootNotFound { path: PathBuf },

    #[error("'{path}' is not a directory.")]
    NotADirectory { path: PathBuf },

    #[error("No {file_name} found in '{path}'.")]
    MissingRootIgnoreFile { path: PathBuf, file_name: String },

    #[error("Path '{path}' is outside of '{root}'")]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Interactive prompt errors
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CleanerError {
    /// Create a new root not found error
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// Create a new not a directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for gi-cleaner operations
pub type Result<T> = std::result::Result<T, CleanerError>;

/// A non-fatal problem met while scanning.
///
/// Issues never stop a scan; they are collected next to the results so the
/// caller can decide whether to show them or abort.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanIssue {
    #[error("Cannot read directory {}: {reason}", .path.display())]
    UnreadableDirectory { path: PathBuf, reason: String },

    #[error("Cannot read ignore file {}: {reason}", .path.display())]
    UnreadableIgnoreFile { path: PathBuf, reason: String },

    #[error("Malformed pattern at {}:{line}: {pattern}", .path.display())]
    MalformedPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
    },
}
