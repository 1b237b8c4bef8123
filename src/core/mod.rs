//! Core types and error handling for gi-cleaner

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{CleanerError, Result, ScanIssue};
pub use types::{EntryKind, RelPath, DEFAULT_IGNORE_FILE, VCS_DIR_NAME};
