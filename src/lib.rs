//! gi-cleaner - find and remove files ignored by .gitignore
//!
//! gi-cleaner walks a directory tree, applies every `.gitignore` it meets with
//! Git's matching rules and reports what is ignored. The CLI then lists those
//! entries and deletes them after confirmation.
//!
//! # Core Features
//!
//! - **Git-compatible patterns**: `*`, `?`, `**`, character classes, negation,
//!   anchoring and directory-only rules
//! - **Layered ignore files**: deeper `.gitignore` files override shallower ones
//!   and only apply inside their own directory
//! - **Pruning**: ignored directories are reported once and never descended into
//! - **Lenient scanning**: unreadable directories and malformed patterns are
//!   collected as issues instead of aborting
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use gi_cleaner::scan;
//! use std::path::Path;
//!
//! let report = scan(Path::new("./my-project"))?;
//! for entry in &report.entries {
//!     println!("{} ({})", entry.path, entry.matched_by);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;

// Re-export commonly used types
pub use crate::core::{
    error::{CleanerError, Result, ScanIssue},
    types::{EntryKind, RelPath},
};

pub use ignore::{
    checker::{IgnoreChecker, MatchDecision},
    scanner::{scan, IgnoreScanner, IgnoredEntry, ScanReport},
};

pub use cleanup::{run_clean, CleanOutcome, Confirm, Remover};
