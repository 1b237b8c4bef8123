//! Gitignore-compatible file selection
//!
//! This module finds the files and directories a tree's ignore files select,
//! following Git's rules: the last matching pattern wins, deeper ignore files
//! override shallower ones, `!` re-includes, a trailing `/` restricts a pattern
//! to directories, and a `/` anywhere but at the end anchors it. Ignored
//! directories are reported once and never descended into, so nothing below
//! them can be re-included.

pub mod checker;
pub mod glob;
pub mod matcher;
pub mod parser;
pub mod scanner;
pub mod walker;

// Re-export commonly used items
pub use checker::{resolve, IgnoreChecker, LayeredContext, MatchDecision, MatchedRule};
pub use glob::Glob;
pub use matcher::matches;
pub use parser::{Pattern, RuleSet};
pub use scanner::{
    scan, IgnoreScanner, IgnoredEntry, ScanPhase, ScanProgress, ScanReport, ScanStats,
};
pub use walker::{walk, VisitedEntry, Walk};
