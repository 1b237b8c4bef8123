//! CLI command implementations

pub mod check;
pub mod clean;
pub mod config;
pub mod list;

// Common utilities for commands
use crate::cli::context::CliContext;
use crate::config::CleanerConfig;
use crate::core::error::CleanerError;
use crate::ignore::scanner::{IgnoreScanner, ScanPhase, ScanReport};
use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

/// Resolve the directory to work on and check it can be cleaned.
///
/// The directory must exist and be a directory. With `require_ignore_file`
/// it must also hold its own ignore file.
pub fn prepare_root(
    directory: &Path,
    config: &CleanerConfig,
    require_ignore_file: bool,
) -> Result<PathBuf> {
    let absolute = if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        env::current_dir()?.join(directory)
    };

    if !absolute.exists() {
        return Err(CleanerError::root_not_found(absolute).into());
    }
    if !absolute.is_dir() {
        return Err(CleanerError::not_a_directory(absolute).into());
    }

    let root = absolute.canonicalize()?;
    let file_name = config.ignore_file_name();

    if require_ignore_file && config.require_root_ignore() && !root.join(file_name).exists() {
        return Err(CleanerError::MissingRootIgnoreFile {
            path: root,
            file_name: file_name.to_string(),
        }
        .into());
    }

    Ok(root)
}

/// Scan `root` with the configured ignore file name
pub fn scan_root(root: &Path, config: &CleanerConfig) -> Result<ScanReport> {
    let mut scanner = IgnoreScanner::new(root)?.ignore_file_name(config.ignore_file_name());

    if CliContext::is_verbose() {
        scanner = scanner.with_progress(|progress| {
            if progress.phase == ScanPhase::Complete {
                eprintln!(
                    "{} {} entries visited, {} ignored in {:.2?}",
                    "•".cyan(),
                    progress.entries_visited,
                    progress.ignored_found,
                    progress.elapsed
                );
            }
        });
    }

    Ok(scanner.scan()?)
}
