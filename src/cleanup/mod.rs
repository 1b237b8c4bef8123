//! Removing ignored entries found by a scan
//!
//! Confirmation and removal sit behind the [`Confirm`] and [`Remover`] traits
//! so the whole clean flow can run against fakes.

pub mod confirm;
pub mod remover;

pub use confirm::{AssumeYes, Confirm};
pub use remover::{DryRunRemover, FsRemover, Remover};

use crate::core::error::Result;
use crate::ignore::scanner::{IgnoredEntry, ScanReport};
use serde::Serialize;
use tracing::{info, warn};

/// Prompt shown before deleting
pub const CONFIRM_PROMPT: &str = "Do you want to delete these items?";

/// Something that happened to one entry during removal
#[derive(Debug)]
pub enum RemovalEvent<'a> {
    Removed(&'a IgnoredEntry),
    Failed {
        entry: &'a IgnoredEntry,
        error: std::io::Error,
    },
}

/// A removal that did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalFailure {
    pub path: String,
    pub reason: String,
}

/// Counts from a removal run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemovalSummary {
    pub files: usize,
    pub directories: usize,
    pub failures: Vec<RemovalFailure>,
}

/// How a clean run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The scan found nothing to remove
    NothingToClean,
    /// Dry run: what would have been removed
    DryRun(RemovalSummary),
    /// The user declined
    Cancelled,
    Removed(RemovalSummary),
}

/// Order in which entries are removed: files first, then directories deepest
/// first. Walk order is kept among entries of the same rank.
pub fn removal_order(entries: &[IgnoredEntry]) -> Vec<&IgnoredEntry> {
    let mut files: Vec<&IgnoredEntry> = entries.iter().filter(|e| !e.is_dir()).collect();
    let mut directories: Vec<&IgnoredEntry> = entries.iter().filter(|e| e.is_dir()).collect();
    directories.sort_by(|a, b| b.path.depth().cmp(&a.path.depth()));

    files.append(&mut directories);
    files
}

/// Remove `entries` with `remover`, reporting each outcome to `observer`.
///
/// A failed removal is recorded and the run continues with the next entry.
pub fn remove_entries<F>(
    entries: &[IgnoredEntry],
    remover: &dyn Remover,
    mut observer: F,
) -> RemovalSummary
where
    F: FnMut(&RemovalEvent<'_>),
{
    let mut summary = RemovalSummary::default();

    for entry in removal_order(entries) {
        let result = if entry.is_dir() {
            remover.remove_dir(&entry.absolute)
        } else {
            remover.remove_file(&entry.absolute)
        };

        match result {
            Ok(()) => {
                if entry.is_dir() {
                    summary.directories += 1;
                } else {
                    summary.files += 1;
                }
                observer(&RemovalEvent::Removed(entry));
            }
            Err(error) => {
                warn!(path = %entry.path, error = %error, "removal failed");
                summary.failures.push(RemovalFailure {
                    path: entry.path.to_string(),
                    reason: error.to_string(),
                });
                observer(&RemovalEvent::Failed { entry, error });
            }
        }
    }

    info!(
        files = summary.files,
        directories = summary.directories,
        failures = summary.failures.len(),
        "removal finished"
    );

    summary
}

/// Clean the entries of `report`: ask, then remove.
///
/// A dry run never asks and never touches the file system.
pub fn run_clean<F>(
    report: &ScanReport,
    dry_run: bool,
    confirm: &mut dyn Confirm,
    remover: &dyn Remover,
    observer: F,
) -> Result<CleanOutcome>
where
    F: FnMut(&RemovalEvent<'_>),
{
    if report.is_empty() {
        return Ok(CleanOutcome::NothingToClean);
    }

    if dry_run {
        let summary = remove_entries(&report.entries, &DryRunRemover, |_| {});
        return Ok(CleanOutcome::DryRun(summary));
    }

    if !confirm.confirm(CONFIRM_PROMPT)? {
        info!("deletion cancelled");
        return Ok(CleanOutcome::Cancelled);
    }

    Ok(CleanOutcome::Removed(remove_entries(
        &report.entries,
        remover,
        observer,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntryKind, RelPath};
    use crate::ignore::scanner::{scan, ScanStats};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn entry(path: &str, kind: EntryKind) -> IgnoredEntry {
        IgnoredEntry {
            path: RelPath::new(path),
            kind,
            absolute: PathBuf::from("/project").join(path),
            matched_by: String::new(),
        }
    }

    fn report(entries: Vec<IgnoredEntry>) -> ScanReport {
        ScanReport {
            root: PathBuf::from("/project"),
            entries,
            issues: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Records calls and fails for paths ending in `locked`
    #[derive(Default)]
    struct RecordingRemover {
        calls: RefCell<Vec<String>>,
    }

    impl RecordingRemover {
        fn record(&self, kind: &str, path: &Path) -> io::Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("{} {}", kind, path.display()));
            if path.ends_with("locked") {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"));
            }
            Ok(())
        }
    }

    impl Remover for RecordingRemover {
        fn remove_file(&self, path: &Path) -> io::Result<()> {
            self.record("file", path)
        }

        fn remove_dir(&self, path: &Path) -> io::Result<()> {
            self.record("dir", path)
        }
    }

    struct Answer {
        value: bool,
        asked: usize,
    }

    impl Confirm for Answer {
        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            assert_eq!(prompt, CONFIRM_PROMPT);
            self.asked += 1;
            Ok(self.value)
        }
    }

    #[test]
    fn test_files_first_then_deepest_directories() {
        let entries = vec![
            entry("a", EntryKind::Directory),
            entry("x.o", EntryKind::File),
            entry("b/c/d", EntryKind::Directory),
            entry("b/y.o", EntryKind::File),
            entry("b/c", EntryKind::Directory),
        ];

        let order: Vec<&str> = removal_order(&entries)
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(order, vec!["x.o", "b/y.o", "b/c/d", "b/c", "a"]);
    }

    #[test]
    fn test_failures_do_not_stop_removal() {
        let remover = RecordingRemover::default();
        let entries = vec![
            entry("locked", EntryKind::File),
            entry("free.o", EntryKind::File),
            entry("build", EntryKind::Directory),
        ];

        let mut failed = Vec::new();
        let summary = remove_entries(&entries, &remover, |event| {
            if let RemovalEvent::Failed { entry, .. } = event {
                failed.push(entry.path.to_string());
            }
        });

        assert_eq!(summary.files, 1);
        assert_eq!(summary.directories, 1);
        assert_eq!(failed, vec!["locked"]);
        assert_eq!(summary.failures[0].path, "locked");
        assert_eq!(remover.calls.borrow().len(), 3);
    }

    #[test]
    fn test_cancelled_removes_nothing() -> Result<()> {
        let remover = RecordingRemover::default();
        let mut answer = Answer {
            value: false,
            asked: 0,
        };

        let outcome = run_clean(
            &report(vec![entry("x.o", EntryKind::File)]),
            false,
            &mut answer,
            &remover,
            |_| {},
        )?;

        assert_eq!(outcome, CleanOutcome::Cancelled);
        assert_eq!(answer.asked, 1);
        assert!(remover.calls.borrow().is_empty());

        Ok(())
    }

    #[test]
    fn test_dry_run_skips_prompt_and_remover() -> Result<()> {
        let remover = RecordingRemover::default();
        let mut answer = Answer {
            value: true,
            asked: 0,
        };

        let outcome = run_clean(
            &report(vec![
                entry("x.o", EntryKind::File),
                entry("build", EntryKind::Directory),
            ]),
            true,
            &mut answer,
            &remover,
            |_| {},
        )?;

        let expected = RemovalSummary {
            files: 1,
            directories: 1,
            failures: Vec::new(),
        };
        assert_eq!(outcome, CleanOutcome::DryRun(expected));
        assert_eq!(answer.asked, 0);
        assert!(remover.calls.borrow().is_empty());

        Ok(())
    }

    #[test]
    fn test_empty_report_needs_no_confirmation() -> Result<()> {
        let mut answer = Answer {
            value: true,
            asked: 0,
        };
        let outcome = run_clean(&report(Vec::new()), false, &mut answer, &FsRemover, |_| {})?;

        assert_eq!(outcome, CleanOutcome::NothingToClean);
        assert_eq!(answer.asked, 0);

        Ok(())
    }

    #[test]
    fn test_clean_end_to_end() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "*.o\nbuild/\n")?;
        fs::write(root.join("main.c"), "")?;
        fs::write(root.join("main.o"), "")?;
        fs::create_dir_all(root.join("build"))?;
        fs::write(root.join("build/out.bin"), "")?;
        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("src/.gitignore"), "!important.o\n")?;
        fs::write(root.join("src/important.o"), "")?;
        fs::write(root.join("src/helper.o"), "")?;

        let report = scan(root)?;
        let mut removed = Vec::new();
        let outcome = run_clean(&report, false, &mut AssumeYes, &FsRemover, |event| {
            if let RemovalEvent::Removed(entry) = event {
                removed.push(entry.path.to_string());
            }
        })?;

        assert_eq!(removed, vec!["main.o", "src/helper.o", "build"]);
        assert!(matches!(
            outcome,
            CleanOutcome::Removed(RemovalSummary { files: 2, directories: 1, .. })
        ));
        assert!(root.join("main.c").exists());
        assert!(root.join("src/important.o").exists());
        assert!(!root.join("build").exists());
        assert!(!root.join("main.o").exists());

        // Nothing left to find
        assert!(scan(root)?.is_empty());

        Ok(())
    }
}
