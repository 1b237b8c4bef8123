//! Scanner collecting ignored entries with progress reporting

use crate::core::error::{CleanerError, Result};
use crate::core::{EntryKind, RelPath, ScanIssue, DEFAULT_IGNORE_FILE};
use crate::ignore::checker::MatchDecision;
use crate::ignore::walker::Walk;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Entries visited between two progress reports
const PROGRESS_INTERVAL: usize = 100;

/// Phase of a scan
#[derive(Debug, Clone, PartialEq)]
pub enum ScanPhase {
    /// Walking the tree
    Walking,
    /// Scan completed
    Complete,
}

/// Progress information during scanning
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Current phase of scanning
    pub phase: ScanPhase,
    /// Entries visited so far
    pub entries_visited: usize,
    /// Ignored entries found so far
    pub ignored_found: usize,
    /// Entry being visited (if any)
    pub current_path: Option<RelPath>,
    /// Elapsed time since scan started
    pub elapsed: Duration,
}

/// An ignored file or directory, a deletion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredEntry {
    /// Path relative to the scan root
    pub path: RelPath,
    pub kind: EntryKind,
    /// Path on disk
    #[serde(skip)]
    pub absolute: PathBuf,
    /// The responsible rule as `source:line:pattern`
    pub matched_by: String,
}

impl IgnoredEntry {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Statistics from a scan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanStats {
    /// Entries looked at, ignored or not
    pub entries_visited: usize,
    /// Ignored files (including symbolic links)
    pub files_ignored: usize,
    /// Ignored directories, none of which were descended into
    pub directories_ignored: usize,
    /// Ignore files loaded
    pub rule_sets_loaded: usize,
    /// Wall-clock time in milliseconds
    pub elapsed_ms: u64,
}

/// Result of a scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// The scanned directory
    pub root: PathBuf,
    /// Ignored entries in walk order
    pub entries: Vec<IgnoredEntry>,
    /// Non-fatal problems met during the scan
    pub issues: Vec<ScanIssue>,
    pub stats: ScanStats,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ignored directories
    pub fn directories(&self) -> impl Iterator<Item = &IgnoredEntry> {
        self.entries.iter().filter(|e| e.is_dir())
    }

    /// Ignored files
    pub fn files(&self) -> impl Iterator<Item = &IgnoredEntry> {
        self.entries.iter().filter(|e| !e.is_dir())
    }
}

/// Scanner that finds everything the ignore files select under a root
pub struct IgnoreScanner {
    /// Directory to scan
    root: PathBuf,
    /// Ignore file name looked up in each directory
    ignore_file: String,
    /// Progress callback function
    progress_callback: Option<Box<dyn Fn(&ScanProgress) + Send + Sync>>,
}

impl IgnoreScanner {
    /// Create a scanner for `root`, which must be an existing directory
    pub fn new(root: &Path) -> Result<Self> {
        check_root(root)?;

        Ok(Self {
            root: root.to_path_buf(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            progress_callback: None,
        })
    }

    /// Use a different ignore file name
    pub fn ignore_file_name(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    /// Set progress callback for real-time updates
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ScanProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    /// Walk the tree and collect ignored entries and issues
    pub fn scan(&self) -> Result<ScanReport> {
        check_root(&self.root)?;

        let start_time = Instant::now();
        let mut progress = ScanProgress {
            phase: ScanPhase::Walking,
            entries_visited: 0,
            ignored_found: 0,
            current_path: None,
            elapsed: Duration::default(),
        };
        self.report_progress(&progress);

        let mut entries = Vec::new();
        let mut issues = Vec::new();
        let mut stats = ScanStats::default();
        let mut walk = Walk::with_ignore_file(&self.root, &self.ignore_file);

        for item in walk.by_ref() {
            let visited = match item {
                Ok(visited) => visited,
                Err(issue) => {
                    issues.push(issue);
                    continue;
                }
            };

            stats.entries_visited += 1;
            progress.entries_visited = stats.entries_visited;
            progress.current_path = Some(visited.path.clone());

            if let MatchDecision::Ignored(rule) = &visited.decision {
                debug!(path = %visited.path, rule = %rule, "ignored");
                if visited.is_dir {
                    stats.directories_ignored += 1;
                } else {
                    stats.files_ignored += 1;
                }
                entries.push(IgnoredEntry {
                    kind: EntryKind::from_is_dir(visited.is_dir),
                    matched_by: rule.to_string(),
                    path: visited.path,
                    absolute: visited.absolute,
                });
                progress.ignored_found = entries.len();
            }

            if stats.entries_visited % PROGRESS_INTERVAL == 0 {
                progress.elapsed = start_time.elapsed();
                self.report_progress(&progress);
            }
        }

        stats.rule_sets_loaded = walk.rule_sets_loaded();
        stats.elapsed_ms = start_time.elapsed().as_millis() as u64;

        progress.phase = ScanPhase::Complete;
        progress.current_path = None;
        progress.elapsed = start_time.elapsed();
        self.report_progress(&progress);

        info!(
            root = %self.root.display(),
            ignored = entries.len(),
            issues = issues.len(),
            "scan complete"
        );

        Ok(ScanReport {
            root: self.root.clone(),
            entries,
            issues,
            stats,
        })
    }

    /// Report progress to callback
    fn report_progress(&self, progress: &ScanProgress) {
        if let Some(callback) = &self.progress_callback {
            callback(progress);
        }
    }
}

/// Scan `root` using `.gitignore` files
pub fn scan(root: &Path) -> Result<ScanReport> {
    IgnoreScanner::new(root)?.scan()
}

fn check_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(CleanerError::not_a_directory(root)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(CleanerError::root_not_found(root)),
        Err(e) => Err(e.into()),
    }
}
