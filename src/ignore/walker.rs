//! Depth-first directory walk that layers ignore files as it descends

use crate::core::{RelPath, ScanIssue, DEFAULT_IGNORE_FILE, VCS_DIR_NAME};
use crate::ignore::checker::{resolve, LayeredContext, MatchDecision};
use crate::ignore::parser::RuleSet;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// One entry met during a walk, with its ignore decision
#[derive(Debug, Clone)]
pub struct VisitedEntry {
    /// Path relative to the walk root
    pub path: RelPath,
    /// Path on disk
    pub absolute: PathBuf,
    /// Real directory (symbolic links are never directories here)
    pub is_dir: bool,
    pub decision: MatchDecision,
}

/// Lazy walk over a project tree.
///
/// Entries come out depth-first in pre-order, sorted by file name within each
/// directory. Ignored directories are yielded once and not descended into.
/// Problems are yielded as `Err` items and the walk carries on.
pub struct Walk {
    root: PathBuf,
    ignore_file: String,
    inner: walkdir::IntoIter,
    /// `stack[d]` is the context for children of the directory at depth `d`
    stack: Vec<LayeredContext>,
    /// Issues waiting to be yielded before the next entry
    pending: VecDeque<ScanIssue>,
    rule_sets_loaded: usize,
}

impl Walk {
    /// Walk `root` using `.gitignore` files
    pub fn new(root: &Path) -> Self {
        Self::with_ignore_file(root, DEFAULT_IGNORE_FILE)
    }

    /// Walk `root` using ignore files named `ignore_file`
    pub fn with_ignore_file(root: &Path, ignore_file: &str) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Self {
            root: root.to_path_buf(),
            ignore_file: ignore_file.to_string(),
            inner,
            stack: Vec::new(),
            pending: VecDeque::new(),
            rule_sets_loaded: 0,
        }
    }

    /// Number of ignore files loaded so far
    pub fn rule_sets_loaded(&self) -> usize {
        self.rule_sets_loaded
    }

    /// Context for the children of `dir`, built on the current top of stack
    fn enter(&mut self, dir: &Path, scope: RelPath) -> LayeredContext {
        let parent = self.stack.last().cloned().unwrap_or_default();

        match RuleSet::load(dir, scope, &self.ignore_file) {
            Ok(Some(rules)) => {
                self.rule_sets_loaded += 1;
                debug!(
                    scope = %rules.scope(),
                    patterns = rules.patterns().len(),
                    "loaded ignore file"
                );
                for issue in rules.malformed_issues() {
                    warn!("{}", issue);
                    self.pending.push_back(issue);
                }
                parent.extend(Arc::new(rules))
            }
            Ok(None) => parent,
            Err(issue) => {
                warn!("{}", issue);
                self.pending.push_back(issue);
                parent
            }
        }
    }

    fn relative(&self, path: &Path) -> RelPath {
        RelPath::from_path(path.strip_prefix(&self.root).unwrap_or(path)).unwrap_or_default()
    }
}

impl Iterator for Walk {
    type Item = Result<VisitedEntry, ScanIssue>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(issue) = self.pending.pop_front() {
                return Some(Err(issue));
            }

            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let issue = ScanIssue::UnreadableDirectory {
                        path: err.path().unwrap_or(self.root.as_path()).to_path_buf(),
                        reason: err
                            .io_error()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| err.to_string()),
                    };
                    warn!("{}", issue);
                    return Some(Err(issue));
                }
            };

            let depth = entry.depth();
            if depth == 0 {
                let root = entry.path().to_path_buf();
                let context = self.enter(&root, RelPath::root());
                self.stack = vec![context];
                continue;
            }

            // Leaving directories drops their contexts
            self.stack.truncate(depth);

            let is_dir = entry.file_type().is_dir();

            if entry.file_name() == VCS_DIR_NAME {
                trace!(path = %entry.path().display(), "skipping version-control metadata");
                if is_dir {
                    self.inner.skip_current_dir();
                }
                continue;
            }

            let path = self.relative(entry.path());
            let decision = match self.stack.last() {
                Some(context) => resolve(&path, is_dir, context),
                None => MatchDecision::Included,
            };

            if is_dir {
                if decision.is_ignored() {
                    debug!(path = %path, "pruning ignored directory");
                    self.inner.skip_current_dir();
                } else {
                    let context = self.enter(entry.path(), path.clone());
                    self.stack.push(context);
                }
            }

            return Some(Ok(VisitedEntry {
                path,
                absolute: entry.into_path(),
                is_dir,
                decision,
            }));
        }
    }
}

/// Walk `root` using `.gitignore` files
pub fn walk(root: &Path) -> Walk {
    Walk::new(root)
}
