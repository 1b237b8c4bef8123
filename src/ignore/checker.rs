//! Ignore decisions over layered rule sets

use crate::core::error::{CleanerError, Result};
use crate::core::{RelPath, DEFAULT_IGNORE_FILE, VCS_DIR_NAME};
use crate::ignore::matcher;
use crate::ignore::parser::{Pattern, RuleSet};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Rule sets in effect for one directory, shallowest scope first.
///
/// Extending a context never touches the parent; each directory gets its own
/// context that shares the parent's rule sets.
#[derive(Debug, Clone, Default)]
pub struct LayeredContext {
    layers: Vec<Arc<RuleSet>>,
}

impl LayeredContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new context with `rules` layered on top (highest precedence)
    pub fn extend(&self, rules: Arc<RuleSet>) -> Self {
        let mut layers = self.layers.clone();
        layers.push(rules);
        Self { layers }
    }

    /// Rule sets, lowest precedence first
    pub fn layers(&self) -> &[Arc<RuleSet>] {
        &self.layers
    }
}

/// The pattern that produced a decision
#[derive(Debug, Clone)]
pub struct MatchedRule {
    rules: Arc<RuleSet>,
    index: usize,
}

impl MatchedRule {
    fn new(rules: Arc<RuleSet>, index: usize) -> Self {
        Self { rules, index }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.rules.patterns()[self.index]
    }
}

impl fmt::Display for MatchedRule {
    /// `source:line:pattern` with the source relative to the project root,
    /// like `git check-ignore -v`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = self.pattern();
        let file = match self.rules.source().and_then(|s| s.file_name()) {
            Some(name) => self.rules.scope().join(&name.to_string_lossy()),
            None => self.rules.scope().clone(),
        };
        write!(f, "{}:{}:{}", file, pattern.line, pattern.original)
    }
}

/// Outcome of resolving one path
#[derive(Debug, Clone)]
pub enum MatchDecision {
    /// The last matching pattern ignores the path
    Ignored(MatchedRule),
    /// No pattern matched
    Included,
    /// The last matching pattern is a negation
    Whitelisted(MatchedRule),
    /// The path is version-control metadata and is never a candidate
    VcsMetadata,
}

impl MatchDecision {
    pub fn is_ignored(&self) -> bool {
        matches!(self, MatchDecision::Ignored(_))
    }

    /// The pattern responsible for the decision, if any
    pub fn rule(&self) -> Option<&MatchedRule> {
        match self {
            MatchDecision::Ignored(rule) | MatchDecision::Whitelisted(rule) => Some(rule),
            MatchDecision::Included | MatchDecision::VcsMetadata => None,
        }
    }
}

/// Decide whether `path` is ignored under `context`.
///
/// `path` is relative to the project root. Each rule set sees the path
/// relative to its own scope; rule sets whose scope is not an ancestor of the
/// path are skipped. The last matching pattern wins, deeper rule sets being
/// later than shallower ones.
pub fn resolve(path: &RelPath, is_dir: bool, context: &LayeredContext) -> MatchDecision {
    for rules in context.layers().iter().rev() {
        let Some(relative) = path.strip_prefix(rules.scope()) else {
            continue;
        };

        let last_match = rules
            .patterns()
            .iter()
            .rposition(|pattern| matcher::matches(pattern, &relative, is_dir));

        if let Some(index) = last_match {
            let rule = MatchedRule::new(Arc::clone(rules), index);
            return if rule.pattern().negated {
                MatchDecision::Whitelisted(rule)
            } else {
                MatchDecision::Ignored(rule)
            };
        }
    }

    MatchDecision::Included
}

/// Answers ignore questions about single paths under a project root.
///
/// Ancestor directories are resolved first: once a directory is ignored,
/// everything below it is ignored too and no negation inside can bring it
/// back, matching Git's rule that a path cannot be re-included when a parent
/// directory is excluded.
#[derive(Debug)]
pub struct IgnoreChecker {
    /// Project root directory
    root: PathBuf,
    /// Ignore file name looked up in each directory
    ignore_file: String,
    /// Rule sets already loaded, by directory
    loaded: HashMap<RelPath, Option<Arc<RuleSet>>>,
}

impl IgnoreChecker {
    /// Create a new checker for a project root
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            loaded: HashMap::new(),
        }
    }

    /// Use a different ignore file name
    pub fn ignore_file_name(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self.loaded.clear();
        self
    }

    /// Check a path given relative to the root, or absolute under it
    pub fn check(&mut self, path: &Path) -> Result<MatchDecision> {
        let outside = || CleanerError::PathOutsideRoot {
            path: path.to_path_buf(),
            root: self.root.clone(),
        };
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.root).map_err(|_| outside())?
        } else {
            path
        };

        let target = RelPath::from_path(relative).ok_or_else(outside)?;
        let segments: Vec<&str> = target.segments().collect();

        let mut context = self.context_for(&RelPath::root(), &LayeredContext::new());
        let mut current = RelPath::root();
        let mut decision = MatchDecision::Included;

        for (depth, name) in segments.iter().enumerate() {
            if *name == VCS_DIR_NAME {
                return Ok(MatchDecision::VcsMetadata);
            }

            current = current.join(name);
            let is_last = depth + 1 == segments.len();
            let is_dir = !is_last || self.is_dir_on_disk(&current);

            decision = resolve(&current, is_dir, &context);
            if !is_last {
                if decision.is_ignored() {
                    return Ok(decision);
                }
                context = self.context_for(&current, &context);
            }
        }

        Ok(decision)
    }

    /// Convenience wrapper returning only the ignored flag
    pub fn is_ignored(&mut self, path: &Path) -> Result<bool> {
        Ok(self.check(path)?.is_ignored())
    }

    fn is_dir_on_disk(&self, path: &RelPath) -> bool {
        fs::symlink_metadata(path.to_path(&self.root))
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Context for the children of `dir`, loading its ignore file once
    fn context_for(&mut self, dir: &RelPath, parent: &LayeredContext) -> LayeredContext {
        let root = &self.root;
        let ignore_file = &self.ignore_file;
        let rules = self
            .loaded
            .entry(dir.clone())
            .or_insert_with(|| {
                match RuleSet::load(&dir.to_path(root), dir.clone(), ignore_file) {
                    Ok(rules) => rules.map(Arc::new),
                    Err(issue) => {
                        warn!("{}", issue);
                        None
                    }
                }
            })
            .clone();

        match rules {
            Some(rules) => parent.extend(rules),
            None => parent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn context(files: &[(&str, &str)]) -> LayeredContext {
        files.iter().fold(LayeredContext::new(), |ctx, (scope, content)| {
            ctx.extend(Arc::new(RuleSet::from_content(content, RelPath::new(scope))))
        })
    }

    fn ignored(ctx: &LayeredContext, path: &str, is_dir: bool) -> bool {
        resolve(&RelPath::new(path), is_dir, ctx).is_ignored()
    }

    #[test]
    fn test_negation_round_trip() {
        let ctx = context(&[("", "*.log\n!keep.log\n")]);

        assert!(ignored(&ctx, "a.log", false));
        assert!(ignored(&ctx, "debug.log", false));
        assert!(!ignored(&ctx, "keep.log", false));
        assert!(matches!(
            resolve(&RelPath::new("keep.log"), false, &ctx),
            MatchDecision::Whitelisted(_)
        ));
    }

    #[test]
    fn test_last_match_wins_within_a_file() {
        let ctx = context(&[("", "!keep.log\n*.log\n")]);
        // The negation comes first, so the later `*.log` wins
        assert!(ignored(&ctx, "keep.log", false));
    }

    #[test]
    fn test_deeper_rule_sets_override_shallower() {
        let ctx = context(&[("", "*.o\n"), ("src", "!important.o\n")]);

        assert!(ignored(&ctx, "src/helper.o", false));
        assert!(!ignored(&ctx, "src/important.o", false));
        // Root-level file is outside the `src` scope
        assert!(ignored(&ctx, "important.o", false));
    }

    #[test]
    fn test_nested_scope_isolation() {
        let ctx = context(&[("", ""), ("sub", "temp\n")]);

        assert!(ignored(&ctx, "sub/temp", false));
        assert!(!ignored(&ctx, "temp", false));
    }

    #[test]
    fn test_negation_alone_selects_nothing() {
        let ctx = context(&[("", "!stray.txt\n")]);
        let decision = resolve(&RelPath::new("stray.txt"), false, &ctx);
        assert!(!decision.is_ignored());
        assert!(decision.rule().is_some());
    }

    #[test]
    fn test_decision_reports_responsible_rule() {
        let ctx = context(&[("", "# header\n*.tmp\n")]);
        let decision = resolve(&RelPath::new("x.tmp"), false, &ctx);

        let rule = decision.rule().expect("a rule matched");
        assert_eq!(rule.pattern().original, "*.tmp");
        assert_eq!(rule.pattern().line, 2);
        assert_eq!(rule.to_string(), ":2:*.tmp");
    }

    #[test]
    fn test_checker_applies_parent_directory_exclusion() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "/build\n")?;
        fs::create_dir_all(root.join("build"))?;
        fs::create_dir_all(root.join("sub/build"))?;
        fs::write(root.join("build/x"), "")?;

        let mut checker = IgnoreChecker::new(root);

        assert!(checker.is_ignored(Path::new("build"))?);
        assert!(checker.is_ignored(Path::new("build/x"))?);
        assert!(!checker.is_ignored(Path::new("sub/build"))?);

        Ok(())
    }

    #[test]
    fn test_checker_strict_reinclusion() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "build/\n")?;
        fs::create_dir_all(root.join("build"))?;
        fs::write(root.join("build/.gitignore"), "!special\n")?;
        fs::write(root.join("build/special"), "")?;

        let mut checker = IgnoreChecker::new(root);
        let decision = checker.check(Path::new("build/special"))?;

        assert!(decision.is_ignored());
        assert_eq!(decision.rule().unwrap().pattern().original, "build/");

        Ok(())
    }

    #[test]
    fn test_checker_vcs_metadata() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "*\n")?;

        let mut checker = IgnoreChecker::new(root);
        assert!(matches!(
            checker.check(Path::new(".git/config"))?,
            MatchDecision::VcsMetadata
        ));

        Ok(())
    }

    #[test]
    fn test_checker_rejects_paths_outside_root() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let other = TempDir::new()?;

        let mut checker = IgnoreChecker::new(temp_dir.path());
        let result = checker.check(&other.path().join("file"));
        assert!(matches!(result, Err(CleanerError::PathOutsideRoot { .. })));

        Ok(())
    }

    #[test]
    fn test_checker_resolves_parent_components() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "/secret.o\n")?;
        fs::create_dir_all(root.join("sub"))?;
        fs::write(root.join("secret.o"), "")?;
        fs::write(root.join("sub/secret.o"), "")?;

        let mut checker = IgnoreChecker::new(root);

        assert!(checker.is_ignored(Path::new("sub/../secret.o"))?);
        assert!(checker.is_ignored(Path::new("./sub/./../secret.o"))?);
        assert!(!checker.is_ignored(Path::new("sub/secret.o"))?);
        assert!(matches!(
            checker.check(Path::new("sub/../../secret.o")),
            Err(CleanerError::PathOutsideRoot { .. })
        ));
        assert!(matches!(
            checker.check(&root.join("sub/../../secret.o")),
            Err(CleanerError::PathOutsideRoot { .. })
        ));

        Ok(())
    }
}
