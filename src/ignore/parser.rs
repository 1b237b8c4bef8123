//! Ignore-file parser with .gitignore syntax compatibility

use crate::core::{RelPath, ScanIssue};
use crate::ignore::glob::Glob;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Attempts made to read an ignore file when the read is interrupted
const READ_ATTEMPTS: usize = 3;

/// A compiled pattern from one ignore-file line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The line as written, minus trailing whitespace
    pub original: String,
    /// 1-based line number in the ignore file
    pub line: usize,
    /// The compiled glob
    pub glob: Glob,
    /// Leading `!`: re-includes a previously matched path
    pub negated: bool,
    /// Trailing `/`: only matches directories
    pub directory_only: bool,
    /// Rooted at the ignore file's directory instead of matching at any depth
    pub anchored: bool,
    /// Part of the glob was malformed and read literally
    pub malformed: bool,
}

impl Pattern {
    /// Compile one ignore-file line. Blank lines and comments yield `None`.
    pub fn compile(line: &str, line_number: usize) -> Option<Pattern> {
        let line = trim_trailing_whitespace(line.trim_end_matches('\r'));

        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (negated, text) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let (directory_only, text) = strip_trailing_slashes(text);

        // A `/` at the start or in the middle roots the pattern
        let anchored = text.contains('/');
        let text = text.trim_start_matches('/');

        if text.is_empty() {
            return None;
        }

        let (glob, malformed) = Glob::compile(text);
        if malformed {
            debug!(line = line_number, pattern = line, "malformed glob read literally");
        }

        Some(Pattern {
            original: line.to_string(),
            line: line_number,
            glob,
            negated,
            directory_only,
            anchored,
            malformed,
        })
    }
}

/// Strip trailing spaces and tabs that are not escaped with a backslash
fn trim_trailing_whitespace(line: &str) -> &str {
    let mut end = line.len();
    let bytes = line.as_bytes();

    while end > 0 && matches!(bytes[end - 1], b' ' | b'\t') {
        let backslashes = bytes[..end - 1]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= 1;
    }

    &line[..end]
}

/// Strip unescaped trailing `/`, reporting whether any were present
fn strip_trailing_slashes(text: &str) -> (bool, &str) {
    let mut trimmed = text;
    let mut found = false;

    while let Some(rest) = trimmed.strip_suffix('/') {
        let backslashes = rest.bytes().rev().take_while(|&b| b == b'\\').count();
        if backslashes % 2 == 1 {
            break;
        }
        trimmed = rest;
        found = true;
    }

    (found, trimmed)
}

/// The ordered patterns of one ignore file and the directory they govern
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Compiled patterns in file order
    patterns: Vec<Pattern>,
    /// Directory the patterns are relative to, from the project root
    scope: RelPath,
    /// The ignore file the patterns came from, if any
    source: Option<PathBuf>,
}

impl RuleSet {
    /// Create a rule set from ignore-file content
    pub fn from_content(content: &str, scope: RelPath) -> Self {
        let patterns = content
            .lines()
            .enumerate()
            .filter_map(|(index, line)| Pattern::compile(line, index + 1))
            .collect();

        Self {
            patterns,
            scope,
            source: None,
        }
    }

    /// Create a rule set from an ignore file on disk
    pub fn from_file(path: &Path, scope: RelPath) -> io::Result<Self> {
        let bytes = read_with_retry(path)?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(Self::from_content(&content, scope).with_source(path.to_path_buf()))
    }

    /// Load the ignore file named `file_name` in `dir`, if there is one.
    ///
    /// A missing file is `Ok(None)`; an unreadable one is reported as an issue
    /// and the directory behaves as if it had no ignore file.
    pub fn load(dir: &Path, scope: RelPath, file_name: &str) -> Result<Option<Self>, ScanIssue> {
        let path = dir.join(file_name);

        match fs::symlink_metadata(&path) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            // The directory cannot be traversed; the walk reports it once
            Err(e) if e.kind() == ErrorKind::PermissionDenied => return Ok(None),
            Err(e) => {
                return Err(ScanIssue::UnreadableIgnoreFile {
                    path,
                    reason: e.to_string(),
                })
            }
            Ok(_) => {}
        }

        Self::from_file(&path, scope)
            .map(Some)
            .map_err(|e| ScanIssue::UnreadableIgnoreFile {
                path,
                reason: e.to_string(),
            })
    }

    /// Record the file the patterns came from
    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    /// All patterns, in file order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Directory governed by this rule set
    pub fn scope(&self) -> &RelPath {
        &self.scope
    }

    /// Source file, if loaded from disk
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Precedence rank: depth of the scope directory below the project root
    pub fn precedence(&self) -> usize {
        self.scope.depth()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Issues for lines whose glob had to be read literally
    pub fn malformed_issues(&self) -> Vec<ScanIssue> {
        let path = self
            .source
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.scope.as_str()));

        self.patterns
            .iter()
            .filter(|p| p.malformed)
            .map(|p| ScanIssue::MalformedPattern {
                path: path.clone(),
                line: p.line,
                pattern: p.original.clone(),
            })
            .collect()
    }
}

fn read_with_retry(path: &Path) -> io::Result<Vec<u8>> {
    let mut attempt = 1;
    loop {
        match fs::read(path) {
            Err(e) if e.kind() == ErrorKind::Interrupted && attempt < READ_ATTEMPTS => {
                attempt += 1;
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn compile(line: &str) -> Pattern {
        Pattern::compile(line, 1).expect("pattern should compile")
    }

    #[test]
    fn test_parse_basic_patterns() {
        let content = r#"
# Comments are ignored
*.tmp
build/
!important.tmp
**/cache/
node_modules/
"#;

        let rules = RuleSet::from_content(content, RelPath::root());
        let originals: Vec<&str> = rules.patterns().iter().map(|p| p.original.as_str()).collect();

        assert_eq!(
            originals,
            vec!["*.tmp", "build/", "!important.tmp", "**/cache/", "node_modules/"]
        );
        assert_eq!(rules.patterns()[1].line, 4);
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert!(Pattern::compile("", 1).is_none());
        assert!(Pattern::compile("   ", 1).is_none());
        assert!(Pattern::compile("# comment", 1).is_none());
        assert!(Pattern::compile("!", 1).is_none());
        assert!(Pattern::compile("/", 1).is_none());

        let escaped = compile("\\#notes");
        assert!(!escaped.negated);
        assert!(escaped.glob.matches_segments(&["#notes"]));
    }

    #[test]
    fn test_negation_and_escaped_bang() {
        let negated = compile("!keep.log");
        assert!(negated.negated);
        assert!(negated.glob.matches_segments(&["keep.log"]));

        let literal = compile("\\!important");
        assert!(!literal.negated);
        assert!(literal.glob.matches_segments(&["!important"]));
    }

    #[test]
    fn test_directory_only_and_anchoring() {
        let dir = compile("logs/");
        assert!(dir.directory_only);
        assert!(!dir.anchored);

        let rooted = compile("/build");
        assert!(rooted.anchored);
        assert!(!rooted.directory_only);
        assert!(rooted.glob.matches_segments(&["build"]));

        let nested = compile("doc/*.txt");
        assert!(nested.anchored);

        let rooted_dir = compile("/out/");
        assert!(rooted_dir.anchored);
        assert!(rooted_dir.directory_only);
    }

    #[test]
    fn test_trailing_whitespace() {
        let trimmed = compile("*.o   \t");
        assert_eq!(trimmed.original, "*.o");

        let escaped = compile("name\\ ");
        assert_eq!(escaped.original, "name\\ ");
        assert!(escaped.glob.matches_segments(&["name "]));

        let crlf = compile("*.bak\r");
        assert_eq!(crlf.original, "*.bak");
    }

    #[test]
    fn test_malformed_class_is_reported_not_fatal() {
        let rules = RuleSet::from_content("ok.txt\nfile[\n", RelPath::new("sub"));
        assert_eq!(rules.patterns().len(), 2);

        let issues = rules.malformed_issues();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            ScanIssue::MalformedPattern { line: 2, pattern, .. } if pattern == "file["
        ));
    }

    #[test]
    fn test_precedence_is_scope_depth() {
        assert_eq!(RuleSet::from_content("", RelPath::root()).precedence(), 0);
        assert_eq!(RuleSet::from_content("", RelPath::new("a/b")).precedence(), 2);
    }

    #[test]
    fn test_load_from_directory() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join(".gitignore"), "*.tmp\nbuild/\n")?;

        let rules = RuleSet::load(temp_dir.path(), RelPath::root(), ".gitignore")
            .expect("readable")
            .expect("present");
        assert_eq!(rules.patterns().len(), 2);
        assert_eq!(rules.source(), Some(temp_dir.path().join(".gitignore").as_path()));

        let missing = RuleSet::load(temp_dir.path(), RelPath::root(), ".otherignore");
        assert!(matches!(missing, Ok(None)));

        Ok(())
    }

    #[test]
    fn test_unreadable_ignore_file_is_an_issue() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        // A directory where the ignore file should be cannot be read as a file
        fs::create_dir(temp_dir.path().join(".gitignore"))?;

        let result = RuleSet::load(temp_dir.path(), RelPath::root(), ".gitignore");
        assert!(matches!(result, Err(ScanIssue::UnreadableIgnoreFile { .. })));

        Ok(())
    }
}
