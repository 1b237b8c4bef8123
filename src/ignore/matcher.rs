//! Matching a single compiled pattern against a candidate path

use crate::core::RelPath;
use crate::ignore::parser::Pattern;

/// Check whether `pattern` matches `candidate`.
///
/// `candidate` is relative to the pattern's scope directory. Anchored patterns
/// must match the whole path from its first segment; unanchored ones may start
/// at any segment boundary, as if prefixed with `**/`.
pub fn matches(pattern: &Pattern, candidate: &RelPath, is_dir: bool) -> bool {
    // Directory-only patterns never match files
    if pattern.directory_only && !is_dir {
        return false;
    }

    let segments: Vec<&str> = candidate.segments().collect();
    if segments.is_empty() {
        return false;
    }

    if pattern.anchored {
        pattern.glob.matches_segments(&segments)
    } else {
        (0..segments.len()).any(|start| pattern.glob.matches_segments(&segments[start..]))
    }
}
