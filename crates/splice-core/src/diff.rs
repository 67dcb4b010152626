//! Text diffs for dry runs.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// Line-level summary of a change plus its unified rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChange {
    pub lines_added: usize,
    pub lines_removed: usize,
    /// Ratio from 0.0 to 1.0 as reported by `similar`.
    pub similarity: f32,
    pub unified: String,
}

impl TextChange {
    /// Diff `old` against `new`, labelling the hunks with `path`.
    pub fn compute(path: &str, old: &str, new: &str) -> Self {
        let diff = TextDiff::from_lines(old, new);

        let (mut lines_added, mut lines_removed) = (0, 0);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => lines_added += 1,
                ChangeTag::Delete => lines_removed += 1,
                ChangeTag::Equal => {}
            }
        }

        let unified = diff
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{path}"), &format!("b/{path}"))
            .to_string();

        Self {
            lines_added,
            lines_removed,
            similarity: diff.ratio(),
            unified,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines_added == 0 && self.lines_removed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_changed_lines() {
        let change = TextChange::compute("en.ts", "a: {\n  x: 1\n}\nb: {}\n", "a: { x: 9 }\nb: {}\n");
        assert_eq!(change.lines_removed, 3);
        assert_eq!(change.lines_added, 1);
        assert!(change.unified.contains("--- a/en.ts"));
        assert!(change.unified.contains("+++ b/en.ts"));
        assert!(change.unified.contains("+a: { x: 9 }"));
    }

    #[test]
    fn identical_text_is_empty() {
        let change = TextChange::compute("en.ts", "same\n", "same\n");
        assert!(change.is_empty());
        assert_eq!(change.similarity, 1.0);
    }
}
