//! In-memory edit application and atomic file writes.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::rename::types::PlannedEdit;
use crate::vault::RetryPolicy;

/// Apply replacements to content as one in-memory transformation.
///
/// Edits are applied in descending offset order so earlier offsets remain
/// valid after later-offset replacements change the text length.
pub fn apply_edits(content: &str, edits: &[PlannedEdit]) -> String {
    let mut sorted: Vec<_> = edits.iter().collect();
    sorted.sort_by(|a, b| b.reference.span.start.cmp(&a.reference.span.start));

    let mut result = content.to_string();
    for edit in sorted {
        let span = edit.reference.span.clone();
        if span.end <= result.len() {
            result.replace_range(span, &edit.replacement);
        }
    }
    result
}

/// Check that every edit's span still carries the raw text it was planned
/// against.
pub fn edits_match(content: &str, edits: &[PlannedEdit]) -> bool {
    edits
        .iter()
        .all(|e| content.get(e.reference.span.clone()) == Some(e.reference.raw.as_str()))
}

/// Write content atomically: temp file in the target's directory, then
/// rename-over. A crash mid-write cannot leave a half-written note.
pub fn write_atomic(path: &Path, content: &str, retry: &RetryPolicy) -> io::Result<()> {
    retry.run("write note", || {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::LinkReference;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn edit(raw: &str, start: usize, replacement: &str) -> PlannedEdit {
        PlannedEdit {
            reference: LinkReference {
                source: PathBuf::from("source.md"),
                raw: raw.to_string(),
                target: String::new(),
                heading: None,
                alias: None,
                span: start..start + raw.len(),
                in_frontmatter: false,
            },
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn apply_single_edit() {
        let content = "Link to [[old]] here.";
        let result = apply_edits(content, &[edit("[[old]]", 8, "[[new]]")]);
        assert_eq!(result, "Link to [[new]] here.");
    }

    #[test]
    fn apply_multiple_edits_with_length_change() {
        let content = "First [[old]] and second [[old|alias]].";
        let edits = vec![
            edit("[[old]]", 6, "[[renamed note]]"),
            edit("[[old|alias]]", 25, "[[renamed note|alias]]"),
        ];
        let result = apply_edits(content, &edits);
        assert_eq!(result, "First [[renamed note]] and second [[renamed note|alias]].");
    }

    #[test]
    fn apply_edits_given_in_any_order() {
        let content = "a [[x]] b [[x]] c";
        let edits = vec![edit("[[x]]", 10, "[[y]]"), edit("[[x]]", 2, "[[y]]")];
        assert_eq!(apply_edits(content, &edits), "a [[y]] b [[y]] c");
    }

    #[test]
    fn edits_match_detects_drift() {
        let content = "Link to [[old]] here.";
        let good = edit("[[old]]", 8, "[[new]]");
        let bad = edit("[[old]]", 9, "[[new]]");
        assert!(edits_match(content, std::slice::from_ref(&good)));
        assert!(!edits_match(content, std::slice::from_ref(&bad)));
    }

    #[test]
    fn write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "before").unwrap();

        write_atomic(&path, "after", &RetryPolicy::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "after");

        // No stray temp files left behind
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
