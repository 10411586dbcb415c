//! Frontmatter delimiter scanning and YAML parsing.

use std::ops::Range;

use thiserror::Error;

use super::types::{Frontmatter, ParsedDocument};

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Locate the frontmatter block as a byte range covering both delimiter
/// lines.
///
/// The opening `---` must be the very first line. A block without a closing
/// delimiter is not frontmatter at all: the document may simply start with a
/// horizontal rule, so `None` is returned and the text stays scannable.
pub fn span(content: &str) -> Option<Range<usize>> {
    let first_line = content.lines().next()?;
    if first_line.trim_end() != "---" {
        return None;
    }

    let mut offset = line_len(content, 0);
    for line in content[offset..].split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim_end_matches(['\n', '\r']).trim() == "---" {
            return Some(0..end);
        }
        offset = end;
    }
    None
}

// Byte length of the line starting at `start`, including its newline.
fn line_len(content: &str, start: usize) -> usize {
    match content[start..].find('\n') {
        Some(pos) => pos + 1,
        None => content.len() - start,
    }
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let block = match span(content) {
        Some(range) => range,
        None => {
            return Ok(ParsedDocument { frontmatter: None, body: content.to_string() })
        }
    };

    // Strip both delimiter lines from the block.
    let inner_start = line_len(content, 0);
    let inner = &content[inner_start..block.end];
    let yaml = match inner.rfind("---") {
        Some(pos) => &inner[..pos],
        None => inner,
    };

    let frontmatter: Frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    Ok(ParsedDocument {
        frontmatter: Some(frontmatter),
        body: content[block.end..].to_string(),
    })
}
