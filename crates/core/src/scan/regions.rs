//! Skip-region detection: fenced code, inline code, and front-matter.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::types::ScanOptions;
use crate::frontmatter;
use crate::scan::types::{SkipKind, SkipRegion};

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Single-backtick span on one line
    Regex::new(r"`[^`\n]+`").unwrap()
});

/// Identify the byte ranges that must be excluded from link extraction.
///
/// Single forward pass over lines. Code regions are always emitted; the
/// front-matter region is emitted only when the block is well-formed and
/// `skip_frontmatter` is set. An unterminated front-matter block is not
/// front-matter at all (the document may simply start with a horizontal
/// rule), so its text stays scannable regardless of the option. An
/// unterminated fence extends to end of file.
///
/// Regions are returned in ascending offset order and never overlap.
pub fn identify_skip_regions(text: &str, options: &ScanOptions) -> Vec<SkipRegion> {
    let mut regions = Vec::new();

    let fm_span = frontmatter::span(text);
    if let Some(ref span) = fm_span {
        if options.skip_frontmatter {
            regions.push(SkipRegion { kind: SkipKind::FrontMatter, span: span.clone() });
        }
    }
    let fm_end = fm_span.map_or(0, |s| s.end);

    let mut fence_start: Option<usize> = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        // Front-matter lines are never code, whether or not the region
        // was emitted above.
        if line_start < fm_end {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            match fence_start.take() {
                Some(start) => regions
                    .push(SkipRegion { kind: SkipKind::CodeFence, span: start..offset }),
                None => fence_start = Some(line_start),
            }
            continue;
        }

        if fence_start.is_some() {
            continue;
        }

        for m in INLINE_CODE_RE.find_iter(line) {
            regions.push(SkipRegion {
                kind: SkipKind::InlineCode,
                span: line_start + m.start()..line_start + m.end(),
            });
        }
    }

    if let Some(start) = fence_start {
        regions.push(SkipRegion { kind: SkipKind::CodeFence, span: start..text.len() });
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ScanOptions {
        ScanOptions::default()
    }

    fn scan_frontmatter() -> ScanOptions {
        ScanOptions { skip_frontmatter: false }
    }

    #[test]
    fn plain_text_has_no_regions() {
        let text = "# Title\n\nSee [[Other]] for details.\n";
        assert!(identify_skip_regions(text, &defaults()).is_empty());
        assert!(identify_skip_regions(text, &scan_frontmatter()).is_empty());
    }

    #[test]
    fn fenced_block_is_one_region() {
        let text = "before\n```\n[[Not A Link]]\n```\nafter\n";
        let regions = identify_skip_regions(text, &defaults());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, SkipKind::CodeFence);
        assert_eq!(&text[regions[0].span.clone()], "```\n[[Not A Link]]\n```\n");
    }

    #[test]
    fn unterminated_fence_extends_to_eof() {
        let text = "before\n```\ncode forever";
        let regions = identify_skip_regions(text, &defaults());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].span.end, text.len());
    }

    #[test]
    fn inline_code_spans_detected_per_line() {
        let text = "a `one` and `two` here\n";
        let regions = identify_skip_regions(text, &defaults());
        assert_eq!(regions.len(), 2);
        assert!(regions.iter().all(|r| r.kind == SkipKind::InlineCode));
        assert_eq!(&text[regions[0].span.clone()], "`one`");
        assert_eq!(&text[regions[1].span.clone()], "`two`");
    }

    #[test]
    fn inline_code_inside_fence_not_doubled() {
        let text = "```\nuse `backticks` freely\n```\n";
        let regions = identify_skip_regions(text, &defaults());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, SkipKind::CodeFence);
    }

    #[test]
    fn frontmatter_region_emitted_by_default() {
        let text = "---\ntitle: X\n---\nbody\n";
        let regions = identify_skip_regions(text, &defaults());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, SkipKind::FrontMatter);
        assert_eq!(&text[regions[0].span.clone()], "---\ntitle: X\n---\n");
    }

    #[test]
    fn frontmatter_region_omitted_when_scanned() {
        let text = "---\ntitle: X\n---\nbody\n";
        let regions = identify_skip_regions(text, &scan_frontmatter());
        assert!(regions.is_empty());
    }

    #[test]
    fn unterminated_frontmatter_emits_nothing() {
        // No closing delimiter: indistinguishable from a horizontal rule.
        let text = "---\ntitle: X\nbody keeps going\n";
        assert!(identify_skip_regions(text, &defaults()).is_empty());
        assert!(identify_skip_regions(text, &scan_frontmatter()).is_empty());
    }

    #[test]
    fn fence_after_frontmatter_still_detected() {
        let text = "---\ntitle: X\n---\n```\ncode\n```\n";
        let regions = identify_skip_regions(text, &defaults());
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].kind, SkipKind::FrontMatter);
        assert_eq!(regions[1].kind, SkipKind::CodeFence);
        // Regions never overlap across kinds
        assert!(regions[0].span.end <= regions[1].span.start);
    }

    #[test]
    fn tilde_fence_recognized() {
        let text = "~~~\n[[x]]\n~~~\n";
        let regions = identify_skip_regions(text, &defaults());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, SkipKind::CodeFence);
    }
}
