//! Wikilink extraction over the scannable portion of a note.

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter;
use crate::scan::types::{LinkReference, SkipKind, SkipRegion};

static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches [[target]], [[target|alias]], [[target#heading]] and
    // [[target#heading|alias]]
    // Captures:
    // 1: target name
    // 2: heading fragment (if present)
    // 3: alias (if present)
    Regex::new(r"\[\[([^\]|#]+)(?:#([^\]|]+))?(?:\|([^\]]+))?\]\]").unwrap()
});

/// Extract link references from `text`, in document order.
///
/// Matching runs over the whole text; a match is kept only if it does not
/// overlap any emitted skip region. Front-matter emission is decided
/// upstream, so a front-matter match survives the filter exactly when the
/// detector left the block scannable. Inside scannable front-matter only
/// the two recognized link-bearing shapes count: an item of a block
/// sequence or of an inline bracketed array.
pub fn extract_links(
    text: &str,
    skip_regions: &[SkipRegion],
    source: &Path,
) -> Vec<LinkReference> {
    let fm_span = frontmatter::span(text);
    let fm_skipped = skip_regions.iter().any(|r| r.kind == SkipKind::FrontMatter);

    // Sequence items are the only front-matter values that can carry links;
    // collected once when the block is scannable. A block whose YAML does
    // not parse exposes no recognized shapes.
    let fm_items: Vec<String> = match (&fm_span, fm_skipped) {
        (Some(_), false) => frontmatter::parse(text)
            .ok()
            .and_then(|doc| doc.frontmatter)
            .map(|fm| {
                fm.sequence_strings().into_iter().map(str::to_string).collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    let mut references = Vec::new();

    for cap in WIKILINK_RE.captures_iter(text) {
        let m = cap.get(0).unwrap();
        let span = m.range();

        if skip_regions.iter().any(|r| overlaps(&r.span, &span)) {
            continue;
        }

        let in_frontmatter =
            fm_span.as_ref().is_some_and(|fm| span.start < fm.end);
        if in_frontmatter
            && !fm_items.iter().any(|item| item.contains(m.as_str()))
        {
            continue;
        }

        references.push(LinkReference {
            source: source.to_path_buf(),
            raw: m.as_str().to_string(),
            target: cap.get(1).map_or("", |t| t.as_str()).to_string(),
            heading: cap.get(2).map(|h| h.as_str().to_string()),
            alias: cap.get(3).map(|a| a.as_str().to_string()),
            span,
            in_frontmatter,
        });
    }

    references
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ScanOptions;
    use crate::scan::regions::identify_skip_regions;

    fn extract(text: &str, options: &ScanOptions) -> Vec<LinkReference> {
        let regions = identify_skip_regions(text, options);
        extract_links(text, &regions, Path::new("source.md"))
    }

    #[test]
    fn body_link_without_alias() {
        let refs = extract("See [[Old Note]] for details.", &ScanOptions::default());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target, "Old Note");
        assert_eq!(refs[0].alias, None);
        assert_eq!(refs[0].raw, "[[Old Note]]");
        assert_eq!(refs[0].span, 4..16);
        assert!(!refs[0].in_frontmatter);
    }

    #[test]
    fn body_link_with_alias() {
        let refs = extract("Link [[Old Note|My Alias]] here.", &ScanOptions::default());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target, "Old Note");
        assert_eq!(refs[0].alias.as_deref(), Some("My Alias"));
    }

    #[test]
    fn body_link_with_heading_and_alias() {
        let refs =
            extract("See [[Old Note#Setup|the setup]].", &ScanOptions::default());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target, "Old Note");
        assert_eq!(refs[0].heading.as_deref(), Some("Setup"));
        assert_eq!(refs[0].alias.as_deref(), Some("the setup"));
    }

    #[test]
    fn link_inside_fence_excluded() {
        let text = "```\n[[Old Note]]\n```\n";
        assert!(extract(text, &ScanOptions::default()).is_empty());
        assert!(extract(text, &ScanOptions { skip_frontmatter: false }).is_empty());
    }

    #[test]
    fn link_inside_inline_code_excluded() {
        let text = "literal `[[Old Note]]` span\n";
        assert!(extract(text, &ScanOptions::default()).is_empty());
    }

    #[test]
    fn frontmatter_sequence_item_skipped_by_default() {
        let text = "---\npeople:\n  - \"[[Old Note]]\"\n---\nbody\n";
        assert!(extract(text, &ScanOptions::default()).is_empty());
    }

    #[test]
    fn frontmatter_sequence_item_extracted_when_scanned() {
        let text = "---\npeople:\n  - \"[[Old Note]]\"\n---\nbody\n";
        let refs = extract(text, &ScanOptions { skip_frontmatter: false });
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].target, "Old Note");
        assert!(refs[0].in_frontmatter);
    }

    #[test]
    fn frontmatter_inline_array_extracted_when_scanned() {
        let text = "---\nrelated: [\"[[Old Note]]\", \"[[Other]]\"]\n---\nbody\n";
        let refs = extract(text, &ScanOptions { skip_frontmatter: false });
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].target, "Old Note");
        assert_eq!(refs[1].target, "Other");
        assert!(refs.iter().all(|r| r.in_frontmatter));
    }

    #[test]
    fn frontmatter_scalar_value_not_recognized() {
        // Only the two sequence shapes carry links in front-matter.
        let text = "---\nproject: \"[[Old Note]]\"\n---\nbody\n";
        assert!(extract(text, &ScanOptions { skip_frontmatter: false }).is_empty());
    }

    #[test]
    fn unterminated_frontmatter_scanned_as_body() {
        let text = "---\npeople:\n  - \"[[Old Note]]\"\nno closing delimiter\n";
        let refs = extract(text, &ScanOptions::default());
        assert_eq!(refs.len(), 1);
        assert!(!refs[0].in_frontmatter);
    }

    #[test]
    fn document_order_and_idempotence() {
        let text = "one [[A]]\ntwo [[B|b]]\nthree [[C]]\n";
        let first = extract(text, &ScanOptions::default());
        let targets: Vec<_> = first.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["A", "B", "C"]);
        assert!(first.windows(2).all(|w| w[0].span.start < w[1].span.start));

        let second = extract(text, &ScanOptions::default());
        assert_eq!(first, second);
    }
}
