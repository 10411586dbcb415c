//! End-to-end scan pipeline behavior: skip-region detection feeding link
//! extraction, across both front-matter modes.

use std::path::Path;

use rstest::rstest;

use notelink_core::config::types::ScanOptions;
use notelink_core::scan::regions::identify_skip_regions;
use notelink_core::scan::{LinkReference, VaultScanner};
use notelink_core::vault::RetryPolicy;

fn scan(text: &str, skip_frontmatter: bool) -> Vec<LinkReference> {
    let scanner = VaultScanner::new(
        ScanOptions { skip_frontmatter },
        RetryPolicy::default(),
        1,
    );
    scanner.scan_text(text, Path::new("note.md")).references
}

#[rstest]
#[case::body_link_default("See [[Old Note]] for details.", true, &["Old Note"])]
#[case::body_link_scanning_frontmatter("See [[Old Note]] for details.", false, &["Old Note"])]
#[case::frontmatter_block_item_skipped("---\npeople:\n  - \"[[Old Note]]\"\n---\n", true, &[])]
#[case::frontmatter_block_item_scanned("---\npeople:\n  - \"[[Old Note]]\"\n---\n", false, &["Old Note"])]
#[case::frontmatter_inline_array("---\nrelated: [\"[[Old Note]]\", \"[[Other]]\"]\n---\n", false, &["Old Note", "Other"])]
#[case::code_block_default("```\n[[Old Note]]\n```\n", true, &[])]
#[case::code_block_scanning_frontmatter("```\n[[Old Note]]\n```\n", false, &[])]
fn extraction_scenarios(
    #[case] text: &str,
    #[case] skip_frontmatter: bool,
    #[case] expected_targets: &[&str],
) {
    let refs = scan(text, skip_frontmatter);
    let targets: Vec<_> = refs.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, expected_targets);
}

#[test]
fn body_scenario_shape() {
    let refs = scan("See [[Old Note]] for details.", true);
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].target, "Old Note");
    assert_eq!(refs[0].alias, None);
    assert!(!refs[0].in_frontmatter);
}

#[test]
fn frontmatter_reference_carries_flag_and_alias_semantics() {
    let refs = scan("---\npeople:\n  - \"[[Old Note|Somebody]]\"\n---\n", false);
    assert_eq!(refs.len(), 1);
    assert!(refs[0].in_frontmatter);
    assert_eq!(refs[0].target, "Old Note");
    assert_eq!(refs[0].alias.as_deref(), Some("Somebody"));
}

#[test]
fn no_regions_without_code_or_frontmatter() {
    let text = "# Title\n\nJust [[a link]] in prose.\n";
    for skip_frontmatter in [true, false] {
        let regions =
            identify_skip_regions(text, &ScanOptions { skip_frontmatter });
        assert!(regions.is_empty());
    }
}

#[test]
fn repeated_scans_are_identical() {
    let text = "---\nrelated: [\"[[A]]\"]\n---\nbody [[B|b]] and `[[C]]`\n```\n[[D]]\n```\n";
    for skip_frontmatter in [true, false] {
        let first = scan(text, skip_frontmatter);
        let second = scan(text, skip_frontmatter);
        assert_eq!(first, second);
    }
}

#[test]
fn references_never_overlap_emitted_regions() {
    let text = "---\npeople:\n  - \"[[FM]]\"\n---\nbody [[Body]] `[[Inline]]`\n```\n[[Fenced]]\n```\n";
    let options = ScanOptions::default();
    let regions = identify_skip_regions(text, &options);
    let refs = scan(text, true);

    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].target, "Body");
    for r in &refs {
        for region in &regions {
            assert!(
                r.span.end <= region.span.start || region.span.end <= r.span.start,
                "reference {:?} overlaps region {:?}",
                r.span,
                region.span
            );
        }
    }
}
