//! Data structures produced by the scan pipeline.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors recorded per file during a vault scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Kind of text span excluded from link extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipKind {
    /// Fenced code block, delimiters included.
    CodeFence,
    /// Single-backtick inline code span.
    InlineCode,
    /// The YAML front-matter block, delimiters included.
    FrontMatter,
}

/// A half-open byte range excluded from link extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipRegion {
    pub kind: SkipKind,
    pub span: Range<usize>,
}

/// A wikilink found in the scannable portion of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    /// File containing the reference.
    pub source: PathBuf,
    /// The matched text, brackets included (e.g. `[[Old Note|Alias]]`).
    pub raw: String,
    /// Target note name, without any heading fragment.
    pub target: String,
    /// Heading fragment after `#`, preserved verbatim through a rename.
    pub heading: Option<String>,
    /// Display alias after `|`, preserved verbatim through a rename.
    pub alias: Option<String>,
    /// Half-open byte range of the whole match.
    pub span: Range<usize>,
    /// True when the match sits inside the front-matter block.
    pub in_frontmatter: bool,
}

/// Point-in-time scan of one file. Immutable once produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkScanResult {
    /// References in document order (ascending offset).
    pub references: Vec<LinkReference>,
    /// Skip regions in ascending offset order; kinds never overlap.
    pub skip_regions: Vec<SkipRegion>,
}

/// Aggregated scan across a vault. Failures never abort the scan; the
/// orchestrator decides whether a partial result is acceptable.
#[derive(Debug, Default)]
pub struct VaultScan {
    pub results: BTreeMap<PathBuf, LinkScanResult>,
    pub failures: BTreeMap<PathBuf, ScanError>,
}

impl VaultScan {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Build the reverse index from link target name to referencing files.
    /// Matching is exact and case-sensitive; notes sharing a display name
    /// collapse into one logical target.
    pub fn build_index(&self) -> VaultIndex {
        let mut index = VaultIndex::default();
        for (path, result) in &self.results {
            for reference in &result.references {
                index.insert(&reference.target, path);
            }
        }
        index
    }
}

/// Reverse mapping from link target name to the files referencing it.
/// Rebuilt per operation, never persisted.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    targets: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl VaultIndex {
    pub fn insert(&mut self, target: &str, file: &Path) {
        self.targets.entry(target.to_string()).or_default().insert(file.to_path_buf());
    }

    /// Files referencing the given target, in path order.
    pub fn files_referencing<'a>(
        &'a self,
        target: &str,
    ) -> impl Iterator<Item = &'a PathBuf> {
        self.targets.get(target).into_iter().flatten()
    }

    pub fn contains(&self, target: &str) -> bool {
        self.targets.contains_key(target)
    }

    pub fn targets(&self) -> impl Iterator<Item = (&String, &BTreeSet<PathBuf>)> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
