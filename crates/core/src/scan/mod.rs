//! Vault scanning: per-file skip-region detection and link extraction,
//! aggregated into a point-in-time result set and a reverse index.
//!
//! Results are transient by design: every rename operation re-scans rather
//! than acting on cached link data.

pub mod extractor;
pub mod regions;
mod types;

pub use types::{
    LinkReference, LinkScanResult, ScanError, SkipKind, SkipRegion, VaultIndex,
    VaultScan,
};

use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, warn};

use crate::config::types::ScanOptions;
use crate::vault::{Note, RetryPolicy};

use extractor::extract_links;
use regions::identify_skip_regions;

/// Scanner over a set of note files.
///
/// Holds the explicit configuration for one operation; nothing is read from
/// ambient process state.
#[derive(Debug, Clone, Copy)]
pub struct VaultScanner {
    options: ScanOptions,
    retry: RetryPolicy,
    workers: usize,
}

impl VaultScanner {
    pub fn new(options: ScanOptions, retry: RetryPolicy, workers: usize) -> Self {
        Self { options, retry, workers: workers.max(1) }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Detect skip regions and extract links from text already in memory.
    pub fn scan_text(&self, text: &str, source: &Path) -> LinkScanResult {
        let skip_regions = identify_skip_regions(text, &self.options);
        let references = extract_links(text, &skip_regions, source);
        LinkScanResult { references, skip_regions }
    }

    /// Read one file through the retry layer and scan it.
    pub fn scan_file(&self, path: &Path) -> Result<(Note, LinkScanResult), ScanError> {
        let note = Note::read(path, &self.retry).map_err(|source| {
            ScanError::Unreadable { path: path.to_path_buf(), source }
        })?;
        let result = self.scan_text(&note.content, path);
        debug!(
            path = %path.display(),
            references = result.references.len(),
            skipped = result.skip_regions.len(),
            "scanned note"
        );
        Ok((note, result))
    }

    /// Scan every file in the list. Per-file work is fanned out across a
    /// bounded set of worker threads and merged afterwards; a failure on one
    /// file is recorded and never aborts the scan.
    pub fn scan_vault_for_links(&self, files: &[PathBuf]) -> VaultScan {
        let chunk_size = files.len().div_ceil(self.workers).max(1);

        let mut partitions = Vec::new();
        thread::scope(|scope| {
            let handles: Vec<_> = files
                .chunks(chunk_size)
                .map(|part| {
                    scope.spawn(move || {
                        part.iter()
                            .map(|path| {
                                (path.clone(), self.scan_file(path).map(|(_, r)| r))
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                // A panicking worker is a bug in this crate, not an I/O
                // failure to record.
                partitions.push(handle.join().expect("scan worker panicked"));
            }
        });

        let mut scan = VaultScan::default();
        for partition in partitions {
            for (path, result) in partition {
                match result {
                    Ok(r) => {
                        scan.results.insert(path, r);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "file skipped during scan");
                        scan.failures.insert(path, e);
                    }
                }
            }
        }
        scan
    }
}
