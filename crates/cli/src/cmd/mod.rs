//! Command implementations and the shared config-to-scanner plumbing.

pub mod doctor;
pub mod links;
pub mod rename;

use std::path::{Path, PathBuf};

use notelink_core::config::loader::ConfigLoader;
use notelink_core::config::types::{ResolvedConfig, ScanOptions};
use notelink_core::scan::VaultScanner;
use notelink_core::vault::VaultWalker;

/// Load config or exit with a readable error. Every command starts here.
pub(crate) fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    }
}

/// Discover every markdown file across the configured vault roots.
pub(crate) fn vault_files(rc: &ResolvedConfig) -> Vec<PathBuf> {
    let walker =
        match VaultWalker::with_exclusions(&rc.vault_roots, rc.excluded_folders.clone()) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("Error opening vault: {e}");
                std::process::exit(1);
            }
        };

    match walker.walk() {
        Ok(files) => {
            tracing::debug!(count = files.len(), "discovered markdown files");
            files.into_iter().map(|f| f.absolute_path).collect()
        }
        Err(e) => {
            eprintln!("Error walking vault: {e}");
            std::process::exit(1);
        }
    }
}

/// Build a scanner from resolved config, letting `--include-frontmatter`
/// force front-matter link lists into scope for this invocation.
pub(crate) fn scanner_for(rc: &ResolvedConfig, include_frontmatter: bool) -> VaultScanner {
    let options = ScanOptions {
        skip_frontmatter: rc.scan.skip_frontmatter && !include_frontmatter,
    };
    VaultScanner::new(options, rc.retry, rc.workers)
}
