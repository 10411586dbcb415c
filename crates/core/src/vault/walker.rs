//! Recursive vault directory walker.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk vault directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),

    #[error("failed to read file metadata {0}: {1}")]
    MetadataError(String, #[source] std::io::Error),
}

/// Information about a discovered markdown file.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// Path relative to the root it was found under.
    pub relative_path: PathBuf,
    /// File modification time.
    pub modified: SystemTime,
}

/// Walker for discovering markdown files across one or more vault roots.
///
/// Extension filtering happens here, at the collaborator boundary; the scan
/// pipeline itself accepts any file list.
#[derive(Debug)]
pub struct VaultWalker {
    roots: Vec<PathBuf>,
    /// Folders to exclude from walking (relative paths from a vault root).
    excluded_folders: Vec<PathBuf>,
}

impl VaultWalker {
    /// Create a new walker for the given vault roots.
    pub fn new(roots: &[PathBuf]) -> Result<Self, VaultWalkerError> {
        Self::with_exclusions(roots, Vec::new())
    }

    /// Create a new walker with folder exclusions.
    ///
    /// Excluded folders can be specified as:
    /// - Relative paths from a vault root (e.g., "archive/attic")
    /// - Absolute paths (will be matched against each root)
    pub fn with_exclusions(
        roots: &[PathBuf],
        excluded_folders: Vec<PathBuf>,
    ) -> Result<Self, VaultWalkerError> {
        let mut canonical = Vec::with_capacity(roots.len());
        for root in roots {
            let root = root
                .canonicalize()
                .map_err(|_| VaultWalkerError::MissingRoot(root.display().to_string()))?;
            canonical.push(root);
        }

        // Normalize absolute exclusions against whichever root they live in
        let excluded_folders = excluded_folders
            .into_iter()
            .map(|p| {
                if p.is_absolute() {
                    for root in &canonical {
                        if let Ok(rel) = p.strip_prefix(root) {
                            return rel.to_path_buf();
                        }
                    }
                }
                p
            })
            .collect();

        Ok(Self { roots: canonical, excluded_folders })
    }

    /// Walk every root and return all markdown files, sorted by path.
    /// Excludes hidden directories, common non-vault directories, and
    /// configured exclusions.
    pub fn walk(&self) -> Result<Vec<WalkedFile>, VaultWalkerError> {
        let mut files = Vec::new();

        for root in &self.roots {
            for entry in WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| !self.is_excluded(root, e))
            {
                let entry = entry.map_err(|e| {
                    VaultWalkerError::WalkError(root.display().to_string(), e)
                })?;

                let path = entry.path();
                if !path.is_file() || !is_markdown_file(path) {
                    continue;
                }

                let metadata = path.metadata().map_err(|e| {
                    VaultWalkerError::MetadataError(path.display().to_string(), e)
                })?;

                let relative_path =
                    path.strip_prefix(root).unwrap_or(path).to_path_buf();

                files.push(WalkedFile {
                    absolute_path: path.to_path_buf(),
                    relative_path,
                    modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                });
            }
        }

        files.sort_by(|a, b| a.absolute_path.cmp(&b.absolute_path));
        Ok(files)
    }

    /// Check if an entry should be excluded from walking.
    fn is_excluded(&self, root: &Path, entry: &walkdir::DirEntry) -> bool {
        // Never filter the root directory (depth 0)
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();

        // Skip hidden files and directories
        if name.starts_with('.') {
            return true;
        }

        // Skip common non-vault directories
        if matches!(name.as_ref(), "node_modules" | "target" | "__pycache__" | "venv") {
            return true;
        }

        if !self.excluded_folders.is_empty() {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                for excluded in &self.excluded_folders {
                    if relative.starts_with(excluded) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Get the configured vault roots.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == "md")
}
