//! Vault file access: discovery, per-note read views, retried I/O.

pub mod retry;
pub mod walker;

pub use retry::RetryPolicy;
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile};

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Read-only view of one note, materialized per scan and discarded after
/// use. Vault files are never mutated in memory.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    pub content: String,
    /// Stable display name derived from the filename.
    pub display_name: String,
    /// Modification time at read, used for staleness checks during rename.
    pub modified: SystemTime,
}

impl Note {
    /// Read a note from disk through the retry layer.
    pub fn read(path: &Path, retry: &RetryPolicy) -> io::Result<Note> {
        let content = retry.run("read note", || std::fs::read_to_string(path))?;
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        Ok(Note {
            path: path.to_path_buf(),
            content,
            display_name: display_name(path),
            modified,
        })
    }
}

/// Display name of a note: the filename without its extension.
pub fn display_name(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled").to_string()
}
