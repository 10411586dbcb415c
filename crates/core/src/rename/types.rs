//! Data structures for rename planning and application.

use std::path::PathBuf;
use std::time::SystemTime;

use serde::Serialize;
use thiserror::Error;

use crate::scan::LinkReference;

/// Errors that can occur while planning or applying a rename. Always
/// surfaced per file; nothing here aborts the overall operation.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("failed to read file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content of {path} changed after the plan was computed")]
    StaleContent { path: PathBuf },
}

/// One reference substitution inside a file.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedEdit {
    pub reference: LinkReference,
    /// Replacement for the whole bracketed match; alias, heading, and
    /// surrounding quoting survive because the span covers only the link.
    pub replacement: String,
}

/// Every edit planned for one file, tied to the content snapshot it was
/// computed against.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdits {
    pub path: PathBuf,
    /// Modification time of the snapshot, kept for staleness checks.
    #[serde(skip)]
    pub modified: SystemTime,
    /// Edits in document order.
    pub edits: Vec<PlannedEdit>,
}

/// The computed substitutions for one rename. An empty plan is valid:
/// renaming a note with no inbound links is not an error.
#[derive(Debug)]
pub struct RenamePlan {
    pub old_name: String,
    pub new_name: String,
    pub files: Vec<FileEdits>,
    /// Files the index listed but which could not be re-read at plan time.
    pub failed: Vec<(PathBuf, RenameError)>,
}

impl RenamePlan {
    /// Total number of references that would be updated.
    pub fn total_edits(&self) -> usize {
        self.files.iter().map(|f| f.edits.len()).sum()
    }

    /// Number of files that would be modified.
    pub fn files_affected(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.failed.is_empty()
    }
}

/// Per-file result of applying (or previewing) a plan.
#[derive(Debug)]
pub enum FileOutcome {
    /// Edits applied and written back atomically.
    Applied { path: PathBuf, references_updated: usize },
    /// Dry run: edits computed, filesystem untouched.
    Previewed { path: PathBuf, edits: Vec<PlannedEdit> },
    /// This file failed; other files are unaffected and never rolled back.
    Failed { path: PathBuf, error: RenameError },
}

impl FileOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileOutcome::Applied { path, .. }
            | FileOutcome::Previewed { path, .. }
            | FileOutcome::Failed { path, .. } => path,
        }
    }
}

/// Outcome list for a whole rename, one entry per touched file.
#[derive(Debug, Default)]
pub struct RenameOutcome {
    pub files: Vec<FileOutcome>,
}

impl RenameOutcome {
    pub fn all_succeeded(&self) -> bool {
        !self.files.iter().any(|f| matches!(f, FileOutcome::Failed { .. }))
    }

    pub fn references_updated(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f {
                FileOutcome::Applied { references_updated, .. } => *references_updated,
                _ => 0,
            })
            .sum()
    }
}
