//! Rename orchestration: plan computation and dry-run or real application.
//!
//! Planning re-reads every referencing file so the window for stale-content
//! races stays small; applying verifies each edit against the file's current
//! text and writes atomically. Propagation is best-effort per file, never
//! transactional across the vault.

mod types;
mod writer;

pub use types::{FileEdits, FileOutcome, PlannedEdit, RenameError, RenameOutcome, RenamePlan};
pub use writer::{apply_edits, write_atomic};

use tracing::{debug, info, warn};

use crate::scan::{LinkReference, ScanError, VaultIndex, VaultScanner};
use crate::vault::{Note, RetryPolicy};

/// Compute the substitutions required to rename `old_name` to `new_name`.
///
/// Every file the index lists for the old name is re-read fresh (not reused
/// from the earlier scan) and its current references are matched by exact
/// target name. An empty plan is valid.
pub fn plan_rename(
    old_name: &str,
    new_name: &str,
    index: &VaultIndex,
    scanner: &VaultScanner,
) -> RenamePlan {
    let mut plan = RenamePlan {
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
        files: Vec::new(),
        failed: Vec::new(),
    };

    for path in index.files_referencing(old_name) {
        match scanner.scan_file(path) {
            Ok((note, result)) => {
                let edits: Vec<PlannedEdit> = result
                    .references
                    .into_iter()
                    .filter(|r| r.target == old_name)
                    .map(|r| PlannedEdit {
                        replacement: replacement_for(&r, new_name),
                        reference: r,
                    })
                    .collect();

                // The index entry may be stale; a file with no surviving
                // match simply drops out of the plan.
                if !edits.is_empty() {
                    plan.files.push(FileEdits {
                        path: path.clone(),
                        modified: note.modified,
                        edits,
                    });
                }
            }
            Err(ScanError::Unreadable { path, source }) => {
                plan.failed.push((path.clone(), RenameError::ReadError { path, source }));
            }
        }
    }

    debug!(
        old = old_name,
        new = new_name,
        files = plan.files_affected(),
        edits = plan.total_edits(),
        "rename planned"
    );
    plan
}

/// Apply a plan, or preview it when `dry_run` is set.
///
/// Dry run never touches the filesystem. A real run handles each file
/// independently: re-read, verify every edit span still matches, rewrite in
/// memory, write back atomically. Failures are reported per file and
/// already-applied files stay applied.
pub fn apply_rename(plan: RenamePlan, dry_run: bool, retry: &RetryPolicy) -> RenameOutcome {
    let mut outcome = RenameOutcome::default();

    for (path, error) in plan.failed {
        outcome.files.push(FileOutcome::Failed { path, error });
    }

    for file in plan.files {
        if dry_run {
            outcome
                .files
                .push(FileOutcome::Previewed { path: file.path, edits: file.edits });
            continue;
        }

        match apply_file(&file, retry) {
            Ok(references_updated) => {
                info!(path = %file.path.display(), references_updated, "references rewritten");
                outcome
                    .files
                    .push(FileOutcome::Applied { path: file.path, references_updated });
            }
            Err(error) => {
                warn!(path = %file.path.display(), error = %error, "rename failed for file");
                outcome.files.push(FileOutcome::Failed { path: file.path, error });
            }
        }
    }

    outcome
}

fn apply_file(file: &FileEdits, retry: &RetryPolicy) -> Result<usize, RenameError> {
    // Re-read immediately before writing to narrow the staleness window.
    let note = Note::read(&file.path, retry).map_err(|source| RenameError::ReadError {
        path: file.path.clone(),
        source,
    })?;

    if !writer::edits_match(&note.content, &file.edits) {
        return Err(RenameError::StaleContent { path: file.path.clone() });
    }

    let new_content = writer::apply_edits(&note.content, &file.edits);
    writer::write_atomic(&file.path, &new_content, retry).map_err(|source| {
        RenameError::WriteError { path: file.path.clone(), source }
    })?;

    Ok(file.edits.len())
}

/// Replacement text for one reference: exact bracket syntax, heading and
/// alias reproduced verbatim.
fn replacement_for(reference: &LinkReference, new_name: &str) -> String {
    match (&reference.heading, &reference.alias) {
        (Some(heading), Some(alias)) => format!("[[{new_name}#{heading}|{alias}]]"),
        (Some(heading), None) => format!("[[{new_name}#{heading}]]"),
        (None, Some(alias)) => format!("[[{new_name}|{alias}]]"),
        (None, None) => format!("[[{new_name}]]"),
    }
}
