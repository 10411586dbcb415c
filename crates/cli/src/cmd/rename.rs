use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use notelink_core::rename::{apply_rename, plan_rename, FileOutcome, RenamePlan};

use crate::RenameArgs;

use super::{load_config, scanner_for, vault_files};

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum FileReport {
    Applied { path: String, references_updated: usize },
    Previewed { path: String, edits: Vec<EditReport> },
    Failed { path: String, error: String },
}

#[derive(Debug, Serialize)]
struct EditReport {
    raw: String,
    replacement: String,
}

#[derive(Debug, Serialize)]
struct RenameReport<'a> {
    old_name: &'a str,
    new_name: &'a str,
    dry_run: bool,
    files: Vec<FileReport>,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: RenameArgs) {
    let rc = load_config(config, profile);
    crate::logging::init(&rc);

    let scanner = scanner_for(&rc, args.include_frontmatter);
    let files = vault_files(&rc);
    let index = scanner.scan_vault_for_links(&files).build_index();
    let plan = plan_rename(&args.old_name, &args.new_name, &index, &scanner);

    if !args.json {
        print_preview(&plan);
    }

    if args.dry_run {
        let outcome = apply_rename(plan, true, &rc.retry);
        if args.json {
            print_json(&args, true, outcome.files);
        } else {
            println!();
            println!("(dry-run mode - no changes made)");
        }
        return;
    }

    if plan.is_empty() {
        if args.json {
            print_json(&args, false, Vec::new());
        }
        return;
    }

    if !args.yes && !args.json && !confirm_rename() {
        println!("Cancelled.");
        return;
    }

    let outcome = apply_rename(plan, false, &rc.retry);
    let ok = outcome.all_succeeded();

    if args.json {
        print_json(&args, false, outcome.files);
    } else {
        println!();
        println!("Renamed: [[{}]] -> [[{}]]", args.old_name, args.new_name);
        println!(
            "Files modified: {}",
            outcome
                .files
                .iter()
                .filter(|f| matches!(f, FileOutcome::Applied { .. }))
                .count()
        );
        println!("References updated: {}", outcome.references_updated());

        for file in &outcome.files {
            if let FileOutcome::Failed { path, error } = file {
                eprintln!("failed: {}: {}", path.display(), error);
            }
        }
    }

    if !ok {
        std::process::exit(1);
    }
}

fn print_preview(plan: &RenamePlan) {
    println!("Renaming: [[{}]] -> [[{}]]", plan.old_name, plan.new_name);
    println!();

    if plan.files.is_empty() {
        println!("No references found to update.");
    } else {
        println!(
            "Found {} reference(s) in {} file(s):",
            plan.total_edits(),
            plan.files_affected()
        );
        println!();

        for file in &plan.files {
            println!("{}:", file.path.display());
            for edit in &file.edits {
                println!("  {} -> {}", edit.reference.raw, edit.replacement);
            }
            println!();
        }
    }

    for (path, error) in &plan.failed {
        eprintln!("warning: {}: {}", path.display(), error);
    }
}

fn print_json(args: &RenameArgs, dry_run: bool, files: Vec<FileOutcome>) {
    let report = RenameReport {
        old_name: &args.old_name,
        new_name: &args.new_name,
        dry_run,
        files: files.into_iter().map(file_report).collect(),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            std::process::exit(1);
        }
    }
}

fn file_report(outcome: FileOutcome) -> FileReport {
    match outcome {
        FileOutcome::Applied { path, references_updated } => FileReport::Applied {
            path: path.display().to_string(),
            references_updated,
        },
        FileOutcome::Previewed { path, edits } => FileReport::Previewed {
            path: path.display().to_string(),
            edits: edits
                .into_iter()
                .map(|e| EditReport { raw: e.reference.raw, replacement: e.replacement })
                .collect(),
        },
        FileOutcome::Failed { path, error } => FileReport::Failed {
            path: path.display().to_string(),
            error: error.to_string(),
        },
    }
}

fn confirm_rename() -> bool {
    print!("Proceed? [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}
