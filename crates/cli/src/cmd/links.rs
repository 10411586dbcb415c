use std::path::Path;

use serde::Serialize;

use notelink_core::scan::LinkReference;

use crate::LinksArgs;

use super::{load_config, scanner_for, vault_files};

#[derive(Debug, Serialize)]
struct FileLinks<'a> {
    path: String,
    references: Vec<&'a LinkReference>,
}

#[derive(Debug, Serialize)]
struct LinksReport<'a> {
    target: &'a str,
    files: Vec<FileLinks<'a>>,
    unreadable: Vec<String>,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: LinksArgs) {
    let rc = load_config(config, profile);
    crate::logging::init(&rc);

    let scanner = scanner_for(&rc, args.include_frontmatter);
    let files = vault_files(&rc);
    let scan = scanner.scan_vault_for_links(&files);
    let index = scan.build_index();

    let mut report = LinksReport {
        target: &args.target,
        files: Vec::new(),
        unreadable: scan.failures.keys().map(|p| p.display().to_string()).collect(),
    };

    for path in index.files_referencing(&args.target) {
        let references: Vec<&LinkReference> = scan
            .results
            .get(path)
            .map(|r| r.references.iter().filter(|l| l.target == args.target).collect())
            .unwrap_or_default();
        report
            .files
            .push(FileLinks { path: path.display().to_string(), references });
    }

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing output: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if report.files.is_empty() {
        println!("No references to [[{}]] found.", args.target);
    } else {
        let total: usize = report.files.iter().map(|f| f.references.len()).sum();
        println!(
            "Found {} reference(s) to [[{}]] in {} file(s):",
            total,
            args.target,
            report.files.len()
        );
        println!();
        for file in &report.files {
            println!("{}:", file.path);
            for reference in &file.references {
                let place = if reference.in_frontmatter { "frontmatter" } else { "body" };
                println!("  [{place}] {}", reference.raw);
            }
            println!();
        }
    }

    for path in &report.unreadable {
        eprintln!("warning: could not read {path}");
    }
}
