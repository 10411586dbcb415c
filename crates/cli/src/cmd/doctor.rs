use std::path::Path;

use notelink_core::config::loader::{default_config_path, ConfigLoader};
use notelink_core::vault::VaultWalker;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            println!("OK   nlk doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            for root in &rc.vault_roots {
                println!("vault_root: {}", root.display());
            }
            for folder in &rc.excluded_folders {
                println!("excluded: {}", folder.display());
            }
            println!("scan.skip_frontmatter: {}", rc.scan.skip_frontmatter);
            println!("retry.max_attempts: {}", rc.retry.max_attempts);
            println!("workers: {}", rc.workers);

            match VaultWalker::with_exclusions(&rc.vault_roots, rc.excluded_folders.clone())
            {
                Ok(walker) => match walker.walk() {
                    Ok(files) => println!("markdown files: {}", files.len()),
                    Err(e) => {
                        println!("FAIL walking vault");
                        println!("{e}");
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    println!("FAIL opening vault");
                    println!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            println!("FAIL nlk doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
