mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nlk", version, about = "Wikilink scanning and safe note renames")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved vault roots
    Doctor,

    /// List the files that reference a note
    Links(LinksArgs),

    /// Rename a note and rewrite every reference to it
    Rename(RenameArgs),
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Note name to look up (file stem, no extension)
    pub target: String,

    /// Also scan YAML front-matter link lists
    #[arg(long)]
    pub include_frontmatter: bool,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Current note name
    pub old_name: String,

    /// New note name
    pub new_name: String,

    /// Show the planned edits without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Also rewrite references in YAML front-matter link lists
    #[arg(long)]
    pub include_frontmatter: bool,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), cli.profile.as_deref()),
        Commands::Links(args) => {
            cmd::links::run(cli.config.as_deref(), cli.profile.as_deref(), args)
        }
        Commands::Rename(args) => {
            cmd::rename::run(cli.config.as_deref(), cli.profile.as_deref(), args)
        }
    }
}
