use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::vault::retry::RetryPolicy;

/// Number of scan/apply worker threads when a profile does not say.
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub scan: ScanOptions,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Additional root folders scanned as part of the same vault.
    #[serde(default)]
    pub extra_roots: Vec<String>,
    /// Folders to exclude from vault operations (relative to a root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    /// Concurrency limit for per-file work.
    pub workers: Option<usize>,
}

/// Options consumed by the scan pipeline.
///
/// Code regions are always excluded from extraction; that is not
/// configurable, so only the front-matter switch appears here.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScanOptions {
    /// When true (the default), the front-matter block is excluded from
    /// link extraction. When false, front-matter links are extracted.
    #[serde(default = "default_skip_frontmatter")]
    pub skip_frontmatter: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { skip_frontmatter: default_skip_frontmatter() }
    }
}

fn default_skip_frontmatter() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    /// Roots holding the note files, first entry is the primary root.
    pub vault_roots: Vec<PathBuf>,
    /// Folders to exclude from vault operations (resolved paths).
    pub excluded_folders: Vec<PathBuf>,
    pub scan: ScanOptions,
    pub retry: RetryPolicy,
    pub workers: usize,
    pub logging: LoggingConfig,
}
