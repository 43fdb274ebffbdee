use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a site audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Site output directory to audit
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory names whose contents are never audited
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Regex patterns for root-relative paths to skip
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// File name of the not-found page, exempt from the canonical check
    #[serde(default = "default_not_found_page")]
    pub not_found_page: String,

    /// Document served for directory URLs
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Maximum number of files parsed at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

/// Default value for root
fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Version control, dependency cache and screenshot output directories
fn default_exclude_dirs() -> Vec<String> {
    [".git", "node_modules", ".playwright-screenshots", ".screenshots"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Default value for not_found_page
fn default_not_found_page() -> String {
    "404.html".to_string()
}

/// Default value for index_file
fn default_index_file() -> String {
    "index.html".to_string()
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    4
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new(default_root())
    }
}

impl AuditConfig {
    /// Create a new configuration with default values
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_dirs: default_exclude_dirs(),
            exclude_patterns: Vec::new(),
            not_found_page: default_not_found_page(),
            index_file: default_index_file(),
            max_concurrency: default_max_concurrency(),
        }
    }
}
