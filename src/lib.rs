#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod report;
pub mod resolver;
pub mod results;
pub mod utils;
pub mod validate;


// Re-export commonly used types for convenience
pub use config::AuditConfig;
pub use error::AuditError;
pub use report::{Finding, Report, ReportFormat};
pub use results::PageMetadata;

use filter::PathFilter;
use resolver::Resolver;
use std::path::PathBuf;

/// Builder for a static-site audit run
pub struct Audit {
    config: AuditConfig,
}

impl Audit {
    /// Create an audit of the site rooted at `root` with default settings
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: AuditConfig::new(root),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of files parsed concurrently
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Add regex patterns for root-relative paths to skip
    pub fn with_exclude_patterns(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        self.config.exclude_patterns.extend(patterns);
        self
    }

    /// Set the file name of the site's not-found page
    pub fn with_not_found_page(mut self, name: impl Into<String>) -> Self {
        self.config.not_found_page = name.into();
        self
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Discover, parse and validate every page under the root
    pub async fn run(self) -> Result<Report, AuditError> {
        let config = self.config;
        if let Ok(json) = serde_json::to_string(&config) {
            ::log::debug!("Audit configuration: {}", json);
        }

        let root = config
            .root
            .canonicalize()
            .map_err(|_| AuditError::RootNotFound(config.root.clone()))?;
        let filter = PathFilter::new(&config)?;

        let files = crawlers::filesystem::discover(&root, &filter)?;
        let pages = crawlers::filesystem::parse_pages(files, config.max_concurrency).await?;

        let resolver = Resolver::new(root).with_index_file(config.index_file.as_str());
        Ok(validate::validate(&pages, &resolver, &config.not_found_page))
    }
}
