use crate::config::AuditConfig;
use regex::Regex;
use std::path::Path;

/// Decides which files under the site root are audited
#[derive(Debug)]
pub struct PathFilter {
    extension: String,
    exclude_dirs: Vec<String>,
    exclude_regexes: Vec<Regex>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(&AuditConfig::default()).expect("Default config has no patterns to compile")
    }
}

impl PathFilter {
    /// Create a new path filter from configuration
    pub fn new(config: &AuditConfig) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            extension: "html".to_string(),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_regexes,
        })
    }

    /// Whether a directory below the root should be descended into
    pub fn should_enter(&self, relative_dir: &Path) -> bool {
        !relative_dir.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            self.exclude_dirs.iter().any(|dir| *dir == name)
        })
    }

    /// Whether a file, given relative to the root, should be audited
    pub fn should_audit(&self, relative_file: &Path) -> bool {
        if relative_file.extension().is_none_or(|ext| ext != self.extension.as_str()) {
            return false;
        }

        if let Some(parent) = relative_file.parent() {
            if !self.should_enter(parent) {
                return false;
            }
        }

        let posix = crate::utils::to_posix(relative_file);
        !self.exclude_regexes.iter().any(|regex| regex.is_match(&posix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = PathFilter::default();

        assert!(filter.should_audit(Path::new("index.html")));
        assert!(filter.should_audit(Path::new("blog/post.html")));

        // Only .html documents are audited
        assert!(!filter.should_audit(Path::new("style.css")));
        assert!(!filter.should_audit(Path::new("page.htm")));
        assert!(!filter.should_audit(Path::new("README")));
    }

    #[test]
    fn test_excluded_directories() {
        let filter = PathFilter::default();

        assert!(!filter.should_audit(Path::new(".git/index.html")));
        assert!(!filter.should_audit(Path::new("node_modules/pkg/readme.html")));
        assert!(!filter.should_audit(Path::new(".playwright-screenshots/home.html")));
        assert!(!filter.should_audit(Path::new("docs/.screenshots/a.html")));

        assert!(!filter.should_enter(Path::new("node_modules")));
        assert!(filter.should_enter(Path::new("blog")));
        // Segment match, not substring
        assert!(filter.should_audit(Path::new("my_node_modules/page.html")));
    }

    #[test]
    fn test_exclude_patterns() {
        let config = AuditConfig {
            exclude_patterns: vec![r"^drafts/".to_string(), r"-old\.html$".to_string()],
            ..AuditConfig::default()
        };
        let filter = PathFilter::new(&config).unwrap();

        assert!(!filter.should_audit(Path::new("drafts/post.html")));
        assert!(!filter.should_audit(Path::new("blog/post-old.html")));
        assert!(filter.should_audit(Path::new("blog/drafts/post.html")));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = AuditConfig {
            exclude_patterns: vec!["(".to_string()],
            ..AuditConfig::default()
        };
        assert!(PathFilter::new(&config).is_err());
    }
}
