use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?:)?//").expect("absolute URL pattern should be valid"));

/// Classification of a raw `href`/`src` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Off-site URL, `mailto:` or `tel:`
    External,
    /// Inline `data:` URI
    DataUri,
    /// `#fragment` on the referencing page itself
    SamePageFragment(String),
    /// A path inside the site tree, plus its fragment (empty when there is none)
    FilesystemTarget { path: PathBuf, fragment: String },
}

/// Resolves references against a site root
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    index_file: String,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_file: "index.html".to_string(),
        }
    }

    /// Override the directory index document name
    pub fn with_index_file(mut self, index_file: impl Into<String>) -> Self {
        self.index_file = index_file.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Classify `raw` as referenced from `page_file`
    pub fn resolve(&self, page_file: &Path, raw: &str) -> Resolution {
        if is_external(raw) {
            return Resolution::External;
        }
        if raw.starts_with("data:") {
            return Resolution::DataUri;
        }

        let (base, fragment) = split_fragment(raw);
        let base = base.trim();
        if base.is_empty() {
            return Resolution::SamePageFragment(fragment.to_string());
        }

        let path = match base.strip_prefix('/') {
            Some(rooted) => join_normalized(&self.root, rooted),
            None => {
                let dir = page_file.parent().unwrap_or(&self.root);
                join_normalized(dir, base)
            }
        };

        Resolution::FilesystemTarget {
            path,
            fragment: fragment.to_string(),
        }
    }

    /// Whether `path` names something a browser would load.
    ///
    /// Directories, and extensionless paths that are not files, must contain
    /// the index document.
    pub fn target_exists(&self, path: &Path) -> bool {
        if path.is_dir() {
            return path.join(&self.index_file).exists();
        }
        if path.extension().is_none() && path.join(&self.index_file).exists() {
            return true;
        }
        path.exists()
    }
}

/// Absolute URLs (with or without scheme), `mailto:` and `tel:` links
pub fn is_external(reference: &str) -> bool {
    ABSOLUTE_URL.is_match(reference)
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
}

/// Split `reference` at the first `#`
pub fn split_fragment(reference: &str) -> (&str, &str) {
    reference.split_once('#').unwrap_or((reference, ""))
}

/// Append `/`- or `\`-separated segments to `dir`, collapsing repeated
/// separators and dropping `.` segments. `..` is left for the filesystem.
fn join_normalized(dir: &Path, relative: &str) -> PathBuf {
    let mut path = dir.to_path_buf();
    for segment in relative.split(['/', '\\']) {
        if segment.is_empty() || segment == "." {
            continue;
        }
        path.push(segment);
    }
    path
}
