use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Metadata extracted from a single HTML document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Absolute path of the source document
    pub file: PathBuf,

    /// Text of the first non-empty `<title>`
    pub title: Option<String>,

    /// Content of the last non-empty `<meta name="description">`
    pub description: Option<String>,

    /// Href of the last non-empty `<link rel="canonical">`
    pub canonical: Option<String>,

    /// Number of `<h1>` start tags
    pub h1_count: usize,

    /// Every non-empty `id` attribute in the document
    pub ids: HashSet<String>,

    /// Images in document order
    pub images: Vec<ImageRef>,

    /// Outbound `href`/`src` references in document order
    pub references: Vec<Reference>,
}

impl PageMetadata {
    /// Create an empty record for the given file
    pub fn new(file: PathBuf) -> Self {
        Self {
            file,
            ..Self::default()
        }
    }
}

/// One `<img>` tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,

    /// `None` when the tag has no `alt` attribute at all, `Some("")` for `alt=""`
    pub alt: Option<String>,

    pub width: String,
    pub height: String,
}

/// A raw `href`/`src` value and the line it was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub value: String,
    pub line: u64,
}

impl Reference {
    pub fn new(value: impl Into<String>, line: u64) -> Self {
        Self {
            value: value.into(),
            line,
        }
    }
}
