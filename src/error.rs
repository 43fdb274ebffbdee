use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort an audit run.
///
/// Everything the auditor finds wrong with the site itself is a
/// [`Finding`](crate::report::Finding), never one of these.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The site root does not exist or is not a directory
    #[error("site root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A discovered HTML file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An exclude pattern is not a valid regex
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A parse worker panicked or was cancelled
    #[error("parse worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
