use crate::error::AuditError;
use crate::filter::PathFilter;
use crate::parsers::html;
use crate::results::PageMetadata;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use walkdir::WalkDir;

/// Lists the HTML files under `root` that pass `filter`, sorted by path.
///
/// `root` must be an existing directory. Entries below it that cannot be
/// read are logged and skipped. Symlinks to files are audited; symlinked
/// directories are not followed.
pub fn discover(root: &Path, filter: &PathFilter) -> Result<Vec<PathBuf>, AuditError> {
    if !root.is_dir() {
        return Err(AuditError::RootNotFound(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            !entry.file_type().is_dir()
                || entry
                    .path()
                    .strip_prefix(root)
                    .map(|relative| filter.should_enter(relative))
                    .unwrap_or(true)
        });

    let mut files = Vec::new();
    for entry in skip_unreadable(walker) {
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if filter.should_audit(relative) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    ::log::info!("Discovered {} HTML files under {}", files.len(), root.display());
    Ok(files)
}

/// Drops traversal errors after logging them
fn skip_unreadable<T, E: Display>(
    results: impl IntoIterator<Item = Result<T, E>>,
) -> impl Iterator<Item = T> {
    results.into_iter().filter_map(|result| match result {
        Ok(entry) => Some(entry),
        Err(err) => {
            ::log::warn!("Skipping unreadable path: {}", err);
            None
        }
    })
}

/// Reads and parses `files` concurrently.
///
/// At most `max_concurrency` files are in flight. Pages come back in the
/// same order as `files`.
pub async fn parse_pages(
    files: Vec<PathBuf>,
    max_concurrency: usize,
) -> Result<Vec<PageMetadata>, AuditError> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for file in files {
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let bytes = tokio::fs::read(&file)
                .await
                .map_err(|source| AuditError::Read {
                    path: file.clone(),
                    source,
                })?;
            Ok::<_, AuditError>(html::parse(file, &bytes))
        }));
    }

    let mut pages = Vec::with_capacity(handles.len());
    for handle in handles {
        pages.push(handle.await??);
    }
    Ok(pages)
}
