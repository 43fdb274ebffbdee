use std::path::{Component, Path};

/// Render a path with `/` separators regardless of platform
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path relative to `root` for display, or the full path when outside it
pub fn display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => to_posix(relative),
        Err(_) => path.display().to_string(),
    }
}
