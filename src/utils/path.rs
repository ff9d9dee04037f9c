//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Normalize a path to absolute form.
///
/// Canonicalizes when the path exists; otherwise joins relative paths onto
/// the current directory and keeps absolute ones untouched.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against the project root.
///
/// Expands a leading `~`, joins relative paths onto `root`, then normalizes.
pub fn resolve_config_path(path: &Path, root: &Path) -> PathBuf {
    let path = match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    };
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    normalize_path(&full_path)
}
