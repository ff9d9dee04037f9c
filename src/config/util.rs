//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the path to the config file if found
///
/// # Example
/// ```text
/// /home/user/app/frontend/themes/  ← start
/// /home/user/app/theme-assets.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    // Absolute paths are taken as-is
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("frontend/themes/dark");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("theme-assets.toml"), "").unwrap();

        let found = find_config_file(Path::new("theme-assets.toml"), &nested);
        assert_eq!(found, Some(dir.path().join("theme-assets.toml")));
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("custom.toml");

        assert_eq!(find_config_file(&config, dir.path()), None);

        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(&config, dir.path()), Some(config));
    }

    #[test]
    fn test_find_config_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            find_config_file(Path::new("definitely-not-here-7f3a.toml"), dir.path()),
            None
        );
    }
}
