//! Static asset copying (side effects).
//!
//! Every rule is resolved against the installed package and the matches are
//! copied flat into `output/<destination>/`. Existing files are overwritten
//! without comparing content; nothing is ever deleted.

use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::AssetRule;
use super::glob::resolve_glob;
use crate::error::{Result, ThemeError};
use crate::logger::Log;
use crate::theme::ThemeProperties;
use crate::utils::plural::plural_count;

/// Counts reported by [`copy_static_assets`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Rules evaluated.
    pub rules: usize,
    /// Files copied (a file copied twice counts twice).
    pub files: usize,
}

/// Copy every asset declared by `properties` into `output`.
///
/// Missing packages and patterns without matches copy nothing. Failing to
/// create a folder or copy a file aborts with an error.
pub fn copy_static_assets(
    properties: &ThemeProperties,
    output: &Path,
    node_modules: &Path,
    log: &dyn Log,
) -> Result<CopySummary> {
    let rules = properties.asset_rules()?;
    if rules.is_empty() {
        log.info(format_args!(
            "no assets to handle, no static assets were copied"
        ));
        return Ok(CopySummary::default());
    }

    create_dir_all(output)?;

    let mut summary = CopySummary::default();
    let mut written = FxHashSet::default();
    for rule in &rules {
        summary.files += copy_rule(rule, output, node_modules, &mut written, log)?;
        summary.rules += 1;
    }

    log.info(format_args!(
        "copied {} for {}",
        plural_count(summary.files, "file"),
        plural_count(summary.rules, "asset rule")
    ));
    Ok(summary)
}

/// Copy the matches of a single rule, returning how many were copied.
fn copy_rule(
    rule: &AssetRule,
    output: &Path,
    node_modules: &Path,
    written: &mut FxHashSet<PathBuf>,
    log: &dyn Log,
) -> Result<usize> {
    let files = resolve_glob(&rule.source_dir(node_modules), &rule.pattern)?;
    let target = rule.target_dir(output);
    create_dir_all(&target)?;

    if files.is_empty() {
        log.trace(format_args!(
            "`{}` matched nothing in {}",
            rule.pattern, rule.module
        ));
    }

    for file in &files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let dest = target.join(name);
        log.trace(format_args!(
            "copying: {} => {}",
            file.display(),
            target.display()
        ));
        if !written.insert(dest.clone()) {
            log.trace(format_args!(
                "overwriting {} copied earlier in this theme",
                dest.display()
            ));
        }
        fs::copy(file, &dest).map_err(|source| ThemeError::Copy {
            from: file.clone(),
            to: dest.clone(),
            source,
        })?;
    }

    Ok(files.len())
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| ThemeError::CreateDir(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{Level, MemoryLog};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn properties(json: &str) -> ThemeProperties {
        ThemeProperties::from_json(Path::new("theme.json"), json).unwrap()
    }

    fn list(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_no_assets_is_noop() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("public");
        let log = MemoryLog::new();

        let summary =
            copy_static_assets(&ThemeProperties::empty(), &output, dir.path(), &log).unwrap();

        assert_eq!(summary, CopySummary::default());
        assert!(!output.exists());
        assert_eq!(log.messages(Level::Info).len(), 1);
    }

    #[test]
    fn test_empty_assets_object_is_noop() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("public");

        let summary = copy_static_assets(
            &properties(r#"{"assets": {}}"#),
            &output,
            dir.path(),
            &MemoryLog::new(),
        )
        .unwrap();

        assert_eq!(summary.files, 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_copies_matches_flat() {
        let dir = TempDir::new().unwrap();
        let node_modules = dir.path().join("node_modules");
        write(node_modules.join("pkgA/files/a.css"), "a");
        write(node_modules.join("pkgA/files/b.css"), "b");
        write(node_modules.join("pkgA/files/nested/c.css"), "c");
        write(node_modules.join("pkgA/files/d.js"), "d");
        let output = dir.path().join("public");

        let summary = copy_static_assets(
            &properties(r#"{"assets": {"pkgA": {"files/**/*.css": "css"}}}"#),
            &output,
            &node_modules,
            &MemoryLog::new(),
        )
        .unwrap();

        assert_eq!(summary, CopySummary { rules: 1, files: 3 });
        assert_eq!(list(&output.join("css")), vec!["a.css", "b.css", "c.css"]);
        assert_eq!(fs::read_to_string(output.join("css/c.css")).unwrap(), "c");
    }

    #[test]
    fn test_missing_module_creates_target_only() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("public");

        let summary = copy_static_assets(
            &properties(r#"{"assets": {"ghost": {"*.css": "css"}}}"#),
            &output,
            &dir.path().join("node_modules"),
            &MemoryLog::new(),
        )
        .unwrap();

        assert_eq!(summary, CopySummary { rules: 1, files: 0 });
        assert!(output.join("css").is_dir());
        assert!(list(&output.join("css")).is_empty());
    }

    #[test]
    fn test_later_rule_wins_on_same_destination() {
        let dir = TempDir::new().unwrap();
        let node_modules = dir.path().join("node_modules");
        write(node_modules.join("first/style.css"), "first");
        write(node_modules.join("second/style.css"), "second");
        let output = dir.path().join("public");
        let log = MemoryLog::new();

        copy_static_assets(
            &properties(
                r#"{"assets": {"first": {"*.css": "css"}, "second": {"*.css": "css"}}}"#,
            ),
            &output,
            &node_modules,
            &log,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(output.join("css/style.css")).unwrap(),
            "second"
        );
        assert!(
            log.messages(Level::Trace)
                .iter()
                .any(|m| m.starts_with("overwriting"))
        );
    }

    #[test]
    fn test_invalid_assets_shape_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = copy_static_assets(
            &properties(r#"{"assets": {"pkg": ["*.css"]}}"#),
            &dir.path().join("public"),
            dir.path(),
            &MemoryLog::new(),
        );
        assert!(matches!(result, Err(ThemeError::InvalidAssets { .. })));
    }

    #[test]
    fn test_unwritable_target_is_fatal() {
        let dir = TempDir::new().unwrap();
        let node_modules = dir.path().join("node_modules");
        write(node_modules.join("pkg/a.css"), "a");
        // A file where the destination folder should go
        let output = dir.path().join("public");
        write(output.join("css"), "not a folder");

        let result = copy_static_assets(
            &properties(r#"{"assets": {"pkg": {"*.css": "css"}}}"#),
            &output,
            &node_modules,
            &MemoryLog::new(),
        );
        assert!(matches!(result, Err(ThemeError::CreateDir(..))));
    }

    #[test]
    fn test_failed_copy_is_fatal() {
        let dir = TempDir::new().unwrap();
        let node_modules = dir.path().join("node_modules");
        write(node_modules.join("pkg/a.css"), "a");
        write(node_modules.join("pkg/b.css"), "b");
        // A folder where the copied file should go
        let output = dir.path().join("public");
        fs::create_dir_all(output.join("css/a.css")).unwrap();

        let result = copy_static_assets(
            &properties(r#"{"assets": {"pkg": {"*.css": "css"}}}"#),
            &output,
            &node_modules,
            &MemoryLog::new(),
        );

        let Err(ThemeError::Copy { from, to, .. }) = result else {
            panic!("expected a copy error, got {result:?}");
        };
        assert_eq!(from, node_modules.join("pkg/a.css"));
        assert_eq!(to, output.join("css/a.css"));
        // Aborted before the next file
        assert!(!output.join("css/b.css").exists());
    }
}
