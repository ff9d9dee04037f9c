//! Per-root theme processing.

use std::fs;
use std::path::Path;

use super::{Theme, ThemeStats, read_properties};
use crate::asset::copy_static_assets;
use crate::error::{Result, ThemeError};
use crate::generator::LoaderGenerator;
use crate::logger::Log;

/// Collaborators shared by every theme of a run.
#[derive(Clone, Copy)]
pub struct ThemeEnv<'a> {
    /// Installed-dependency root that asset patterns resolve against.
    pub node_modules: &'a Path,
    pub generator: &'a dyn LoaderGenerator,
    pub log: &'a dyn Log,
}

/// List the themes of a root: its immediate subdirectories, sorted by name.
///
/// Entries that are not directories (including symlinks) are skipped.
pub fn discover_themes(themes_folder: &Path) -> Result<Vec<Theme>> {
    let read_dir_err = |e: std::io::Error| ThemeError::ReadDir(themes_folder.to_path_buf(), e);

    let mut themes = Vec::new();
    for entry in fs::read_dir(themes_folder).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        if !entry.file_type().map_err(read_dir_err)?.is_dir() {
            continue;
        }
        themes.push(Theme {
            name: entry.file_name().to_string_lossy().into_owned(),
            folder: entry.path(),
        });
    }
    themes.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(themes)
}

/// Process every theme found in `themes_folder`.
///
/// The folder must exist. The first failing theme aborts the whole call;
/// themes after it are left untouched.
pub fn handle_themes(
    themes_folder: &Path,
    output: &Path,
    env: &ThemeEnv<'_>,
) -> Result<ThemeStats> {
    env.log.info(format_args!(
        "handling themes from {}",
        themes_folder.display()
    ));

    let mut stats = ThemeStats::default();
    for theme in discover_themes(themes_folder)? {
        stats.files += process_theme(&theme, output, env)?;
        stats.themes += 1;
    }
    Ok(stats)
}

/// Read properties, copy assets, then regenerate the loader script.
///
/// Returns the number of asset files copied.
pub fn process_theme(theme: &Theme, output: &Path, env: &ThemeEnv<'_>) -> Result<usize> {
    let properties = read_properties(&theme.folder)?;
    env.log.info(format_args!(
        "found theme {} in folder {}",
        theme.name,
        theme.folder.display()
    ));

    let copied = copy_static_assets(&properties, output, env.node_modules, env.log)?;

    let script = env
        .generator
        .generate(&theme.folder, &theme.name, &properties)?;
    let loader = theme.loader_path();
    fs::write(&loader, script).map_err(|e| ThemeError::Write(loader.clone(), e))?;
    env.log.trace(format_args!("wrote {}", loader.display()));

    Ok(copied.files)
}
