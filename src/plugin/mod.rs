//! Per-build entry point.
//!
//! One [`ThemePlugin::run`] call per build run:
//!
//! 1. the packaged theme root, if it exists (warning otherwise);
//! 2. every project theme root, in configured order, if it exists.
//!
//! All roots share one output folder. The run stops at the first error.


use std::path::{Path, PathBuf};

use crate::asset::AssetRule;
use crate::error::Result;
use crate::generator::{LoaderGenerator, ThemeLoaderGenerator};
use crate::logger::Log;
use crate::theme::{
    RootKind, Theme, ThemeEnv, ThemeStats, discover_themes, handle_themes, read_properties,
};

/// Folders a run works on, all absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeOptions {
    /// Root holding themes extracted from packaged archives.
    pub theme_jar_folder: PathBuf,
    /// Project theme roots, processed after the packaged root.
    pub theme_project_folders: Vec<PathBuf>,
    /// Output root shared by every theme's assets.
    pub static_assets_output_folder: PathBuf,
    /// Installed-dependency root asset patterns resolve against.
    pub node_modules_folder: PathBuf,
}

impl ThemeOptions {
    /// Configured roots in processing order.
    pub fn roots(&self) -> impl Iterator<Item = (RootKind, &Path)> {
        std::iter::once((RootKind::Packaged, self.theme_jar_folder.as_path())).chain(
            self.theme_project_folders
                .iter()
                .map(|p| (RootKind::Project, p.as_path())),
        )
    }
}

/// A theme seen by [`ThemePlugin::discover`].
#[derive(Debug, Clone)]
pub struct DiscoveredTheme {
    pub kind: RootKind,
    pub theme: Theme,
    pub rules: Vec<AssetRule>,
}

/// Theme handling for one build.
#[derive(Debug, Clone)]
pub struct ThemePlugin<G = ThemeLoaderGenerator> {
    options: ThemeOptions,
    generator: G,
}

impl ThemePlugin {
    pub fn new(options: ThemeOptions) -> Self {
        Self::with_generator(options, ThemeLoaderGenerator)
    }
}

impl<G: LoaderGenerator> ThemePlugin<G> {
    pub fn with_generator(options: ThemeOptions, generator: G) -> Self {
        Self { options, generator }
    }

    /// Process every existing root.
    pub fn run(&self, log: &dyn Log) -> Result<ThemeStats> {
        let env = ThemeEnv {
            node_modules: &self.options.node_modules_folder,
            generator: &self.generator,
            log,
        };
        let output = &self.options.static_assets_output_folder;

        let mut stats = ThemeStats::default();
        for (kind, root) in self.options.roots() {
            if root.exists() {
                stats += handle_themes(root, output, &env)?;
            } else if kind == RootKind::Packaged {
                log.warn(format_args!(
                    "theme JAR folder not found from {}",
                    root.display()
                ));
            }
        }
        Ok(stats)
    }

    /// List themes and their asset rules without writing anything.
    pub fn discover(&self) -> Result<Vec<DiscoveredTheme>> {
        let mut found = Vec::new();
        for (kind, root) in self.options.roots() {
            if !root.exists() {
                continue;
            }
            for theme in discover_themes(root)? {
                let rules = read_properties(&theme.folder)?.asset_rules()?;
                found.push(DiscoveredTheme { kind, theme, rules });
            }
        }
        Ok(found)
    }
}
