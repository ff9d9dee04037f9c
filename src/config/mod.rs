//! Tool configuration management for `theme-assets.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── assets     # [assets]
//! │   └── themes     # [themes]
//! ├── types/         # Utility types
//! │   └── error      # ConfigError
//! └── mod.rs         # ToolConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                         |
//! |------------|-------------------------------------------------|
//! | `[themes]` | Packaged and project theme roots                |
//! | `[assets]` | Output root and installed-dependency root       |
//!
//! The config file is optional: without one, defaults apply relative to the
//! current directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AssetsConfig, ThemesConfig};
pub use types::ConfigError;

use crate::{
    cli::{Cli, DEFAULT_CONFIG, ThemeArgs},
    log,
    plugin::ThemeOptions,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing theme-assets.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Absolute path to the config file, empty when none was found (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Theme roots
    #[serde(default)]
    pub themes: ThemesConfig,

    /// Asset locations
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl ToolConfig {
    /// Load configuration from CLI arguments.
    ///
    /// An explicit `--config` must exist; the default name is searched upward
    /// from cwd and silently falls back to defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd)
    }

    /// [`ToolConfig::load`] with an explicit starting directory.
    pub fn load_from(cli: &Cli, cwd: &Path) -> Result<Self> {
        let config_name = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

        let mut config = match find_config_file(&config_name, cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None if cli.config.is_some() => {
                bail!(ConfigError::Validation(format!(
                    "config file `{}` not found",
                    config_name.display()
                )));
            }
            None => Self {
                root: cwd.to_path_buf(),
                ..Self::default()
            },
        };

        config.finalize(cli.theme_args())?;
        Ok(config)
    }

    /// Apply CLI overrides, validate, then make every path absolute.
    fn finalize(&mut self, args: &ThemeArgs) -> Result<()> {
        crate::logger::set_verbose(args.verbose);

        self.apply_theme_args(args);
        self.validate()?;

        let root = crate::utils::path::normalize_path(&self.root);
        if !self.config_path.as_os_str().is_empty() {
            self.config_path = crate::utils::path::normalize_path(&self.config_path);
        }
        self.themes.normalize(&root);
        self.assets.normalize(&root);
        self.root = root;
        Ok(())
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Folders handed to the theme plugin.
    pub fn theme_options(&self) -> ThemeOptions {
        ThemeOptions {
            theme_jar_folder: self.themes.jar.clone(),
            theme_project_folders: self.themes.projects.clone(),
            static_assets_output_folder: self.assets.output.clone(),
            node_modules_folder: self.assets.node_modules.clone(),
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply theme arguments from CLI.
    fn apply_theme_args(&mut self, args: &ThemeArgs) {
        Self::update_option(&mut self.themes.jar, args.jar.as_ref());
        if !args.projects.is_empty() {
            self.themes.projects = args.projects.clone();
        }
        Self::update_option(&mut self.assets.output, args.output.as_ref());
        Self::update_option(&mut self.assets.node_modules, args.node_modules.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate raw (pre-normalization) values.
    pub fn validate(&self) -> Result<()> {
        self.themes.validate()?;
        self.assets.validate()?;
        Ok(())
    }
}

// ============================================================================
// tests
// ============================================================================
