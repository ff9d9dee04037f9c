//! `[assets]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! output = "target/classes/META-INF/VAADIN/static"   # where copied assets land
//! node_modules = "node_modules"                      # installed packages
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Output root shared by all themes.
    pub output: PathBuf,

    /// Installed-dependency root that asset patterns resolve against.
    pub node_modules: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            output: "target/classes/META-INF/VAADIN/static".into(),
            node_modules: "node_modules".into(),
        }
    }
}

impl AssetsConfig {
    /// Resolve every path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.output = crate::utils::path::resolve_config_path(&self.output, root);
        self.node_modules = crate::utils::path::resolve_config_path(&self.node_modules, root);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "`assets.output` must not be empty".into(),
            ));
        }
        if self.node_modules.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "`assets.node_modules` must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssetsConfig::default();
        assert_eq!(config.node_modules, PathBuf::from("node_modules"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_output() {
        let config = AssetsConfig {
            output: PathBuf::new(),
            ..AssetsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }
}
