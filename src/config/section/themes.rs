//! `[themes]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [themes]
//! jar = "target/flow-frontend/themes"   # themes extracted from packaged archives
//! projects = ["frontend/themes"]        # project theme roots, in processing order
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemesConfig {
    /// Packaged theme root.
    pub jar: PathBuf,

    /// Project theme roots.
    pub projects: Vec<PathBuf>,
}

impl Default for ThemesConfig {
    fn default() -> Self {
        Self {
            jar: "target/flow-frontend/themes".into(),
            projects: vec!["frontend/themes".into()],
        }
    }
}

impl ThemesConfig {
    /// Resolve every path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        self.jar = crate::utils::path::resolve_config_path(&self.jar, root);
        for project in &mut self.projects {
            *project = crate::utils::path::resolve_config_path(project, root);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jar.as_os_str().is_empty() {
            return Err(ConfigError::Validation("`themes.jar` must not be empty".into()));
        }
        if let Some(i) = self.projects.iter().position(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "`themes.projects[{i}]` must not be empty"
            )));
        }
        Ok(())
    }
}
