//! Asset rules: `module → pattern → destination` triples.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

/// One entry of a theme's `assets` section.
///
/// ```json
/// { "assets": { "@fortawesome/fontawesome-free": { "svgs/regular/**": "fontawesome/icons" } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRule {
    /// Package name, possibly scoped (`@scope/name`).
    pub module: String,
    /// Glob relative to the package folder.
    pub pattern: String,
    /// Folder relative to the output root.
    pub destination: String,
}

impl AssetRule {
    pub fn new(
        module: impl Into<String>,
        pattern: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            pattern: pattern.into(),
            destination: destination.into(),
        }
    }

    /// Installed location of the module.
    pub fn source_dir(&self, node_modules: &Path) -> PathBuf {
        node_modules.join(&self.module)
    }

    /// Folder the matched files are copied into.
    ///
    /// An absolute destination replaces `output` entirely.
    pub fn target_dir(&self, output: &Path) -> PathBuf {
        output.join(&self.destination)
    }

    /// Flatten an `assets` value into rules, keeping document order.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) count as absent. `source` is
    /// only used for error messages.
    pub fn flatten(assets: &Value, source: &Path) -> Result<Vec<Self>> {
        let modules = match assets {
            _ if is_falsy(assets) => return Ok(Vec::new()),
            Value::Object(modules) => modules,
            other => {
                return Err(invalid(
                    source,
                    format!("expected an object of modules, found {}", kind(other)),
                ));
            }
        };

        let mut rules = Vec::new();
        for (module, patterns) in modules {
            let Value::Object(patterns) = patterns else {
                return Err(invalid(
                    source,
                    format!(
                        "module `{module}`: expected an object of patterns, found {}",
                        kind(patterns)
                    ),
                ));
            };
            Self::flatten_module(module, patterns, source, &mut rules)?;
        }
        Ok(rules)
    }

    fn flatten_module(
        module: &str,
        patterns: &Map<String, Value>,
        source: &Path,
        rules: &mut Vec<Self>,
    ) -> Result<()> {
        for (pattern, destination) in patterns {
            let Value::String(destination) = destination else {
                return Err(invalid(
                    source,
                    format!(
                        "`{module}` → `{pattern}`: destination must be a string, found {}",
                        kind(destination)
                    ),
                ));
            };
            rules.push(Self::new(module, pattern.as_str(), destination.as_str()));
        }
        Ok(())
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn invalid(source: &Path, reason: String) -> ThemeError {
    ThemeError::InvalidAssets {
        path: source.to_path_buf(),
        reason,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
