//! Per-theme `theme.json` reading.

use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::asset::AssetRule;
use crate::error::{Result, ThemeError};

/// File name looked up directly inside every theme folder.
pub const THEME_PROPERTIES_FILE: &str = "theme.json";

/// Parsed `theme.json`, kept in document order.
///
/// Only `assets` (and `lumoImports`, for the default loader) are interpreted;
/// every other key is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeProperties {
    /// File the values came from, `None` when the theme has no `theme.json`.
    source: Option<PathBuf>,
    values: Map<String, Value>,
}

impl ThemeProperties {
    /// Properties of a theme without `theme.json`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `content` read from `path`.
    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        let values =
            serde_json::from_str(content).map_err(|source| ThemeError::MalformedConfig {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            source: Some(path.to_path_buf()),
            values,
        })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Flattened `assets` section; empty when the section is absent.
    pub fn asset_rules(&self) -> Result<Vec<AssetRule>> {
        match self.values.get("assets") {
            Some(assets) => AssetRule::flatten(assets, self.source().unwrap_or(Path::new(""))),
            None => Ok(Vec::new()),
        }
    }

    /// String entries of `lumoImports`; anything else is ignored.
    pub fn lumo_imports(&self) -> Vec<&str> {
        self.values
            .get("lumoImports")
            .and_then(Value::as_array)
            .map(|imports| imports.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Read `theme.json` from `theme_folder`.
///
/// A missing file yields empty properties. A file that exists but cannot be
/// read or parsed is an error.
pub fn read_properties(theme_folder: &Path) -> Result<ThemeProperties> {
    let path = theme_folder.join(THEME_PROPERTIES_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => ThemeProperties::from_json(&path, &content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(ThemeProperties::empty()),
        Err(err) => Err(ThemeError::Read(path, err)),
    }
}
