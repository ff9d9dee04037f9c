//! Theme discovery and processing.
//!
//! A theme root is a folder whose immediate subdirectories are themes:
//!
//! ```text
//! frontend/themes/
//! ├── my-theme/
//! │   ├── theme.json        # optional, see `properties`
//! │   ├── styles.css
//! │   └── my-theme.js       # generated on every run
//! └── README.md             # not a folder, ignored
//! ```

mod processor;
mod properties;

pub use processor::{ThemeEnv, discover_themes, handle_themes, process_theme};
pub use properties::{THEME_PROPERTIES_FILE, ThemeProperties, read_properties};

use std::ffi::OsString;
use std::fmt;
use std::ops::AddAssign;
use std::path::PathBuf;

/// Where a theme root comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// Themes extracted from packaged archives (JAR).
    Packaged,
    /// Themes living in the project sources.
    Project,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packaged => f.write_str("packaged"),
            Self::Project => f.write_str("project"),
        }
    }
}

/// A discovered theme folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Folder name, lossily converted when it is not UTF-8.
    pub name: String,
    /// Absolute folder path.
    pub folder: PathBuf,
}

impl Theme {
    /// `<folder>/<folder name>.js`, rewritten on every run.
    ///
    /// Built from the raw folder name so non UTF-8 names round-trip.
    pub fn loader_path(&self) -> PathBuf {
        let mut file = match self.folder.file_name() {
            Some(raw) => raw.to_os_string(),
            None => OsString::from(&self.name),
        };
        file.push(".js");
        self.folder.join(file)
    }
}

/// Totals of one or more processed roots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeStats {
    pub themes: usize,
    pub files: usize,
}

impl AddAssign for ThemeStats {
    fn add_assign(&mut self, other: Self) {
        self.themes += other.themes;
        self.files += other.files;
    }
}
