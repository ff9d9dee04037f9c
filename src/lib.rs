//! Theme asset integration for web application builds.
//!
//! For every theme folder under the configured roots, copies the static
//! assets its `theme.json` declares out of installed packages and writes a
//! generated `<theme>.js` loader next to it.

pub mod asset;
pub mod cli;
pub mod config;
pub mod embed;
pub mod error;
pub mod generator;
pub mod logger;
pub mod plugin;
pub mod theme;
pub mod utils;

pub use config::ToolConfig;
pub use error::{Result, ThemeError};
pub use generator::{LoaderGenerator, ThemeLoaderGenerator};
pub use logger::{Log, TerminalLog};
pub use plugin::{DiscoveredTheme, ThemeOptions, ThemePlugin};
pub use theme::{RootKind, Theme, ThemeStats};
