//! Command-line interface module.

mod args;

pub use args::{Cli, Commands, DEFAULT_CONFIG, ThemeArgs};
