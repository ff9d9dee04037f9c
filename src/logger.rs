//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, shown only with `--verbose`
//! - [`Log`], the logging capability handed to every theme component
//!
//! # Example
//!
//! ```ignore
//! // Simple logging
//! log!("theme"; "found {} themes", count);
//!
//! // Injected capability
//! let log = TerminalLog::new("theme");
//! log.info(format_args!("handling themes from {}", root.display()));
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    fmt,
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "theme" => prefix.bright_blue().bold().to_string(),
        "assets" => prefix.bright_green().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Log Capability
// ============================================================================

/// Logging capability passed explicitly into theme components.
///
/// Messages are observational only; no implementation may change control flow.
pub trait Log {
    /// Progress worth showing on every run.
    fn info(&self, args: fmt::Arguments<'_>);

    /// Something was skipped that the user probably expected to exist.
    fn warn(&self, args: fmt::Arguments<'_>);

    /// Per-file detail, shown only in verbose mode.
    fn trace(&self, args: fmt::Arguments<'_>);
}

/// [`Log`] implementation writing through `log!` / `debug!`.
#[derive(Debug, Clone, Copy)]
pub struct TerminalLog {
    module: &'static str,
}

impl TerminalLog {
    pub const fn new(module: &'static str) -> Self {
        Self { module }
    }
}

impl Default for TerminalLog {
    fn default() -> Self {
        Self::new("theme")
    }
}

impl Log for TerminalLog {
    fn info(&self, args: fmt::Arguments<'_>) {
        crate::log!(self.module; "{}", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        crate::log!("warning"; "{}", args);
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        crate::debug!(self.module; "{}", args);
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Severity recorded by [`MemoryLog`].
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Trace,
}

/// Records every message for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: parking_lot::Mutex<Vec<(Level, String)>>,
}

#[cfg(test)]
impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: Level, args: fmt::Arguments<'_>) {
        self.entries.lock().push((level, args.to_string()));
    }
}

#[cfg(test)]
impl Log for MemoryLog {
    fn info(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Info, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Warn, args);
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.push(Level::Trace, args);
    }
}
