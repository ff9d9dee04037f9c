//! Shared helpers.
//!
//! - [`path`]: Path normalization for configuration values
//! - [`plural`]: Count formatting for log lines

pub mod path;
pub mod plural;
