//! Errors raised while processing themes.
//!
//! Every variant is fatal for the run: callers propagate with `?` and the
//! binary exits non-zero. Non-fatal conditions (missing roots, missing
//! `theme.json`, patterns matching nothing) never produce a `ThemeError`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("IO error when reading `{0}`")]
    Read(PathBuf, #[source] io::Error),

    #[error("failed to list theme folder `{0}`")]
    ReadDir(PathBuf, #[source] io::Error),

    #[error("malformed theme config `{path}`")]
    MalformedConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid `assets` section in `{path}`: {reason}")]
    InvalidAssets { path: PathBuf, reason: String },

    #[error("failed to create directory `{0}`")]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("failed to copy `{from}` to `{to}`")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] io::Error),

    #[error("invalid glob pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T, E = ThemeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_theme_error_display_carries_path() {
        let err = ThemeError::CreateDir(
            PathBuf::from("public/css"),
            io::Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{err}");
        assert!(display.contains("public/css"));

        let err = ThemeError::InvalidAssets {
            path: PathBuf::from("themes/a/theme.json"),
            reason: "expected an object".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("themes/a/theme.json"));
        assert!(display.contains("expected an object"));
    }

    #[test]
    fn test_malformed_config_keeps_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ThemeError::MalformedConfig {
            path: PathBuf::from("theme.json"),
            source,
        };
        assert!(err.source().is_some());
    }
}
