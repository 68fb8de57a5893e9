//! Error types for mdaggregate.
//!
//! Library crates use [`MdAggregateError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all mdaggregate operations.
#[derive(Debug, thiserror::Error)]
pub enum MdAggregateError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory walk failed (unreadable directory, vanished entry, loop).
    #[error("traversal error at {path:?}: {message}")]
    Traversal { path: PathBuf, message: String },

    /// The scan root exists but is not a directory.
    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MdAggregateError>;

impl MdAggregateError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a traversal error for the given path.
    pub fn traversal(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Traversal {
            path: path.into(),
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = MdAggregateError::config("bad exclude list");
        assert_eq!(err.to_string(), "config error: bad exclude list");

        let err = MdAggregateError::traversal("/docs/private", "permission denied");
        assert!(err.to_string().contains("permission denied"));
        assert!(err.to_string().contains("/docs/private"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = MdAggregateError::io("/tmp/out.md", source);
        match err {
            MdAggregateError::Io { path, .. } => assert_eq!(path, PathBuf::from("/tmp/out.md")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
