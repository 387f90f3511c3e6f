//! # brpost Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout brpost. Command-level
//! failures (bad configuration, invalid arguments) travel as `anyhow::Error`
//! wrapping a `BrpostError`, so callers can add context with `.context(...)`
//! and still downcast to a specific variant when needed.
//!
//! Per-file compression problems are **not** errors at this level: the
//! compression driver reports them as `CompressOutcome` values so that a
//! single unreadable file never fails the whole post-build step.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.is_absolute() {
//!     anyhow::bail!(BrpostError::Config(format!("Path is not absolute: {}", path.display())));
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for brpost.
#[derive(Error, Debug)]
pub enum BrpostError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Compression of '{}' failed: {source}", .path.display())]
    Compression {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = BrpostError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let compression_err = BrpostError::Compression {
            path: PathBuf::from("/dist/app.js"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(
            compression_err.to_string(),
            "Compression of '/dist/app.js' failed: disk full"
        );
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = BrpostError::FileSystem("not a directory".into()).into();
        assert!(err
            .downcast_ref::<BrpostError>()
            .is_some_and(|e| matches!(e, BrpostError::FileSystem(_))));
    }
}
