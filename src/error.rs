//! Error handling for DorkScript.
//!
//! Every failure the tool can hit maps to one of these variants so the
//! binary can surface a single message on stderr and a nonzero exit code.
//! Parse and configuration errors are raised before any browser is opened;
//! a script that fails to parse produces no side effects at all.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for DorkScript
#[derive(Error, Debug)]
pub enum DorkError {
    /// IO errors (stdout/output-file writes)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A script file is missing or unreadable
    #[error("cannot read {}: {}", .path.display(), .source)]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed directive or undefined variable reference in a script
    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Unknown engine identifier (from `@engine` or `--engine`)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for DorkScript operations
pub type Result<T> = std::result::Result<T, DorkError>;

// Convenient error constructors
impl DorkError {
    /// Create a file error
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error with a source position
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = DorkError::parse("recon.dork", 7, "undefined variable 'TARGET'");
        assert_eq!(err.to_string(), "recon.dork:7: undefined variable 'TARGET'");
    }

    #[test]
    fn test_config_error_display() {
        let err = DorkError::config("unknown engine 'askjeeves'");
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown engine 'askjeeves'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DorkError = io_err.into();
        assert!(matches!(err, DorkError::Io(_)));
    }
}
