//! Error types and handling infrastructure for tintlog.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for process-level reporting.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should name the file or stream involved
//! - **Context preservation**: Underlying I/O errors stay reachable through `source()`
//! - **Non-fatal by default**: Only input-open and argument errors end the process

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tintlog operations.
#[derive(Error, Debug)]
pub enum TintlogError {
    /// The rules configuration file could not be read
    #[error("Cannot read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested input file could not be opened
    #[error("Cannot open input file {path}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the input stream failed before end-of-input
    #[error("Failed to read input")]
    InputRead {
        #[source]
        source: std::io::Error,
    },

    /// Writing the rendered frame to the terminal failed
    #[error("Failed to draw output: {message}")]
    Output {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for tintlog operations.
pub type Result<T> = std::result::Result<T, TintlogError>;

impl TintlogError {
    /// Create a ConfigRead error for the given path
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create an InputOpen error for the given path
    pub fn input_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an Output error with a descriptive message
    pub fn output(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Output {
            message: message.into(),
            source,
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/test/config.txt");

        let config_err = TintlogError::config_read(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(
            config_err.to_string(),
            "Cannot read config file /test/config.txt"
        );

        let input_err = TintlogError::input_open(
            "/var/log/app.log",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            input_err.to_string(),
            "Cannot open input file /var/log/app.log"
        );

        let arg_err = TintlogError::invalid_argument("interval must be greater than zero");
        assert_eq!(
            arg_err.to_string(),
            "Invalid argument: interval must be greater than zero"
        );
    }

    #[test]
    fn test_output_error_names_the_failed_step() {
        let err = TintlogError::output(
            "writing frame to terminal",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to draw output: writing frame to terminal"
        );
        assert_eq!(err.source().map(|s| s.to_string()), Some("pipe closed".to_string()));
    }

    #[test]
    fn test_source_is_preserved() {
        let err = TintlogError::InputRead {
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        };
        let source = err.source().expect("input read carries its io error");
        assert_eq!(source.to_string(), "disk on fire");
    }
}
