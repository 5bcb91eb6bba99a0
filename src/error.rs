//! Error types and handling infrastructure for postdeck.
//!
//! Library code returns [`PostdeckError`] through the crate-wide [`Result`] alias;
//! the binary wraps everything in `anyhow` for context at the top level.
//!
//! Only the initial post load can fail in normal operation. Filtering, pagination,
//! rendering and theme toggling are total over in-memory state, so most variants
//! here describe the surrounding plumbing (terminal, configuration, preferences).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for postdeck operations.
#[derive(Error, Debug)]
pub enum PostdeckError {
    /// The post collection could not be read or decoded
    #[error("Failed to load posts from {source_name}: {message}")]
    LoadFailure {
        source_name: String,
        message: String,
    },

    /// Post data was read but is not valid post JSON
    #[error("Invalid post data: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Reading or writing the persisted theme preference failed
    #[error("Preference store error: {message}")]
    Preference { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for postdeck operations.
pub type Result<T> = std::result::Result<T, PostdeckError>;

impl PostdeckError {
    /// Create a LoadFailure naming the source that failed
    pub fn load_failure(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LoadFailure {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a Preference error with a descriptive message
    pub fn preference(message: impl Into<String>) -> Self {
        Self::Preference {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True for errors that mean the post collection is unavailable
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::LoadFailure { .. } | Self::Parse { .. } | Self::FileNotFound { .. }
        )
    }
}

impl From<std::io::Error> for PostdeckError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
