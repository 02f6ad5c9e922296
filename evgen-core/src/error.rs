//! Typed error handling for evgen.
//!
//! Only two things can stop a generation run: an input header that cannot
//! be read, or a configuration that cannot be loaded. Everything else
//! (unmatched lines, blacklisted names, unparsable values) is silently
//! dropped by the pipeline and never surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for evgen operations.
#[derive(Error, Debug)]
pub enum EvgenError {
    /// Input file could not be opened or read mid-scan
    #[error("Cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The definition pattern failed to compile
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Output serialization failed
    #[error("Render error: {message}")]
    Render { message: String },
}

impl EvgenError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: err,
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a pattern compilation error.
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern {
            message: message.into(),
        }
    }

    /// Create a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for evgen results.
pub type EvgenResult<T> = Result<T, EvgenError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> EvgenResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> EvgenResult<T> {
        self.map_err(|e| EvgenError::io(path, e))
    }
}
