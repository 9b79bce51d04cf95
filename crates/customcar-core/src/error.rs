//! Error types for the customcar exporter.
//!
//! Only request and environment failures are errors. Specification entries
//! that do not resolve are dropped during building and never surface here,
//! and degenerate rim geometry in the unit converter yields zero instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the exporter library.
#[derive(Debug, Error)]
pub enum ExportError {
    // Request errors
    #[error("ModelName is required")]
    ModelNameRequired,

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid identifier: {value}")]
    InvalidIdentifier { value: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("XML write error: {message}")]
    Xml { message: String },
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, ExportError>;

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl ExportError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ExportError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Wrap a failure reported by the XML emitter.
    pub fn xml(err: impl std::fmt::Display) -> Self {
        ExportError::Xml {
            message: err.to_string(),
        }
    }

    /// True when the caller supplied bad input, as opposed to an
    /// environment failure such as an unwritable destination.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ExportError::ModelNameRequired
                | ExportError::Validation { .. }
                | ExportError::InvalidIdentifier { .. }
                | ExportError::Json { .. }
        )
    }
}
