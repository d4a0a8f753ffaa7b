//! Error handling for CSV to JSON conversion.
//!
//! Every failure in the pipeline is fatal; these variants only carry
//! enough context (paths, the failing action) for a useful message.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse CSV file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("Filesystem error while {action} {path}")]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Inconsistent table: column '{column}' has {found} cells, expected {expected}")]
    InconsistentTable {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ConvertError {
    /// Create a filesystem error for the given action and path
    pub fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
