//! Error types for the tamis library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline operations.
///
/// Malformed field values never appear here: the coercers degrade them to
/// absent values. Only missing external resources and boundary violations
/// are fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An expected source column is missing from the extract.
    #[error("Schema mismatch: missing column '{column}'")]
    SchemaMismatch { column: String },

    /// Error from the storage layer.
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
