//! Error types for the typesift library.
//!
//! Classification, conversion and profiling never fail; a value that cannot
//! be typed degrades to `DataType::String` or a fallback `TypedValue`. The
//! variants here cover the edges that touch files, delimited input and
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for typesift operations.
#[derive(Debug, Error)]
pub enum TypesiftError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reading from a caller-supplied reader.
    #[error("Read error: {0}")]
    Read(#[source] std::io::Error),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty input or no columns to profile.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Incremental threshold that is not a non-negative integer.
    #[error("Invalid incremental threshold '{0}': expected a non-negative integer")]
    InvalidThreshold(String),

    /// Name that does not match any data type.
    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for typesift operations.
pub type Result<T> = std::result::Result<T, TypesiftError>;
