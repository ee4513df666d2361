//! Error types for mobility-index operations.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A coordinate field is missing or not numeric
    #[error("Invalid input at row {row}, column '{column}': {reason}")]
    InvalidInput {
        row: usize,
        column: String,
        reason: String,
    },

    /// An operation that needs at least one geometry got none
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A geometry is missing or of the wrong kind
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Joined output would drop or duplicate a column
    #[error("Column conflict: {0}")]
    ColumnConflict(String),

    #[error("Invalid CRS identifier: {0}")]
    InvalidCrs(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

/// Result type alias for mobility-index operations
pub type Result<T> = std::result::Result<T, Error>;
