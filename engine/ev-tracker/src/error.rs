//! Error types for the EV tracker

use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can stop a tracker run.
///
/// Per-card pricing failures never show up here; they collapse to a zero price.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required column absent from a CSV header
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { column: String, file: String },

    /// Configuration that cannot be used
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl TrackerError {
    /// Create a new configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new missing column error
    pub fn missing_column(column: impl Into<String>, file: impl Into<String>) -> Self {
        Self::MissingColumn { column: column.into(), file: file.into() }
    }
}
