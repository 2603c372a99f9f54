//! Error types for sweep-output.

use thiserror::Error;

/// Errors that can occur when writing sweep results.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// The report refers to a room or responder the building does not have.
    #[error("report does not match the building: {0}")]
    Mismatch(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
