//! Error types.
//!
//! Constraint violations inside an allocation are never errors: they are
//! scored by the evaluator. Errors are reserved for bad input (data files,
//! configuration) and for output failures.

use thiserror::Error;

/// Main error type for the workload allocation crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    #[error("Statistics error: {0}")]
    Statistics(String),

    #[error("Plotting error: {0}")]
    Plot(String),
}

impl Error {
    pub(crate) fn invalid_data(message: impl Into<String>) -> Self {
        Error::InvalidData {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
