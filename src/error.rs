//! Error types for the mountaincar crate

use thiserror::Error;

/// Main error type for the mountaincar crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("boundary sequence for {axis} is empty")]
    EmptyBoundaries { axis: &'static str },

    #[error("boundary sequence for {axis} is not strictly increasing at index {index}")]
    UnsortedBoundaries { axis: &'static str, index: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
