use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all construction-time errors into a single enum.
///
/// The query path never produces these: `answer` reports empty, out-of-scope, and
/// no-match conditions as ordinary returned strings. An `AppError` means the
/// knowledge base could not be loaded or does not satisfy its shape contract.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors while reading a knowledge file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents a knowledge file that is not valid JSON for the expected shape.
    #[error("Knowledge parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Represents data validation errors (e.g. a list shorter than the response
    /// templates require).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g. a missing knowledge file path).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
