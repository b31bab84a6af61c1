//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// The environment file could not be loaded.
    #[error("Cannot load environment {path}: {message}")]
    Environment {
        /// Path of the environment file
        path: String,
        /// Underlying failure
        message: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
