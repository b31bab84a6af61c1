//! Error types for collaborator lookups.

use thiserror::Error;

/// A specialized Result type for source lookups.
pub type SourceResult<T> = Result<T, SourceError>;

/// Common error type for source operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// Requested item does not exist in the source.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up (security, convention, holiday, ...).
        kind: String,
        /// The identifier that was not found.
        id: String,
    },

    /// The request itself is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A stored document could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),
}

impl SourceError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    /// Creates an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// True if the lookup failed only because the item is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::IoError(e.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::ParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        let err = SourceError::not_found("security", "BLOOMBERG_TICKER~EUR003M Index");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "security not found: BLOOMBERG_TICKER~EUR003M Index"
        );
        assert!(!SourceError::invalid_input("empty bundle").is_not_found());
    }
}
