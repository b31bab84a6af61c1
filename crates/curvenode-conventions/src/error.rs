//! Error types for convention and calendar resolution.

use thiserror::Error;

use curvenode_traits::SourceError;

/// A specialized Result type for convention resolution.
pub type ConventionResult<T> = Result<T, ConventionError>;

/// The error type for convention and calendar resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConventionError {
    /// No convention could be found on any resolution path.
    #[error("convention '{reference}' not found (tried {})", .attempted.join(", "))]
    NotFound {
        /// The reference held by the node or composite convention.
        reference: String,
        /// Every identifier looked up, in order.
        attempted: Vec<String>,
    },

    /// A convention was found but is not of the requested variant.
    #[error("convention '{id}' is a {actual} convention, expected {expected}")]
    TypeMismatch {
        /// The convention identifier.
        id: String,
        /// The expected variant.
        expected: String,
        /// The variant actually found.
        actual: String,
    },

    /// A calendar, region or holiday set could not be resolved.
    #[error("calendar '{id}' not found: {reason}")]
    CalendarNotFound {
        /// The region or holiday identifier.
        id: String,
        /// Underlying failure.
        reason: String,
    },

    /// A collaborator failed for a reason other than a missing item.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ConventionError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(reference: impl ToString, attempted: Vec<String>) -> Self {
        Self::NotFound {
            reference: reference.to_string(),
            attempted,
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(
        id: impl ToString,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            id: id.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True if the failure means something referenced does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::CalendarNotFound { .. } => true,
            Self::Source(e) => e.is_not_found(),
            Self::TypeMismatch { .. } => false,
        }
    }
}
