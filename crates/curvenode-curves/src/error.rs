//! Error types for curve node conversion and curve assembly.

use thiserror::Error;

use curvenode_conventions::ConventionError;
use curvenode_core::CoreError;
use curvenode_traits::SourceError;

/// A specialized Result type for curve node operations.
pub type CurveNodeResult<T> = Result<T, CurveNodeError>;

/// The error type for curve node operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveNodeError {
    /// A referenced item (mapper, definition, security, date set, ...) is missing.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up.
        kind: String,
        /// The unresolved identifier.
        id: String,
    },

    /// An id mapper has no provider for a node kind or tenor.
    #[error("{reason}")]
    MissingMapping {
        /// Name of the id mapper.
        mapper: String,
        /// Description naming the missing kind or tenor.
        reason: String,
    },

    /// A required quote is absent from the market data snapshot.
    #[error("could not get market data for {id}")]
    MissingMarketData {
        /// The market data identifier.
        id: String,
    },

    /// The dispatcher has no handler registered for a node variant.
    #[error("{dispatcher} has no handler for node type {node_type}")]
    UnsupportedNodeType {
        /// Name of the dispatcher.
        dispatcher: String,
        /// The node variant.
        node_type: String,
    },

    /// A resolved convention or security is not of the variant the node needs.
    #[error("'{id}' is a {actual}, expected {expected}")]
    ConventionTypeMismatch {
        /// The convention or security identifier.
        id: String,
        /// The expected variant.
        expected: String,
        /// The variant found.
        actual: String,
    },

    /// Inputs that cannot produce a well-formed instrument.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem.
        reason: String,
    },

    /// Convention or calendar resolution failed.
    #[error(transparent)]
    Convention(#[from] ConventionError),

    /// A collaborator lookup failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Date or tenor arithmetic failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveNodeError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    /// Creates a missing id mapping error.
    #[must_use]
    pub fn missing_mapping(mapper: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingMapping {
            mapper: mapper.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing market data error.
    #[must_use]
    pub fn missing_market_data(id: impl ToString) -> Self {
        Self::MissingMarketData { id: id.to_string() }
    }

    /// Creates an unsupported node type error.
    #[must_use]
    pub fn unsupported_node_type(dispatcher: impl Into<String>, node_type: impl ToString) -> Self {
        Self::UnsupportedNodeType {
            dispatcher: dispatcher.into(),
            node_type: node_type.to_string(),
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(
        id: impl ToString,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ConventionTypeMismatch {
            id: id.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True if the failure means something referenced does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::MissingMapping { .. } => true,
            Self::Convention(e) => e.is_not_found(),
            Self::Source(e) => e.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_identifiers() {
        let err = CurveNodeError::missing_market_data("OG_SYNTHETIC_TICKER~EUR_CASH_3M");
        assert_eq!(
            err.to_string(),
            "could not get market data for OG_SYNTHETIC_TICKER~EUR_CASH_3M"
        );
        let err = CurveNodeError::unsupported_node_type("NodeConverterDispatch", "FxSwapNode");
        assert!(err.to_string().contains("NodeConverterDispatch"));
        assert!(err.to_string().contains("FxSwapNode"));
    }

    #[test]
    fn test_not_found_through_wrappers() {
        let err: CurveNodeError =
            ConventionError::not_found("CONVENTION~X", vec!["convention CONVENTION~X".into()])
                .into();
        assert!(err.is_not_found());
        let err: CurveNodeError = SourceError::not_found("security", "ISIN~X").into();
        assert!(err.is_not_found());
        assert!(!CurveNodeError::invalid_input("negative tenor").is_not_found());
    }
}
