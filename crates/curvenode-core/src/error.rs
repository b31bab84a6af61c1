//! Error types for core date, tenor and calendar operations.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A tenor string could not be parsed or is not usable here.
    #[error("Invalid tenor '{tenor}': {reason}")]
    InvalidTenor {
        /// The offending tenor text.
        tenor: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Unknown currency code.
    #[error("Unknown currency: {code}")]
    UnknownCurrency {
        /// The code that failed to parse.
        code: String,
    },

    /// Unknown day count name.
    #[error("Unknown day count convention: {name}")]
    UnknownDayCount {
        /// The name that failed to parse.
        name: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(tenor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            tenor: tenor.into(),
            reason: reason.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_tenor("3Q", "unknown unit 'Q'");
        assert_eq!(err.to_string(), "Invalid tenor '3Q': unknown unit 'Q'");

        let err = CoreError::invalid_date("2024-02-30");
        assert_eq!(err.to_string(), "Invalid date: 2024-02-30");
    }
}
