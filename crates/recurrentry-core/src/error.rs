use thiserror::Error;

/// Failures that abort a whole generation call.
///
/// An ordinal or `each` value that matches no day is not an error; the
/// occurrence is skipped instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid holiday set: {0}")]
    InvalidHolidaySet(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
}
