//! Construction-time validation failures.
//!
//! Entities validate every rule before they exist and report all failures at
//! once, in a fixed order, so a caller can fix everything in one round trip.

use thiserror::Error;

/// A single rule an entity input broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Transaction description is blank after trimming.
    #[error("transaction description is required; it cannot be empty")]
    DescriptionEmpty,

    /// Transaction description is longer than allowed.
    #[error("transaction description must not exceed {max} characters")]
    DescriptionTooLong {
        /// Maximum number of characters.
        max: usize,
    },

    /// Transaction amount is zero or negative.
    #[error("transaction amount must be a positive value")]
    NonPositiveAmount,

    /// Transaction timestamp lies after the moment of validation.
    #[error("transaction timestamp cannot be in the future")]
    TimestampInFuture,

    /// Exchange rate currency name is blank after trimming.
    #[error("currency name is required; it cannot be empty")]
    CurrencyNameEmpty,

    /// Exchange rate is zero or negative.
    #[error("exchange rate is invalid; it must be greater than 0")]
    NonPositiveRate,

    /// Exchange rate date of record lies after the moment of validation.
    #[error("date of record is invalid; it cannot be in the future")]
    DateOfRecordInFuture,
}

/// Ordered list of validation failures.
///
/// Never empty when returned as an error from a constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a failure, keeping insertion order.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Appends the failure if there is one.
    pub fn push_opt(&mut self, error: Option<ValidationError>) {
        if let Some(error) = error {
            self.0.push(error);
        }
    }

    /// Returns true when no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failures in the order they were detected.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    /// Human-readable message per failure, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Converts into `Err(self)` when anything failed.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}
