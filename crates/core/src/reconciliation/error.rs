//! Reconciliation error types.

use purchasefx_shared::types::TransactionId;
use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Failures of the external exchange rate collaborator.
#[derive(Debug, Error)]
pub enum RateSourceError {
    /// Transport failed on every attempt.
    #[error("network issue while fetching exchange rate data: {0}")]
    Network(String),

    /// Upstream answered with a non-success status.
    #[error("exchange rate service responded with status {0}")]
    UnexpectedStatus(u16),

    /// Upstream payload could not be decoded.
    #[error("error decoding exchange rate response: {0}")]
    Decoding(String),

    /// Upstream returned no records for the currency.
    #[error("no exchange rate found for currency '{0}'")]
    NoRatesFound(String),

    /// A record carried a rate that is not a decimal number.
    #[error("invalid exchange rate value '{0}'")]
    InvalidRate(String),

    /// A record carried calendar fields that do not form a date.
    #[error("invalid date of record: {0}")]
    InvalidRecordDate(String),

    /// A record parsed but failed domain validation.
    #[error("exchange rate record rejected: {0}")]
    InvalidRecord(#[from] ValidationErrors),
}

/// Reconciliation errors.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// No transaction stored under the identifier.
    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),

    /// No rate of the series falls inside the six month window.
    #[error("no exchange rate for '{currency}' within 6 months of transaction {transaction_id}")]
    NoApplicableRate {
        /// Transaction that could not be converted.
        transaction_id: TransactionId,
        /// Requested currency name.
        currency: String,
    },

    /// The converted amount does not fit in a decimal.
    #[error("converting transaction {transaction_id} to '{currency}' overflows")]
    ConversionOverflow {
        /// Transaction that could not be converted.
        transaction_id: TransactionId,
        /// Requested currency name.
        currency: String,
    },

    /// Storage collaborator failed.
    #[error(transparent)]
    Storage(StorageError),

    /// Exchange rate collaborator failed.
    #[error(transparent)]
    RateSource(#[from] RateSourceError),
}

impl From<StorageError> for ReconciliationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TransactionNotFound(id) => Self::TransactionNotFound(id),
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_not_found_becomes_transaction_not_found() {
        let id = TransactionId::new();
        let err = ReconciliationError::from(StorageError::TransactionNotFound(id));
        assert!(matches!(err, ReconciliationError::TransactionNotFound(found) if found == id));
    }

    #[test]
    fn test_other_storage_errors_stay_storage() {
        let err = ReconciliationError::from(StorageError::operation("disk full"));
        assert!(matches!(err, ReconciliationError::Storage(_)));
        assert_eq!(err.to_string(), "storage operation failed: disk full");
    }

    #[test]
    fn test_conversion_overflow_message() {
        let id = TransactionId::new();
        let err = ReconciliationError::ConversionOverflow {
            transaction_id: id,
            currency: "Brazil-Real".into(),
        };
        assert_eq!(err.to_string(), format!("converting transaction {id} to 'Brazil-Real' overflows"));
    }

    #[test]
    fn test_rate_source_error_messages() {
        assert_eq!(
            RateSourceError::UnexpectedStatus(503).to_string(),
            "exchange rate service responded with status 503"
        );
        assert_eq!(
            RateSourceError::NoRatesFound("Brazil-Real".into()).to_string(),
            "no exchange rate found for currency 'Brazil-Real'"
        );
    }
}
