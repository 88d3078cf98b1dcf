//! Collaborator traits the reconciliation engine depends on.
//!
//! Implementations live elsewhere: the transaction store in
//! [`crate::storage`], the Treasury client in its own crate.

use async_trait::async_trait;
use purchasefx_shared::types::TransactionId;

use super::error::RateSourceError;
use crate::currency::ExchangeRate;
use crate::storage::StorageError;
use crate::transaction::Transaction;

/// Persists and retrieves transactions by identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Stores the transaction under its identifier.
    async fn save_transaction(&self, transaction: &Transaction) -> Result<(), StorageError>;

    /// Loads a transaction; a missing key is `StorageError::TransactionNotFound`.
    async fn find_transaction(&self, id: TransactionId) -> Result<Transaction, StorageError>;
}

/// Supplies the historical rate series of one currency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    /// Fetches every published rate for `currency_name`, in no particular order.
    async fn fetch_series(&self, currency_name: &str) -> Result<Vec<ExchangeRate>, RateSourceError>;
}
