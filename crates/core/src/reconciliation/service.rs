//! Reconciliation service.

use std::sync::Arc;

use purchasefx_shared::types::TransactionId;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::ReconciliationError;
use super::ports::{ExchangeRateSource, TransactionRepository};
use super::selection::reconcile;
use crate::currency::ExchangeRate;
use crate::storage::StorageError;
use crate::transaction::Transaction;

/// A transaction paired with the rate that applies to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The stored purchase.
    pub transaction: Transaction,
    /// Selected rate, at full precision.
    pub exchange_rate: ExchangeRate,
    /// `round2(round2(amount) * round2(rate))`.
    pub converted_amount: Decimal,
}

/// Stores purchases and converts them using historical rates.
pub struct ReconciliationService {
    repository: Arc<dyn TransactionRepository>,
    rates: Arc<dyn ExchangeRateSource>,
}

impl ReconciliationService {
    /// Creates a new reconciliation service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn TransactionRepository>,
        rates: Arc<dyn ExchangeRateSource>,
    ) -> Self {
        Self { repository, rates }
    }

    /// Persists a validated transaction.
    ///
    /// # Errors
    ///
    /// Returns the storage failure unchanged.
    pub async fn save_transaction(&self, transaction: &Transaction) -> Result<(), StorageError> {
        self.repository.save_transaction(transaction).await?;
        info!(transaction_id = %transaction.id(), "transaction saved");
        Ok(())
    }

    /// Loads the transaction, fetches the currency's series and converts.
    ///
    /// The rate source is only consulted once the transaction is known.
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotFound` for unknown ids, `NoApplicableRate` when
    /// the window is empty, and collaborator failures otherwise.
    pub async fn find_applicable_rate(
        &self,
        id: TransactionId,
        currency_name: &str,
    ) -> Result<Conversion, ReconciliationError> {
        let transaction = self.repository.find_transaction(id).await?;

        debug!(transaction_id = %id, currency = %currency_name, "fetching exchange rate series");
        let rates = self.rates.fetch_series(currency_name).await?;

        let conversion = reconcile(transaction, &rates, currency_name).inspect_err(|_| {
            warn!(
                transaction_id = %id,
                currency = %currency_name,
                candidates = rates.len(),
                "no exchange rate within window"
            );
        })?;

        info!(
            transaction_id = %id,
            currency = %currency_name,
            rate_date = %conversion.exchange_rate.date_of_record(),
            "transaction converted"
        );
        Ok(conversion)
    }
}
