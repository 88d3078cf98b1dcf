//! Client for the U.S. Treasury "Reporting Rates of Exchange" dataset.
//!
//! [`TreasuryClient`] implements the core
//! [`ExchangeRateSource`](purchasefx_core::reconciliation::ports::ExchangeRateSource)
//! port: it fetches every page of a currency's published rates and turns each
//! record into a validated [`ExchangeRate`](purchasefx_core::ExchangeRate).

mod client;
mod records;
mod retry;

pub use client::TreasuryClient;
pub use records::{PageMeta, RateRecord, RatesPage, parse_record_date};
pub use retry::RetryPolicy;
