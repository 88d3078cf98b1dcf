//! Historical rate selection and purchase conversion.
//!
//! The engine owns no state: it reads a transaction through
//! [`ports::TransactionRepository`], the rate series through
//! [`ports::ExchangeRateSource`], and picks one rate per request.

mod error;
pub mod ports;
mod selection;
mod service;

#[cfg(test)]
mod selection_props;

pub use error::{RateSourceError, ReconciliationError};
pub use selection::{WINDOW_MONTHS, reconcile, select_applicable_rate, window_floor};
pub use service::{Conversion, ReconciliationService};
