//! Core business logic for PurchaseFX.
//!
//! This crate holds the domain model and the reconciliation engine, with no
//! web dependencies. Collaborators are reached through the traits in
//! [`reconciliation::ports`].
//!
//! # Modules
//!
//! - `validation` - Accumulated construction-time validation failures
//! - `transaction` - The purchase transaction entity
//! - `currency` - Exchange rate observations and conversion arithmetic
//! - `reconciliation` - Rate selection and the conversion service
//! - `storage` - Key-value transaction store on Apache OpenDAL

pub mod currency;
pub mod reconciliation;
pub mod storage;
pub mod transaction;
pub mod validation;

pub use currency::{ExchangeRate, convert_amount};
pub use reconciliation::{Conversion, ReconciliationError, ReconciliationService};
pub use transaction::Transaction;
pub use validation::{ValidationError, ValidationErrors};
