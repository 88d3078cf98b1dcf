//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::TransactionId;
pub use money::{MONEY_SCALE, round_to_two_decimal_places};
