//! Exchange rate observations and conversion arithmetic.

pub mod conversion;
pub mod exchange;

#[cfg(test)]
mod props;

pub use conversion::convert_amount;
pub use exchange::ExchangeRate;
