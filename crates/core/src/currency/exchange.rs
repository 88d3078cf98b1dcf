//! Exchange rate observations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrors};

/// One published rate for a currency on a given day.
///
/// `rate` is units of the target currency per one unit of the base currency.
/// It is kept at full precision; rounding happens during conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    currency_name: String,
    rate: Decimal,
    date_of_record: NaiveDate,
}

impl ExchangeRate {
    /// Validates against the current time and builds an observation.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in order: currency name, rate, date.
    pub fn new(
        currency_name: &str,
        rate: Decimal,
        date_of_record: NaiveDate,
    ) -> Result<Self, ValidationErrors> {
        Self::new_at(currency_name, rate, date_of_record, Utc::now())
    }

    /// Same as [`ExchangeRate::new`], judging "the future" relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in order: currency name, rate, date.
    pub fn new_at(
        currency_name: &str,
        rate: Decimal,
        date_of_record: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let currency_name = currency_name.trim();

        let mut errors = ValidationErrors::new();
        errors.push_opt(validate_currency_name(currency_name));
        errors.push_opt(validate_rate(rate));
        errors.push_opt(validate_date_of_record(date_of_record, now));
        errors.into_result()?;

        Ok(Self {
            currency_name: currency_name.to_string(),
            rate,
            date_of_record,
        })
    }

    /// Trimmed currency name, e.g. `Brazil-Real`.
    #[must_use]
    pub fn currency_name(&self) -> &str {
        &self.currency_name
    }

    /// Units of the target currency per unit of base currency.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Calendar day the rate was recorded.
    #[must_use]
    pub const fn date_of_record(&self) -> NaiveDate {
        self.date_of_record
    }

    /// Midnight UTC at the start of the date of record.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        midnight_utc(self.date_of_record)
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Currency name must not be blank.
#[must_use]
pub fn validate_currency_name(currency_name: &str) -> Option<ValidationError> {
    currency_name
        .trim()
        .is_empty()
        .then_some(ValidationError::CurrencyNameEmpty)
}

/// Rate must be strictly positive.
#[must_use]
pub fn validate_rate(rate: Decimal) -> Option<ValidationError> {
    (rate <= Decimal::ZERO).then_some(ValidationError::NonPositiveRate)
}

/// The start of the date of record must not be after `now`.
#[must_use]
pub fn validate_date_of_record(date: NaiveDate, now: DateTime<Utc>) -> Option<ValidationError> {
    (midnight_utc(date) > now).then_some(ValidationError::DateOfRecordInFuture)
}
