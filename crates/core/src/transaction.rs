//! Purchase transaction entity.
//!
//! A `Transaction` is valid or does not exist: the constructor runs every
//! rule, and only a fully valid input yields an instance. Fields are private
//! so the stored values cannot drift after construction.

use chrono::{DateTime, TimeZone, Utc};
use purchasefx_shared::types::{TransactionId, round_to_two_decimal_places};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrors};

/// Maximum description length, counted in characters after trimming.
pub const MAX_DESCRIPTION_CHARS: usize = 50;

/// A purchase recorded in the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    description: String,
    timestamp: DateTime<Utc>,
    amount: Decimal,
}

impl Transaction {
    /// Validates the input against the current time and builds a transaction.
    ///
    /// The description is trimmed, the timestamp normalized to UTC and the
    /// amount rounded to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in order: description, amount, timestamp.
    pub fn new<Tz: TimeZone>(
        description: &str,
        timestamp: DateTime<Tz>,
        amount: Decimal,
    ) -> Result<Self, ValidationErrors> {
        Self::new_at(description, timestamp, amount, Utc::now())
    }

    /// Same as [`Transaction::new`], judging "the future" relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in order: description, amount, timestamp.
    pub fn new_at<Tz: TimeZone>(
        description: &str,
        timestamp: DateTime<Tz>,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let description = description.trim();
        let timestamp = timestamp.with_timezone(&Utc);

        validate_transaction(description, timestamp, amount, now).into_result()?;

        Ok(Self {
            id: TransactionId::new(),
            description: description.to_string(),
            timestamp,
            amount: round_to_two_decimal_places(amount),
        })
    }

    /// Unique identifier, assigned at construction.
    #[must_use]
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the purchase happened, in UTC.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Amount in the base currency, two decimal places.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Runs all transaction rules, accumulating failures instead of stopping at
/// the first one.
///
/// `description` is expected to be trimmed already.
#[must_use]
pub fn validate_transaction(
    description: &str,
    timestamp: DateTime<Utc>,
    amount: Decimal,
    now: DateTime<Utc>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push_opt(validate_description(description));
    errors.push_opt(validate_amount(amount));
    errors.push_opt(validate_timestamp(timestamp, now));
    errors
}

/// Checks emptiness first; the length rule only applies to a non-empty text.
#[must_use]
pub fn validate_description(description: &str) -> Option<ValidationError> {
    if description.is_empty() {
        return Some(ValidationError::DescriptionEmpty);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Some(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_CHARS,
        });
    }
    None
}

/// Amount must be strictly positive.
#[must_use]
pub fn validate_amount(amount: Decimal) -> Option<ValidationError> {
    (amount <= Decimal::ZERO).then_some(ValidationError::NonPositiveAmount)
}

/// Timestamp must not be after `now`.
#[must_use]
pub fn validate_timestamp(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Option<ValidationError> {
    (timestamp > now).then_some(ValidationError::TimestampInFuture)
}
