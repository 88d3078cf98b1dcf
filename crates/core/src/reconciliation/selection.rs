//! Picks the rate that applies to a purchase.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use super::error::ReconciliationError;
use super::service::Conversion;
use crate::currency::{ExchangeRate, convert_amount};
use crate::transaction::Transaction;

/// Width of the look-back window, in calendar months.
pub const WINDOW_MONTHS: u32 = 6;

/// Earliest instant a rate may be recorded at and still apply.
///
/// The month moves back and the day of month is kept; a day the target month
/// lacks spills into the next month, so 2024-08-31 gives 2024-03-02. The time
/// of day is unchanged.
#[must_use]
pub fn window_floor(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if timestamp.month() > WINDOW_MONTHS {
        (timestamp.year(), timestamp.month() - WINDOW_MONTHS)
    } else {
        (timestamp.year() - 1, timestamp.month() + 12 - WINDOW_MONTHS)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(timestamp.day0()))))
        .map_or(DateTime::<Utc>::MIN_UTC, |day| day.and_time(timestamp.time()).and_utc())
}

/// Selects the applicable rate from an unordered series.
///
/// Rates recorded before the window floor are ignored. The first surviving
/// candidate is taken; a later one replaces it only when it was recorded
/// after the purchase and earlier than the current pick. The outcome
/// therefore depends on input order when no candidate is after the purchase.
#[must_use]
pub fn select_applicable_rate<'a>(
    transaction: &Transaction,
    rates: &'a [ExchangeRate],
) -> Option<&'a ExchangeRate> {
    let floor = window_floor(transaction.timestamp());
    let mut best: Option<&ExchangeRate> = None;

    for candidate in rates {
        if candidate.recorded_at() < floor {
            continue;
        }

        best = match best {
            None => Some(candidate),
            Some(current)
                if candidate.recorded_at() > transaction.timestamp()
                    && candidate.date_of_record() < current.date_of_record() =>
            {
                Some(candidate)
            }
            keep => keep,
        };
    }

    best
}

/// Selects a rate and converts the transaction amount with it.
///
/// # Errors
///
/// Returns `NoApplicableRate` when nothing falls inside the window, and
/// `ConversionOverflow` when the converted amount is not representable.
pub fn reconcile(
    transaction: Transaction,
    rates: &[ExchangeRate],
    currency_name: &str,
) -> Result<Conversion, ReconciliationError> {
    let Some(rate) = select_applicable_rate(&transaction, rates) else {
        return Err(ReconciliationError::NoApplicableRate {
            transaction_id: transaction.id(),
            currency: currency_name.to_string(),
        });
    };

    let Some(converted_amount) = convert_amount(transaction.amount(), rate.rate()) else {
        return Err(ReconciliationError::ConversionOverflow {
            transaction_id: transaction.id(),
            currency: currency_name.to_string(),
        });
    };
    Ok(Conversion {
        exchange_rate: rate.clone(),
        converted_amount,
        transaction,
    })
}
