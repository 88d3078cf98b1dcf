//! Treasury response payloads and their conversion to domain rates.

use std::str::FromStr;

use chrono::NaiveDate;
use purchasefx_core::ExchangeRate;
use purchasefx_core::reconciliation::RateSourceError;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One page of the rates of exchange dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesPage {
    /// Records on this page.
    pub data: Vec<RateRecord>,
    /// Paging information; absent on some error-free responses.
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl RatesPage {
    /// Pages the full result spans, at least one.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.meta.as_ref().map_or(1, |meta| meta.total_pages.max(1))
    }
}

/// Paging information.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    /// Number of pages for the current filter and page size.
    #[serde(rename = "total-pages", default)]
    pub total_pages: u32,
}

/// A single published rate. Every field arrives as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct RateRecord {
    /// Currency name, e.g. `Real`.
    pub currency: String,
    /// Decimal rate, e.g. `5.033`.
    pub exchange_rate: String,
    /// Day of month the rate was recorded.
    pub record_calendar_day: String,
    /// Month the rate was recorded.
    pub record_calendar_month: String,
    /// Year the rate was recorded.
    pub record_calendar_year: String,
}

impl RateRecord {
    /// Parses and validates the record.
    ///
    /// # Errors
    ///
    /// `InvalidRecordDate` for unusable calendar fields, `InvalidRate` for a
    /// non-numeric rate, `InvalidRecord` when the domain rejects the values.
    pub fn to_exchange_rate(&self) -> Result<ExchangeRate, RateSourceError> {
        let date_of_record = parse_record_date(
            &self.record_calendar_day,
            &self.record_calendar_month,
            &self.record_calendar_year,
        )?;

        let raw_rate = self.exchange_rate.trim();
        let rate = Decimal::from_str(raw_rate)
            .map_err(|_| RateSourceError::InvalidRate(raw_rate.to_string()))?;

        Ok(ExchangeRate::new(&self.currency, rate, date_of_record)?)
    }
}

/// Builds a calendar date from the three string fields of a record.
///
/// # Errors
///
/// Returns `InvalidRecordDate` naming the offending field.
pub fn parse_record_date(day: &str, month: &str, year: &str) -> Result<NaiveDate, RateSourceError> {
    let (day, month, year) = (day.trim(), month.trim(), year.trim());
    if day.is_empty() || month.is_empty() || year.is_empty() {
        return Err(invalid_date("day, month, and year must not be empty"));
    }

    let day: u32 = day
        .parse()
        .ok()
        .filter(|d| (1..=31).contains(d))
        .ok_or_else(|| invalid_date(format!("invalid day '{day}'")))?;
    let month: u32 = month
        .parse()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| invalid_date(format!("invalid month '{month}'")))?;
    let year: i32 = year
        .parse()
        .map_err(|_| invalid_date(format!("invalid year '{year}'")))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid_date(format!("{year:04}-{month:02}-{day:02} is not a calendar date")))
}

fn invalid_date(reason: impl Into<String>) -> RateSourceError {
    RateSourceError::InvalidRecordDate(reason.into())
}
