//! Property-based tests for rate selection.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::selection::{select_applicable_rate, window_floor};
use crate::currency::ExchangeRate;
use crate::transaction::Transaction;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

fn purchase_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Strategy to generate record dates from about a year before to half a year
/// after the purchase.
fn record_dates() -> impl Strategy<Value = Vec<NaiveDate>> {
    prop::collection::vec(-365i64..180, 0..20).prop_map(|offsets| {
        offsets
            .into_iter()
            .map(|days| (purchase_at() + Duration::days(days)).date_naive())
            .collect()
    })
}

fn series(dates: &[NaiveDate]) -> Vec<ExchangeRate> {
    dates
        .iter()
        .map(|date| ExchangeRate::new_at("Canada-Dollar", Decimal::ONE, *date, now()).unwrap())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The selected rate is never recorded before the window floor.
    #[test]
    fn prop_selected_rate_inside_window(dates in record_dates()) {
        let tx = Transaction::new_at("Window", purchase_at(), Decimal::TEN, now()).unwrap();
        let rates = series(&dates);

        if let Some(chosen) = select_applicable_rate(&tx, &rates) {
            prop_assert!(chosen.recorded_at() >= window_floor(tx.timestamp()));
        }
    }

    /// Something is selected exactly when some rate is inside the window.
    #[test]
    fn prop_selection_exists_iff_window_non_empty(dates in record_dates()) {
        let tx = Transaction::new_at("Window", purchase_at(), Decimal::TEN, now()).unwrap();
        let rates = series(&dates);
        let floor = window_floor(tx.timestamp());

        let any_inside = rates.iter().any(|r| r.recorded_at() >= floor);
        prop_assert_eq!(select_applicable_rate(&tx, &rates).is_some(), any_inside);
    }
}
