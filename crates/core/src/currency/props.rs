//! Property-based tests for conversion arithmetic.

use proptest::prelude::*;
use purchasefx_shared::types::{MONEY_SCALE, round_to_two_decimal_places};
use rust_decimal::Decimal;

use super::conversion::convert_amount;

/// Strategy to generate positive decimal amounts (0.001 to 1,000,000.000).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|v| Decimal::new(v, 3))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The converted amount never carries more than two decimal places.
    #[test]
    fn prop_convert_rounds_to_two_decimals(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let converted = convert_amount(amount, rate);
        prop_assert!(converted.is_some_and(|value| value.scale() <= MONEY_SCALE));
    }

    /// Conversion only ever sees the inputs at two decimal places.
    #[test]
    fn prop_convert_depends_on_rounded_inputs(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let direct = convert_amount(amount, rate);
        let pre_rounded = convert_amount(
            round_to_two_decimal_places(amount),
            round_to_two_decimal_places(rate),
        );
        prop_assert_eq!(direct, pre_rounded);
    }

    /// A rate of one returns the rounded amount unchanged.
    #[test]
    fn prop_unit_rate_is_identity(amount in positive_amount()) {
        prop_assert_eq!(convert_amount(amount, Decimal::ONE), Some(round_to_two_decimal_places(amount)));
    }

    /// Converting a larger amount at the same rate never yields less.
    #[test]
    fn prop_convert_is_monotonic_in_amount(
        amount in positive_amount(),
        extra in positive_amount(),
        rate in positive_rate(),
    ) {
        prop_assert!(convert_amount(amount + extra, rate) >= convert_amount(amount, rate));
    }
}
