//! Monetary rounding with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Everything here operates on `rust_decimal::Decimal`, so a value such as
//! `0.005` is represented exactly and rounds the way a person expects.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for amounts and displayed rates.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a value to two decimal places, ties away from zero.
///
/// `0.005` becomes `0.01` and `-123.456` becomes `-123.46`. This is the
/// "round half up" rule applied symmetrically around zero, not banker's
/// rounding.
#[must_use]
pub fn round_to_two_decimal_places(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::normal_rounding(dec!(123.456), dec!(123.46))]
    #[case::round_down(dec!(123.454), dec!(123.45))]
    #[case::midpoint_up(dec!(123.455), dec!(123.46))]
    #[case::exact_two_decimals(dec!(123.45), dec!(123.45))]
    #[case::negative_rounding(dec!(-123.456), dec!(-123.46))]
    #[case::negative_midpoint(dec!(-0.005), dec!(-0.01))]
    #[case::boundary_rounding_up(dec!(0.005), dec!(0.01))]
    #[case::just_below_boundary(dec!(0.0049999), dec!(0.00))]
    #[case::integer(dec!(42), dec!(42))]
    fn test_round_to_two_decimal_places(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_to_two_decimal_places(input), expected);
    }

    #[test]
    fn test_not_bankers_rounding() {
        // Banker's rounding would give 0.02 for both.
        assert_eq!(round_to_two_decimal_places(dec!(0.025)), dec!(0.03));
        assert_eq!(round_to_two_decimal_places(dec!(0.015)), dec!(0.02));
    }

    /// Strategy to generate decimals with up to 6 fractional digits.
    fn any_amount() -> impl Strategy<Value = Decimal> {
        (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Rounding twice is the same as rounding once.
        #[test]
        fn prop_rounding_is_idempotent(value in any_amount()) {
            let once = round_to_two_decimal_places(value);
            prop_assert_eq!(round_to_two_decimal_places(once), once);
        }

        /// The result never has more than two fractional digits.
        #[test]
        fn prop_rounding_keeps_two_decimals(value in any_amount()) {
            let rounded = round_to_two_decimal_places(value);
            prop_assert!(rounded.scale() <= MONEY_SCALE);
        }

        /// Rounding moves a value by at most half a cent.
        #[test]
        fn prop_rounding_error_is_bounded(value in any_amount()) {
            let rounded = round_to_two_decimal_places(value);
            prop_assert!((rounded - value).abs() <= dec!(0.005));
        }
    }
}
