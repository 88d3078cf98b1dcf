//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy:
//! - Round the amount and the rate to 2 decimal places first
//! - Multiply the rounded values
//! - Round the product to 2 decimal places
//!
//! Ties go away from zero at every step.

use purchasefx_shared::types::round_to_two_decimal_places;
use rust_decimal::Decimal;

/// Converts an amount using the given exchange rate.
///
/// Both inputs are rounded before multiplying, so the result may differ from
/// rounding the exact product (`100.004 * 5.4345` gives `543.00`, not
/// `543.47`).
///
/// Returns `None` when the product does not fit in a `Decimal`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    let amount = round_to_two_decimal_places(amount);
    let rate = round_to_two_decimal_places(rate);
    amount.checked_mul(rate).map(round_to_two_decimal_places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::sample_purchase(dec!(28.75), dec!(5.25), dec!(150.94))]
    #[case::rounded_inputs(dec!(100.004), dec!(5.4345), dec!(543.00))]
    #[case::whole_numbers(dec!(100), dec!(3), dec!(300))]
    #[case::small_rate(dec!(1000), dec!(0.005), dec!(10.00))]
    #[case::rate_rounds_to_zero(dec!(1000), dec!(0.004), dec!(0))]
    fn test_convert_amount(#[case] amount: Decimal, #[case] rate: Decimal, #[case] expected: Decimal) {
        assert_eq!(convert_amount(amount, rate), Some(expected));
    }

    #[test]
    fn test_overflowing_product_is_none() {
        assert_eq!(convert_amount(Decimal::MAX, dec!(5.25)), None);
        assert_eq!(convert_amount(dec!(20000000000000000000000000000), dec!(5.25)), None);
    }

    #[test]
    fn test_largest_amount_at_unit_rate_converts() {
        assert_eq!(convert_amount(Decimal::MAX, Decimal::ONE), Some(Decimal::MAX));
    }

    #[test]
    fn test_single_rounding_would_differ() {
        // Rounding only the product gives 543.47 here.
        assert_eq!(round_to_two_decimal_places(dec!(100.004) * dec!(5.4345)), dec!(543.47));
        assert_eq!(convert_amount(dec!(100.004), dec!(5.4345)), Some(dec!(543.00)));
    }

    #[test]
    fn test_product_midpoint_rounds_away_from_zero() {
        // 0.5 * 0.01 = 0.005 exactly
        assert_eq!(convert_amount(dec!(0.5), dec!(0.01)), Some(dec!(0.01)));
        assert_eq!(convert_amount(dec!(1.25), dec!(1.01)), Some(dec!(1.26)));
    }
}
