//! Pricing
//!
//! Amounts are [`Decimal`]s. Unit prices may carry up to four decimal places;
//! every extended amount (`price × quantity`) is rounded to the currency's minor
//! unit with round-half-even before it is summed, so a cart total and the
//! subtotal of the order it becomes always agree to the cent.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places of the currency's minor unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Most decimal places a unit price may carry.
pub const MAX_PRICE_SCALE: u32 = 4;

/// Rounding applied when an amount is brought to the minor unit.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price cannot be negative")]
    Negative,

    #[error("price cannot have more than {MAX_PRICE_SCALE} decimal places")]
    TooPrecise,

    #[error("amount is too large")]
    Overflow,
}

/// Check a unit price is usable and strip insignificant trailing zeros.
///
/// # Errors
///
/// Returns an error when the price is negative or finer than [`MAX_PRICE_SCALE`].
pub fn validate_price(price: Decimal) -> Result<Decimal, PriceError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(PriceError::Negative);
    }

    let normalized = price.normalize();

    if normalized.scale() > MAX_PRICE_SCALE {
        return Err(PriceError::TooPrecise);
    }

    Ok(normalized)
}

/// Round an amount to the minor unit, always rendering two decimal places.
#[must_use]
pub fn round_to_minor_unit(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MINOR_UNIT_SCALE, ROUNDING);

    rounded.rescale(MINOR_UNIT_SCALE);

    rounded
}

/// Extended amount for a line: `price × quantity`, rounded to the minor unit.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if the product does not fit in a [`Decimal`].
pub fn line_total(price: Decimal, quantity: u32) -> Result<Decimal, PriceError> {
    price
        .checked_mul(Decimal::from(quantity))
        .map(round_to_minor_unit)
        .ok_or(PriceError::Overflow)
}

/// Sum already-rounded line totals.
///
/// # Errors
///
/// Returns [`PriceError::Overflow`] if the sum does not fit in a [`Decimal`].
pub fn sum_totals<I>(totals: I) -> Result<Decimal, PriceError>
where
    I: IntoIterator<Item = Decimal>,
{
    totals
        .into_iter()
        .try_fold(round_to_minor_unit(Decimal::ZERO), |acc, total| {
            acc.checked_add(total)
        })
        .map(round_to_minor_unit)
        .ok_or(PriceError::Overflow)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn half_cents_round_to_even() -> TestResult {
        assert_eq!(line_total(dec!(0.125), 1)?, dec!(0.12));
        assert_eq!(line_total(dec!(0.135), 1)?, dec!(0.14));
        assert_eq!(line_total(dec!(0.0025), 5)?, dec!(0.01));
        assert_eq!(line_total(dec!(0.0025), 3)?, dec!(0.01));

        Ok(())
    }

    #[test]
    fn line_totals_render_two_places() -> TestResult {
        assert_eq!(line_total(dec!(3), 2)?.to_string(), "6.00");
        assert_eq!(line_total(dec!(19.99), 3)?.to_string(), "59.97");

        Ok(())
    }

    #[test]
    fn repeated_additions_do_not_drift() -> TestResult {
        let totals = std::iter::repeat_n(dec!(0.10), 1_000);

        assert_eq!(sum_totals(totals)?, dec!(100.00));

        Ok(())
    }

    #[test]
    fn empty_sum_is_zero() -> TestResult {
        let total = sum_totals(std::iter::empty())?;

        assert_eq!(total, Decimal::ZERO);
        assert_eq!(total.to_string(), "0.00");

        Ok(())
    }

    #[test]
    fn validate_price_rejects_negative_and_over_precise() {
        assert_eq!(validate_price(dec!(-0.01)), Err(PriceError::Negative));
        assert_eq!(validate_price(dec!(1.00001)), Err(PriceError::TooPrecise));
    }

    #[test]
    fn validate_price_accepts_zero_and_strips_trailing_zeros() -> TestResult {
        assert_eq!(validate_price(Decimal::ZERO)?, Decimal::ZERO);
        assert_eq!(validate_price(dec!(12.5000))?.to_string(), "12.5");

        Ok(())
    }

    #[test]
    fn overflowing_line_total_is_an_error() {
        assert_eq!(line_total(Decimal::MAX, 2), Err(PriceError::Overflow));
    }
}
