//! Monetary helpers.
//!
//! All amounts are [`Decimal`] values carrying two fractional digits once
//! they have passed through [`validate_amount`]. Rounding is half away from
//! zero, which for the non-negative amounts the engine accepts is the
//! familiar "round half up".

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Number of fractional digits kept on every monetary value.
pub const CENTS_SCALE: u32 = 2;

/// Rounds a value to cents, half away from zero.
///
/// # Example
///
/// ```
/// use quebec_tax_engine::models::money::round_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_cents(Decimal::from_str("9.975").unwrap()).to_string(), "9.98");
/// assert_eq!(round_cents(Decimal::from_str("9.974").unwrap()).to_string(), "9.97");
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENTS_SCALE);
    rounded
}

/// Largest amount, in dollars, accepted at the engine boundary.
///
/// Annualizing a weekly pay at this ceiling and summing its deductions
/// stays far inside the range of [`Decimal`].
pub const MAX_AMOUNT_DOLLARS: i64 = 1_000_000_000_000;

/// Validates a monetary input and normalizes it to cents.
///
/// Negative amounts and amounts above [`MAX_AMOUNT_DOLLARS`] are rejected
/// with [`EngineError::InvalidAmount`].
pub fn validate_amount(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::invalid_amount(field, value));
    }
    if value > Decimal::from(MAX_AMOUNT_DOLLARS) {
        return Err(EngineError::invalid_amount(field, value));
    }
    Ok(round_cents(value))
}

/// Converts a binary float coming from an untyped caller into a validated
/// amount.
///
/// NaN, infinities and negative values are rejected with
/// [`EngineError::InvalidAmount`].
///
/// # Example
///
/// ```
/// use quebec_tax_engine::models::money::from_f64;
///
/// assert_eq!(from_f64("subtotal", 100.0).unwrap().to_string(), "100.00");
/// assert!(from_f64("subtotal", f64::NAN).is_err());
/// assert!(from_f64("subtotal", f64::INFINITY).is_err());
/// ```
pub fn from_f64(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::invalid_amount(field, value));
    }
    let decimal =
        Decimal::try_from(value).map_err(|_| EngineError::invalid_amount(field, value))?;
    validate_amount(field, decimal)
}
