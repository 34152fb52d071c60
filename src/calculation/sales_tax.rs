//! Sales tax calculation.
//!
//! GST and QST are each applied to the same pre-tax subtotal. QST is not
//! computed on a GST-inclusive base.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::money::{round_cents, validate_amount};
use crate::models::{SalesTaxRates, SalesTaxResult};

/// Computes GST and QST on an order or quote subtotal.
///
/// Each tax is computed from the subtotal and rounded to cents
/// independently. The total is the sum of the rounded parts, so
/// `total == subtotal + gst_amount + qst_amount` always holds.
///
/// # Arguments
///
/// * `subtotal` - The pre-tax amount; must not be negative
/// * `rates` - The GST and QST rates to apply
///
/// # Errors
///
/// Returns `InvalidAmount` if `subtotal` is negative or above
/// [`MAX_AMOUNT_DOLLARS`](crate::models::money::MAX_AMOUNT_DOLLARS).
///
/// # Examples
///
/// ```
/// use quebec_tax_engine::calculation::compute_sales_tax;
/// use quebec_tax_engine::models::SalesTaxRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = SalesTaxRates {
///     gst_rate: Decimal::from_str("0.05").unwrap(),
///     qst_rate: Decimal::from_str("0.09975").unwrap(),
/// };
///
/// let result = compute_sales_tax(Decimal::from(100), &rates).unwrap();
/// assert_eq!(result.gst_amount.to_string(), "5.00");
/// assert_eq!(result.qst_amount.to_string(), "9.98");
/// assert_eq!(result.total.to_string(), "114.98");
/// ```
pub fn compute_sales_tax(
    subtotal: Decimal,
    rates: &SalesTaxRates,
) -> EngineResult<SalesTaxResult> {
    let subtotal = validate_amount("subtotal", subtotal)?;

    let gst_amount = round_cents(subtotal * rates.gst_rate);
    let qst_amount = round_cents(subtotal * rates.qst_rate);
    let total = subtotal + gst_amount + qst_amount;

    Ok(SalesTaxResult {
        subtotal,
        gst_amount,
        qst_amount,
        total,
    })
}
