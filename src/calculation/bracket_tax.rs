//! Progressive bracket tax evaluation.
//!
//! This module evaluates annual income tax against a marginal bracket
//! table. The same evaluator serves the federal and the Quebec tables;
//! only the table argument differs.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::BracketTable;

/// Computes annual income tax on `annual_income` against `table`.
///
/// Brackets are walked in ascending order and the slice of income inside
/// each bracket is taxed at that bracket's rate. Income exactly on a
/// boundary belongs entirely to the lower bracket. Income above the last
/// bound is taxed at the top rate with no limit.
///
/// The result is not rounded: callers de-annualize first and round the
/// per-period figure.
///
/// # Arguments
///
/// * `annual_income` - Taxable income for the year; must not be negative
/// * `table` - A validated bracket table
///
/// # Errors
///
/// Returns `InvalidAmount` if `annual_income` is negative.
///
/// # Examples
///
/// ```
/// use quebec_tax_engine::calculation::compute_bracket_tax;
/// use quebec_tax_engine::models::{BracketTable, TaxBracket};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(
///     "example",
///     vec![
///         TaxBracket::new(Decimal::ZERO, Some(Decimal::from(10000)), Decimal::new(10, 2)),
///         TaxBracket::new(Decimal::from(10000), None, Decimal::new(20, 2)),
///     ],
/// )
/// .unwrap();
///
/// let tax = compute_bracket_tax(Decimal::from(15000), &table).unwrap();
/// assert_eq!(tax, Decimal::from(2000));
/// ```
pub fn compute_bracket_tax(annual_income: Decimal, table: &BracketTable) -> EngineResult<Decimal> {
    if annual_income < Decimal::ZERO {
        return Err(EngineError::invalid_amount("annual_income", annual_income));
    }

    let mut tax = Decimal::ZERO;
    for bracket in table.brackets() {
        if annual_income <= bracket.lower_bound {
            break;
        }
        tax += bracket.taxable_portion(annual_income) * bracket.rate;
    }

    Ok(tax)
}
