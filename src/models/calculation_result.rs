//! Calculation result models.
//!
//! These are the value objects returned by the engine's entry points. All
//! amounts are rounded to cents, and each type upholds a reconciliation
//! invariant between its fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The result of applying GST and QST to a subtotal.
///
/// Invariant: `total == subtotal + gst_amount + qst_amount`.
///
/// # Example
///
/// ```
/// use quebec_tax_engine::models::SalesTaxResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = SalesTaxResult {
///     subtotal: Decimal::from_str("100.00").unwrap(),
///     gst_amount: Decimal::from_str("5.00").unwrap(),
///     qst_amount: Decimal::from_str("9.98").unwrap(),
///     total: Decimal::from_str("114.98").unwrap(),
/// };
/// assert_eq!(result.tax_total(), Decimal::from_str("14.98").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTaxResult {
    /// The taxable subtotal.
    pub subtotal: Decimal,
    /// Goods and Services Tax on the subtotal.
    pub gst_amount: Decimal,
    /// Quebec Sales Tax on the subtotal.
    pub qst_amount: Decimal,
    /// Subtotal plus both taxes.
    pub total: Decimal,
}

impl SalesTaxResult {
    /// Returns the combined sales tax.
    pub fn tax_total(&self) -> Decimal {
        self.gst_amount + self.qst_amount
    }
}

/// Per-period payroll deductions and net pay.
///
/// Invariant: `net_pay == gross_pay - total_deductions()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Gross pay for the period.
    pub gross_pay: Decimal,
    /// Federal income tax withheld.
    pub federal_tax: Decimal,
    /// Quebec income tax withheld.
    pub provincial_tax: Decimal,
    /// Canada/Quebec Pension Plan contribution.
    pub cpp: Decimal,
    /// Employment Insurance premium.
    pub ei: Decimal,
    /// Quebec Parental Insurance Plan premium.
    pub rqap: Decimal,
    /// Gross pay less all deductions.
    pub net_pay: Decimal,
}

impl PayrollResult {
    /// Returns the sum of income tax withheld (federal and provincial).
    pub fn income_tax(&self) -> Decimal {
        self.federal_tax + self.provincial_tax
    }

    /// Returns the sum of every deduction.
    pub fn total_deductions(&self) -> Decimal {
        self.income_tax() + self.cpp + self.ei + self.rqap
    }
}

/// What the employer pays on top of gross pay.
///
/// Invariant: `total_employer_cost == gross_pay + cpp_employer +
/// ei_employer + rqap_employer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributionResult {
    /// Employer share of the pension plan contribution.
    pub cpp_employer: Decimal,
    /// Employer share of the Employment Insurance premium.
    pub ei_employer: Decimal,
    /// Employer share of the RQAP premium.
    pub rqap_employer: Decimal,
    /// Gross pay plus every employer contribution.
    pub total_employer_cost: Decimal,
}

impl EmployerContributionResult {
    /// Returns the sum of employer contributions, excluding gross pay.
    pub fn contributions_total(&self) -> Decimal {
        self.cpp_employer + self.ei_employer + self.rqap_employer
    }
}
