//! Core data models for the Quebec tax engine.
//!
//! This module contains the value objects passed into and returned by the
//! engine, plus the validated rate and bracket tables it computes from.

mod annual_slip;
mod calculation_result;
pub mod money;
mod pay_periods;
mod rate_table;
mod tax_bracket;

pub use annual_slip::{AnnualSlip, EmployerIdentity, SlipBox, SlipEmployee};
pub use calculation_result::{EmployerContributionResult, PayrollResult, SalesTaxResult};
pub use pay_periods::PayPeriods;
pub use rate_table::{ContributionRates, ContributionSchedule, RateTable, SalesTaxRates};
pub use tax_bracket::{BracketTable, TaxBracket};

#[cfg(test)]
pub(crate) use rate_table::fixtures;
