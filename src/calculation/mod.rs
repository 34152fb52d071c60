//! Calculation logic for the Quebec tax engine.
//!
//! This module contains the pure calculation functions: sales tax on
//! order subtotals, progressive bracket income tax, statutory payroll
//! contributions (CPP/RRQ, EI, RQAP) with their caps and exemptions,
//! per-period payroll deductions and net pay, employer contribution cost,
//! and year-end slip generation.

mod annual_slip;
mod bracket_tax;
mod contributions;
mod payroll;
mod sales_tax;

pub use annual_slip::{SLIP_PAY_PERIODS, generate_annual_slip};
pub use bracket_tax::compute_bracket_tax;
pub use contributions::{
    compute_contribution, compute_employer_contribution, contributory_earnings,
};
pub use payroll::{compute_employer_contributions, compute_payroll};
pub use sales_tax::compute_sales_tax;
