//! Request types for the Quebec tax engine API.
//!
//! Monetary fields accept either JSON numbers or decimal strings
//! (`100` and `"100.00"` are equivalent).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayPeriods, SlipEmployee};

/// Request body for the `/sales-tax` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTaxRequest {
    /// The order or quote subtotal, before taxes.
    pub subtotal: Decimal,
    /// Tax year to compute with; defaults to the latest loaded.
    #[serde(default)]
    pub tax_year: Option<i32>,
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Gross pay for one pay period.
    pub gross_pay: Decimal,
    /// Pay periods per year; defaults to 26 (bi-weekly).
    #[serde(default)]
    pub pay_periods_per_year: Option<Decimal>,
    /// Tax year to compute with; defaults to the latest loaded.
    #[serde(default)]
    pub tax_year: Option<i32>,
}

impl PayrollRequest {
    /// Resolves the pay period count, rejecting zero, negative and
    /// fractional values.
    pub fn pay_periods(&self) -> EngineResult<PayPeriods> {
        match self.pay_periods_per_year {
            Some(value) => PayPeriods::from_decimal(value),
            None => Ok(PayPeriods::default()),
        }
    }
}

/// Request body for the `/employer-contributions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerContributionRequest {
    /// The gross pay the employer contributions are priced on.
    pub gross_pay: Decimal,
    /// Tax year to compute with; defaults to the latest loaded.
    #[serde(default)]
    pub tax_year: Option<i32>,
}

/// Request body for the `/annual-slip` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSlipRequest {
    /// The employee the slip is issued to.
    pub employee: SlipEmployee,
    /// Gross employment income for the year.
    pub annual_gross_pay: Decimal,
    /// Tax year of the slip; defaults to the latest loaded.
    #[serde(default)]
    pub tax_year: Option<i32>,
}
