//! The tax engine facade.
//!
//! [`TaxEngine`] binds one validated [`RateTable`] to the employer that
//! issues slips, so callers do not have to thread both through every
//! calculation.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation;
use crate::error::EngineResult;
use crate::models::{
    AnnualSlip, EmployerContributionResult, EmployerIdentity, PayPeriods, PayrollResult,
    RateTable, SalesTaxResult, SlipEmployee,
};

#[derive(Debug)]
struct EngineData {
    rates: RateTable,
    employer: EmployerIdentity,
}

/// Sales tax and payroll calculations for one tax year.
///
/// Cloning is cheap; clones share the same rate table.
///
/// # Example
///
/// ```no_run
/// use quebec_tax_engine::config::ConfigLoader;
/// use quebec_tax_engine::models::PayPeriods;
/// use rust_decimal::Decimal;
///
/// let engine = ConfigLoader::load("./config/quebec")?.engine()?;
///
/// let invoice = engine.compute_sales_tax(Decimal::from(100))?;
/// assert_eq!(invoice.total.to_string(), "114.98");
///
/// let pay = engine.compute_payroll(Decimal::from(2000), PayPeriods::BIWEEKLY)?;
/// assert_eq!(pay.net_pay.to_string(), "1252.91");
/// # Ok::<(), quebec_tax_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TaxEngine {
    data: Arc<EngineData>,
}

impl TaxEngine {
    /// Creates an engine over a validated rate table.
    pub fn new(rates: RateTable, employer: EmployerIdentity) -> Self {
        Self {
            data: Arc::new(EngineData { rates, employer }),
        }
    }

    /// Returns the rate table the engine computes from.
    pub fn rates(&self) -> &RateTable {
        &self.data.rates
    }

    /// Returns the employer printed on generated slips.
    pub fn employer(&self) -> &EmployerIdentity {
        &self.data.employer
    }

    /// Computes GST and QST on an order or quote subtotal.
    pub fn compute_sales_tax(&self, subtotal: Decimal) -> EngineResult<SalesTaxResult> {
        let result = calculation::compute_sales_tax(subtotal, self.rates().sales_tax())?;

        debug!(
            tax_year = self.rates().tax_year(),
            subtotal = %result.subtotal,
            gst = %result.gst_amount,
            qst = %result.qst_amount,
            total = %result.total,
            "Computed sales tax"
        );

        Ok(result)
    }

    /// Computes per-period deductions and net pay.
    pub fn compute_payroll(
        &self,
        gross_pay_period: Decimal,
        pay_periods: PayPeriods,
    ) -> EngineResult<PayrollResult> {
        let result = calculation::compute_payroll(gross_pay_period, pay_periods, self.rates())?;

        debug!(
            tax_year = self.rates().tax_year(),
            pay_periods = pay_periods.get(),
            gross_pay = %result.gross_pay,
            income_tax = %result.income_tax(),
            net_pay = %result.net_pay,
            "Computed payroll"
        );

        Ok(result)
    }

    /// Computes the employer's contribution cost on `gross_pay`.
    pub fn compute_employer_contributions(
        &self,
        gross_pay: Decimal,
    ) -> EngineResult<EmployerContributionResult> {
        let result =
            calculation::compute_employer_contributions(gross_pay, self.rates().contributions())?;

        debug!(
            tax_year = self.rates().tax_year(),
            contributions = %result.contributions_total(),
            total_employer_cost = %result.total_employer_cost,
            "Computed employer contributions"
        );

        Ok(result)
    }

    /// Generates the year-end slip for an employee.
    pub fn generate_annual_slip(
        &self,
        employee: SlipEmployee,
        annual_gross_pay: Decimal,
    ) -> EngineResult<AnnualSlip> {
        let slip = calculation::generate_annual_slip(
            employee,
            annual_gross_pay,
            self.rates(),
            self.employer(),
        )?;

        debug!(
            tax_year = slip.tax_year,
            employment_income = %slip.employment_income,
            "Generated annual slip"
        );

        Ok(slip)
    }
}
