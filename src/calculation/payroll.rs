//! Payroll deduction and employer cost calculation.
//!
//! [`compute_payroll`] turns a per-period gross pay into the full set of
//! employee deductions and net pay. [`compute_employer_contributions`] is a
//! separate path that prices the employer's share on a single gross figure.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::money::{round_cents, validate_amount};
use crate::models::{
    ContributionRates, EmployerContributionResult, PayPeriods, PayrollResult, RateTable,
};

use super::bracket_tax::compute_bracket_tax;
use super::contributions::{compute_contribution, compute_employer_contribution};

/// Computes per-period deductions and net pay.
///
/// The calculation proceeds as follows:
/// 1. Annualize: `annual = gross_pay_period * pay_periods`
/// 2. Federal and Quebec income tax on the annual figure, divided back per
///    period and rounded to cents
/// 3. CPP/RRQ, EI and RQAP on the annual figure, divided back per period
/// 4. `net_pay = gross_pay_period - (all deductions)`
///
/// Working from the annualized figure means caps and exemptions are spread
/// evenly across the year's periods.
///
/// # Arguments
///
/// * `gross_pay_period` - Gross pay for one period; must not be negative
/// * `pay_periods` - Number of pay periods in the year (26 for bi-weekly)
/// * `rates` - The rate table for the tax year
///
/// # Errors
///
/// Returns `InvalidAmount` if `gross_pay_period` is negative or above
/// [`MAX_AMOUNT_DOLLARS`](crate::models::money::MAX_AMOUNT_DOLLARS).
///
/// # Examples
///
/// ```no_run
/// use quebec_tax_engine::calculation::compute_payroll;
/// use quebec_tax_engine::config::ConfigLoader;
/// use quebec_tax_engine::models::PayPeriods;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/quebec")?;
/// let rates = loader.latest_rate_table()?;
///
/// let result = compute_payroll(Decimal::from(2000), PayPeriods::BIWEEKLY, rates)?;
/// println!("Net pay: ${}", result.net_pay);
/// # Ok::<(), quebec_tax_engine::error::EngineError>(())
/// ```
pub fn compute_payroll(
    gross_pay_period: Decimal,
    pay_periods: PayPeriods,
    rates: &RateTable,
) -> EngineResult<PayrollResult> {
    let gross_pay = validate_amount("gross_pay", gross_pay_period)?;
    let periods = pay_periods.as_decimal();
    let annual_gross_pay = gross_pay * periods;

    let annual_federal_tax = compute_bracket_tax(annual_gross_pay, rates.federal_brackets())?;
    let annual_provincial_tax =
        compute_bracket_tax(annual_gross_pay, rates.provincial_brackets())?;
    let federal_tax = round_cents(annual_federal_tax / periods);
    let provincial_tax = round_cents(annual_provincial_tax / periods);

    let contributions = rates.contributions();
    let cpp = compute_contribution(annual_gross_pay, &contributions.cpp, pay_periods)?;
    let ei = compute_contribution(annual_gross_pay, &contributions.ei, pay_periods)?;
    let rqap = compute_contribution(annual_gross_pay, &contributions.rqap, pay_periods)?;

    let total_deductions = federal_tax + provincial_tax + cpp + ei + rqap;
    let net_pay = gross_pay - total_deductions;

    Ok(PayrollResult {
        gross_pay,
        federal_tax,
        provincial_tax,
        cpp,
        ei,
        rqap,
        net_pay,
    })
}

/// Computes what the employer pays on top of `gross_pay`.
///
/// Unlike [`compute_payroll`], the amount is not annualized: caps are
/// compared against `gross_pay` exactly as passed. Each contribution is
/// rounded to cents and the total cost is gross pay plus the rounded
/// contributions.
///
/// # Errors
///
/// Returns `InvalidAmount` if `gross_pay` is negative or above
/// [`MAX_AMOUNT_DOLLARS`](crate::models::money::MAX_AMOUNT_DOLLARS).
pub fn compute_employer_contributions(
    gross_pay: Decimal,
    contributions: &ContributionRates,
) -> EngineResult<EmployerContributionResult> {
    let gross_pay = validate_amount("gross_pay", gross_pay)?;

    let cpp_employer = compute_employer_contribution(gross_pay, &contributions.cpp)?;
    let ei_employer = compute_employer_contribution(gross_pay, &contributions.ei)?;
    let rqap_employer = compute_employer_contribution(gross_pay, &contributions.rqap)?;

    Ok(EmployerContributionResult {
        cpp_employer,
        ei_employer,
        rqap_employer,
        total_employer_cost: gross_pay + cpp_employer + ei_employer + rqap_employer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::fixtures::rate_table_2024;
    use crate::models::money::MAX_AMOUNT_DOLLARS;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// PR-001: bi-weekly $2000 reference scenario
    #[test]
    fn test_biweekly_2000_scenario() {
        let result = compute_payroll(dec("2000.00"), PayPeriods::BIWEEKLY, &rate_table_2024())
            .unwrap();

        assert_eq!(result.gross_pay, dec("2000.00"));
        // 52000 * 0.15 = 7800 / 26
        assert_eq!(result.federal_tax, dec("300.00"));
        // 7291.00 / 26 = 280.4231
        assert_eq!(result.provincial_tax, dec("280.42"));
        assert_eq!(result.cpp, dec("110.99"));
        assert_eq!(result.ei, dec("45.80"));
        assert_eq!(result.rqap, dec("9.88"));
        assert_eq!(result.net_pay, dec("1252.91"));
    }

    /// PR-002: zero gross pay yields zero deductions
    #[test]
    fn test_zero_gross_pay() {
        let result = compute_payroll(Decimal::ZERO, PayPeriods::BIWEEKLY, &rate_table_2024())
            .unwrap();

        assert_eq!(result.federal_tax, Decimal::ZERO);
        assert_eq!(result.provincial_tax, Decimal::ZERO);
        assert_eq!(result.cpp, Decimal::ZERO);
        assert_eq!(result.ei, Decimal::ZERO);
        assert_eq!(result.rqap, Decimal::ZERO);
        assert_eq!(result.net_pay, Decimal::ZERO);
    }

    /// PR-003: net pay reconciles with the deductions
    #[test]
    fn test_net_pay_reconciles() {
        let rates = rate_table_2024();
        for gross in ["0.01", "431.17", "1923.08", "3846.15", "12500.00"] {
            let result = compute_payroll(dec(gross), PayPeriods::BIWEEKLY, &rates).unwrap();
            assert_eq!(
                result.net_pay,
                result.gross_pay - result.total_deductions(),
                "gross {}",
                gross
            );
        }
    }

    /// PR-004: high earner hits every cap
    #[test]
    fn test_high_earner_saturates_contributions() {
        let rates = rate_table_2024();
        let result = compute_payroll(dec("10000.00"), PayPeriods::BIWEEKLY, &rates).unwrap();

        assert_eq!(result.cpp, dec("148.75"));
        assert_eq!(result.ei, dec("55.75"));
        assert_eq!(result.rqap, dec("17.86"));
    }

    /// PR-005: monthly pay annualizes with 12 periods
    #[test]
    fn test_monthly_pay() {
        let rates = rate_table_2024();
        let result = compute_payroll(dec("4000.00"), PayPeriods::MONTHLY, &rates).unwrap();

        // annual 48000: federal 7200 / 12 = 600; quebec 6720 / 12 = 560
        assert_eq!(result.federal_tax, dec("600.00"));
        assert_eq!(result.provincial_tax, dec("560.00"));
        // (48000 - 3500) * 0.0595 = 2647.75 / 12 = 220.6458
        assert_eq!(result.cpp, dec("220.65"));
        // 48000 * 0.0229 = 1099.20 / 12
        assert_eq!(result.ei, dec("91.60"));
        // 48000 * 0.00494 = 237.12 / 12
        assert_eq!(result.rqap, dec("19.76"));
        assert_eq!(result.net_pay, dec("2507.99"));
    }

    #[test]
    fn test_negative_gross_pay_is_rejected() {
        let result = compute_payroll(dec("-1.00"), PayPeriods::BIWEEKLY, &rate_table_2024());

        match result {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "gross_pay"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    /// PR-006: an amount too large to annualize is rejected, not overflowed
    #[test]
    fn test_oversized_gross_pay_is_rejected() {
        let rates = rate_table_2024();

        for gross in [dec("10000000000000000000000000000"), Decimal::MAX] {
            match compute_payroll(gross, PayPeriods::WEEKLY, &rates) {
                Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "gross_pay"),
                other => panic!("Expected InvalidAmount, got {:?}", other),
            }
        }
    }

    /// PR-007: weekly pay at the ceiling still annualizes and reconciles
    #[test]
    fn test_gross_pay_at_ceiling() {
        let gross = Decimal::from(MAX_AMOUNT_DOLLARS);
        let result = compute_payroll(gross, PayPeriods::WEEKLY, &rate_table_2024()).unwrap();

        // 52 trillion is deep in the top brackets and past every contribution cap
        assert_eq!(result.cpp, dec("74.38"));
        assert_eq!(result.net_pay, gross - result.total_deductions());
        assert!(result.net_pay > Decimal::ZERO);
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let rates = rate_table_2024();
        let first = compute_payroll(dec("1776.42"), PayPeriods::WEEKLY, &rates).unwrap();
        let second = compute_payroll(dec("1776.42"), PayPeriods::WEEKLY, &rates).unwrap();

        assert_eq!(first, second);
    }

    /// EM-001: employer cost on a bi-weekly pay
    #[test]
    fn test_employer_contributions_on_period_pay() {
        let rates = rate_table_2024();
        let result = compute_employer_contributions(dec("2000.00"), rates.contributions()).unwrap();

        assert_eq!(result.cpp_employer, dec("119.00"));
        assert_eq!(result.ei_employer, dec("64.12"));
        assert_eq!(result.rqap_employer, dec("13.83"));
        assert_eq!(result.total_employer_cost, dec("2196.95"));
    }

    /// EM-002: employer cost on an annual salary hits the caps
    #[test]
    fn test_employer_contributions_on_annual_salary() {
        let rates = rate_table_2024();
        let result =
            compute_employer_contributions(dec("100000.00"), rates.contributions()).unwrap();

        assert_eq!(result.cpp_employer, dec("3867.50"));
        // 63300 * 0.0229 * 1.4 = 2029.398
        assert_eq!(result.ei_employer, dec("2029.40"));
        // 94000 * 0.00494 * 1.4 = 650.104
        assert_eq!(result.rqap_employer, dec("650.10"));
        assert_eq!(result.total_employer_cost, dec("106547.00"));
    }

    #[test]
    fn test_employer_total_reconciles() {
        let rates = rate_table_2024();
        let result = compute_employer_contributions(dec("1234.56"), rates.contributions()).unwrap();

        assert_eq!(
            result.total_employer_cost,
            dec("1234.56") + result.contributions_total()
        );
    }

    #[test]
    fn test_employer_negative_gross_is_rejected() {
        let rates = rate_table_2024();
        let result = compute_employer_contributions(dec("-5"), rates.contributions());

        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    /// EM-003: employer cost on an oversized amount is rejected
    #[test]
    fn test_employer_oversized_gross_is_rejected() {
        let rates = rate_table_2024();

        match compute_employer_contributions(Decimal::MAX, rates.contributions()) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "gross_pay"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }
}
