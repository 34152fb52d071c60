//! Year-end slip generation.
//!
//! The slip is built by running one nominal bi-weekly payroll and scaling
//! every per-period figure back up by 26. Dividing and multiplying by the
//! same count around a rounding step is lossy; box amounts may differ by a
//! few cents from an exact annual computation, and that difference is
//! accepted.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::money::{round_cents, validate_amount};
use crate::models::{AnnualSlip, EmployerIdentity, PayPeriods, RateTable, SlipEmployee};

use super::payroll::compute_payroll;

/// The pay frequency assumed when reconstructing annual figures.
pub const SLIP_PAY_PERIODS: PayPeriods = PayPeriods::BIWEEKLY;

/// Generates the annual employment income slip for one employee.
///
/// # Arguments
///
/// * `employee` - The employee the slip is issued to
/// * `annual_gross_pay` - Gross employment income for the year
/// * `rates` - The rate table for the slip's tax year
/// * `employer` - The employer identification printed on the slip
///
/// # Errors
///
/// Returns `InvalidAmount` if `annual_gross_pay` is negative or above
/// [`MAX_AMOUNT_DOLLARS`](crate::models::money::MAX_AMOUNT_DOLLARS).
///
/// # Examples
///
/// ```no_run
/// use quebec_tax_engine::calculation::generate_annual_slip;
/// use quebec_tax_engine::config::ConfigLoader;
/// use quebec_tax_engine::models::SlipEmployee;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/quebec")?;
/// let employee = SlipEmployee {
///     first_name: "Marie".to_string(),
///     last_name: "Tremblay".to_string(),
///     sin: "046454286".to_string(),
///     address: "45 Rue Saint-Paul, Montréal, QC".to_string(),
/// };
///
/// let slip = generate_annual_slip(
///     employee,
///     Decimal::from(52000),
///     loader.latest_rate_table()?,
///     loader.employer(),
/// )?;
/// for line in slip.boxes() {
///     println!("Box {}: {}", line.code, line.amount);
/// }
/// # Ok::<(), quebec_tax_engine::error::EngineError>(())
/// ```
pub fn generate_annual_slip(
    employee: SlipEmployee,
    annual_gross_pay: Decimal,
    rates: &RateTable,
    employer: &EmployerIdentity,
) -> EngineResult<AnnualSlip> {
    let employment_income = validate_amount("annual_gross_pay", annual_gross_pay)?;
    let periods = SLIP_PAY_PERIODS.as_decimal();

    // The only rounding added on top of payroll. Scaling the rounded period
    // figures back by 26 is where boxes drift from an exact annual figure.
    let nominal_period_pay = round_cents(employment_income / periods);
    let payroll = compute_payroll(nominal_period_pay, SLIP_PAY_PERIODS, rates)?;

    Ok(AnnualSlip {
        employee,
        employer: employer.clone(),
        tax_year: rates.tax_year(),
        employment_income,
        cpp_contributions: payroll.cpp * periods,
        ei_premiums: payroll.ei * periods,
        income_tax_deducted: payroll.federal_tax * periods,
        rqap_premiums: payroll.rqap * periods,
        provincial_income_tax: payroll.provincial_tax * periods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::fixtures::rate_table_2024;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee() -> SlipEmployee {
        SlipEmployee {
            first_name: "Marie".to_string(),
            last_name: "Tremblay".to_string(),
            sin: "046454286".to_string(),
            address: "45 Rue Saint-Paul, Montréal, QC".to_string(),
        }
    }

    fn create_test_employer() -> EmployerIdentity {
        EmployerIdentity {
            name: "Dounie Cuisine Inc.".to_string(),
            address: "1234 Rue Sainte-Catherine, Montréal, QC H3G 1P1".to_string(),
            payroll_number: "RP0001".to_string(),
            business_number: "123456789RP0001".to_string(),
        }
    }

    /// T4-001: slip for a $52,000 salary
    #[test]
    fn test_slip_for_52000() {
        let slip = generate_annual_slip(
            create_test_employee(),
            dec("52000"),
            &rate_table_2024(),
            &create_test_employer(),
        )
        .unwrap();

        assert_eq!(slip.tax_year, 2024);
        assert_eq!(slip.employment_income, dec("52000.00"));
        assert_eq!(slip.income_tax_deducted, dec("7800.00"));
        // 110.99 * 26, a cent under the exact 2885.75
        assert_eq!(slip.cpp_contributions, dec("2885.74"));
        assert_eq!(slip.ei_premiums, dec("1190.80"));
        assert_eq!(slip.rqap_premiums, dec("256.88"));
        assert_eq!(slip.provincial_income_tax, dec("7290.92"));
    }

    /// T4-002: employee and employer blocks are copied through
    #[test]
    fn test_slip_identification() {
        let slip = generate_annual_slip(
            create_test_employee(),
            dec("30000"),
            &rate_table_2024(),
            &create_test_employer(),
        )
        .unwrap();

        assert_eq!(slip.employee.sin, "046454286");
        assert_eq!(slip.employer.business_number, "123456789RP0001");
        assert_eq!(slip.employee_name(), "Marie Tremblay");
    }

    /// T4-003: non-divisible salary goes through a rounded period figure
    #[test]
    fn test_slip_round_trip_is_approximate() {
        let slip = generate_annual_slip(
            create_test_employee(),
            dec("50000"),
            &rate_table_2024(),
            &create_test_employer(),
        )
        .unwrap();

        // 50000 / 26 = 1923.0769 -> 1923.08 per period, 50000.08 annualized
        // federal: 50000.08 * 0.15 = 7500.012 / 26 = 288.4620 -> 288.46
        assert_eq!(slip.employment_income, dec("50000.00"));
        assert_eq!(slip.income_tax_deducted, dec("7499.96"));
    }

    #[test]
    fn test_slip_with_zero_income() {
        let slip = generate_annual_slip(
            create_test_employee(),
            Decimal::ZERO,
            &rate_table_2024(),
            &create_test_employer(),
        )
        .unwrap();

        assert!(slip.boxes().iter().all(|b| b.amount.is_zero()));
    }

    #[test]
    fn test_slip_rejects_negative_income() {
        let result = generate_annual_slip(
            create_test_employee(),
            dec("-52000"),
            &rate_table_2024(),
            &create_test_employer(),
        );

        match result {
            Err(EngineError::InvalidAmount { field, .. }) => {
                assert_eq!(field, "annual_gross_pay")
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_slip_rejects_oversized_income() {
        let result = generate_annual_slip(
            create_test_employee(),
            Decimal::MAX,
            &rate_table_2024(),
            &create_test_employer(),
        );

        match result {
            Err(EngineError::InvalidAmount { field, .. }) => {
                assert_eq!(field, "annual_gross_pay")
            }
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }
}
