//! Statutory payroll contribution calculation.
//!
//! This module computes CPP/RRQ, EI and RQAP amounts from a
//! [`ContributionSchedule`]. Employee deductions are computed on annual
//! income and divided back to a pay period. Employer contributions are
//! computed directly on the amount passed in, without annualizing.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::money::round_cents;
use crate::models::{ContributionSchedule, PayPeriods};

/// Returns the annual earnings subject to contribution.
///
/// `max(0, min(income, max_earnings) - basic_exemption)`
pub fn contributory_earnings(annual_income: Decimal, schedule: &ContributionSchedule) -> Decimal {
    let capped = annual_income.min(schedule.max_earnings);
    (capped - schedule.basic_exemption).max(Decimal::ZERO)
}

/// Computes the employee contribution for one pay period.
///
/// The contribution for the year is computed on `annual_income`, capped
/// at the schedule's maximum earnings and reduced by its basic exemption,
/// then divided by the number of pay periods and rounded to cents.
///
/// # Arguments
///
/// * `annual_income` - Annualized gross pay; must not be negative
/// * `schedule` - Rate, cap and exemption for the contribution
/// * `pay_periods` - Number of pay periods in the year
///
/// # Errors
///
/// Returns `InvalidAmount` if `annual_income` is negative.
///
/// # Examples
///
/// ```
/// use quebec_tax_engine::calculation::compute_contribution;
/// use quebec_tax_engine::models::{ContributionSchedule, PayPeriods};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let cpp = ContributionSchedule {
///     rate: Decimal::from_str("0.0595").unwrap(),
///     max_earnings: Decimal::from(68500),
///     basic_exemption: Decimal::from(3500),
///     employer_multiplier: Decimal::ONE,
/// };
///
/// let per_period =
///     compute_contribution(Decimal::from(52000), &cpp, PayPeriods::BIWEEKLY).unwrap();
/// assert_eq!(per_period.to_string(), "110.99");
/// ```
pub fn compute_contribution(
    annual_income: Decimal,
    schedule: &ContributionSchedule,
    pay_periods: PayPeriods,
) -> EngineResult<Decimal> {
    if annual_income < Decimal::ZERO {
        return Err(EngineError::invalid_amount("annual_income", annual_income));
    }

    let annual = contributory_earnings(annual_income, schedule) * schedule.rate;
    Ok(round_cents(annual / pay_periods.as_decimal()))
}

/// Computes the employer contribution on a gross pay amount.
///
/// The base is `min(gross_pay, max_earnings - basic_exemption)` and the
/// rate is the employee rate times the schedule's employer multiplier.
/// The amount is used as given, whether the caller passes a period or an
/// annual figure.
///
/// # Errors
///
/// Returns `InvalidAmount` if `gross_pay` is negative.
pub fn compute_employer_contribution(
    gross_pay: Decimal,
    schedule: &ContributionSchedule,
) -> EngineResult<Decimal> {
    if gross_pay < Decimal::ZERO {
        return Err(EngineError::invalid_amount("gross_pay", gross_pay));
    }

    let base = gross_pay.min(schedule.max_earnings - schedule.basic_exemption);
    Ok(round_cents(base * schedule.rate * schedule.employer_multiplier))
}
