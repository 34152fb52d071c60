//! Pay period count model.
//!
//! Payroll deductions are annualized with the number of pay periods in a
//! year and divided back per period, so the count must be a positive
//! integer. [`PayPeriods`] enforces that once, at construction.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The number of pay periods in a year.
///
/// # Example
///
/// ```
/// use quebec_tax_engine::models::PayPeriods;
///
/// let periods = PayPeriods::new(26).unwrap();
/// assert_eq!(periods, PayPeriods::BIWEEKLY);
/// assert!(PayPeriods::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PayPeriods(u32);

impl PayPeriods {
    /// Weekly pay (52 periods).
    pub const WEEKLY: PayPeriods = PayPeriods(52);
    /// Bi-weekly pay (26 periods), the default.
    pub const BIWEEKLY: PayPeriods = PayPeriods(26);
    /// Twice-monthly pay (24 periods).
    pub const SEMI_MONTHLY: PayPeriods = PayPeriods(24);
    /// Monthly pay (12 periods).
    pub const MONTHLY: PayPeriods = PayPeriods(12);

    /// Creates a pay period count, rejecting zero.
    pub fn new(count: u32) -> EngineResult<Self> {
        if count == 0 {
            return Err(EngineError::InvalidPayPeriod {
                value: count.to_string(),
            });
        }
        Ok(Self(count))
    }

    /// Creates a pay period count from an untyped numeric input.
    ///
    /// Negative, zero and fractional values are rejected with
    /// [`EngineError::InvalidPayPeriod`].
    pub fn from_decimal(value: Decimal) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPayPeriod {
            value: value.to_string(),
        };

        if !value.fract().is_zero() || value <= Decimal::ZERO {
            return Err(invalid());
        }

        let count = value.to_u32().ok_or_else(invalid)?;
        Self::new(count)
    }

    /// Returns the count as an integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the count as a decimal, for multiplying and dividing amounts.
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl Default for PayPeriods {
    fn default() -> Self {
        Self::BIWEEKLY
    }
}

impl TryFrom<u32> for PayPeriods {
    type Error = EngineError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PayPeriods> for u32 {
    fn from(periods: PayPeriods) -> Self {
        periods.0
    }
}

impl fmt::Display for PayPeriods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
