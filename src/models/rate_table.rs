//! Rate table models.
//!
//! A [`RateTable`] holds every rate, cap and bracket the engine needs for a
//! single tax year. It is normally built by the configuration loader from a
//! YAML file, but can be assembled in code as well.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::BracketTable;

/// Sales tax rates applied to order and quote subtotals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTaxRates {
    /// Federal Goods and Services Tax rate (e.g. 0.05).
    pub gst_rate: Decimal,
    /// Quebec Sales Tax rate (e.g. 0.09975).
    pub qst_rate: Decimal,
}

/// Rate, earnings cap and exemption for one statutory payroll contribution.
///
/// The employee contribution for a year is
/// `max(0, min(income, max_earnings) - basic_exemption) * rate`.
/// The employer contribution multiplies the employee rate by
/// `employer_multiplier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSchedule {
    /// Employee contribution rate.
    pub rate: Decimal,
    /// Maximum pensionable or insurable earnings for the year.
    pub max_earnings: Decimal,
    /// Earnings exempt from contribution (CPP/RRQ only).
    #[serde(default)]
    pub basic_exemption: Decimal,
    /// Employer contribution as a multiple of the employee rate.
    #[serde(default = "default_employer_multiplier")]
    pub employer_multiplier: Decimal,
}

fn default_employer_multiplier() -> Decimal {
    Decimal::ONE
}

impl ContributionSchedule {
    fn validate(&self, name: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable {
            message: format!("{} contribution {}", name, message),
        };

        if self.rate < Decimal::ZERO || self.rate > Decimal::ONE {
            return Err(invalid(format!("rate {} is outside [0, 1]", self.rate)));
        }
        if self.max_earnings < Decimal::ZERO {
            return Err(invalid(format!(
                "maximum earnings {} is negative",
                self.max_earnings
            )));
        }
        if self.basic_exemption < Decimal::ZERO || self.basic_exemption > self.max_earnings {
            return Err(invalid(format!(
                "basic exemption {} must lie between 0 and the maximum earnings {}",
                self.basic_exemption, self.max_earnings
            )));
        }
        if self.employer_multiplier < Decimal::ZERO {
            return Err(invalid(format!(
                "employer multiplier {} is negative",
                self.employer_multiplier
            )));
        }
        Ok(())
    }
}

/// The three Quebec payroll contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Canada/Quebec Pension Plan.
    pub cpp: ContributionSchedule,
    /// Employment Insurance.
    pub ei: ContributionSchedule,
    /// Quebec Parental Insurance Plan.
    pub rqap: ContributionSchedule,
}

/// Every rate and bracket the engine uses for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateTable {
    tax_year: i32,
    effective_date: NaiveDate,
    sales_tax: SalesTaxRates,
    federal_brackets: BracketTable,
    provincial_brackets: BracketTable,
    contributions: ContributionRates,
}

impl RateTable {
    /// Validates and builds a rate table.
    ///
    /// The bracket tables are already validated by [`BracketTable::new`];
    /// this checks the sales tax rates and contribution schedules.
    pub fn new(
        tax_year: i32,
        effective_date: NaiveDate,
        sales_tax: SalesTaxRates,
        federal_brackets: BracketTable,
        provincial_brackets: BracketTable,
        contributions: ContributionRates,
    ) -> EngineResult<Self> {
        for (name, rate) in [("GST", sales_tax.gst_rate), ("QST", sales_tax.qst_rate)] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidRateTable {
                    message: format!("{} rate {} is outside [0, 1]", name, rate),
                });
            }
        }

        contributions.cpp.validate("CPP")?;
        contributions.ei.validate("EI")?;
        contributions.rqap.validate("RQAP")?;

        Ok(Self {
            tax_year,
            effective_date,
            sales_tax,
            federal_brackets,
            provincial_brackets,
            contributions,
        })
    }

    /// Returns the tax year these rates apply to.
    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Returns the date from which these rates apply.
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Returns the sales tax rates.
    pub fn sales_tax(&self) -> &SalesTaxRates {
        &self.sales_tax
    }

    /// Returns the federal income tax brackets.
    pub fn federal_brackets(&self) -> &BracketTable {
        &self.federal_brackets
    }

    /// Returns the Quebec provincial income tax brackets.
    pub fn provincial_brackets(&self) -> &BracketTable {
        &self.provincial_brackets
    }

    /// Returns the payroll contribution schedules.
    pub fn contributions(&self) -> &ContributionRates {
        &self.contributions
    }
}
