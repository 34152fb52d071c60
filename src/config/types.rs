//! Configuration file types.
//!
//! This module contains the structures deserialized from the YAML files in
//! a configuration directory, and their conversion into validated
//! [`RateTable`]s.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{BracketTable, ContributionRates, RateTable, SalesTaxRates, TaxBracket};

/// Name given to the federal bracket table.
pub const FEDERAL_TABLE: &str = "federal";

/// Name given to the Quebec bracket table.
pub const PROVINCIAL_TABLE: &str = "quebec";

/// One `rates/<year>.yaml` file, before validation.
///
/// ```yaml
/// tax_year: 2024
/// effective_date: 2024-01-01
/// sales_tax:
///   gst_rate: 0.05
///   qst_rate: 0.09975
/// federal_brackets:
///   - { lower_bound: 0, upper_bound: 55867, rate: 0.15 }
///   - { lower_bound: 55867, rate: 0.205 }
/// provincial_brackets: [...]
/// contributions:
///   cpp: { rate: 0.0595, max_earnings: 68500, basic_exemption: 3500 }
///   ei: { rate: 0.0229, max_earnings: 63300, employer_multiplier: 1.4 }
///   rqap: { rate: 0.00494, max_earnings: 94000, employer_multiplier: 1.4 }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RateFile {
    /// The tax year the file describes.
    pub tax_year: i32,
    /// The date from which the rates apply.
    pub effective_date: NaiveDate,
    /// GST and QST rates.
    pub sales_tax: SalesTaxRates,
    /// Federal income tax brackets, lowest first.
    pub federal_brackets: Vec<TaxBracket>,
    /// Quebec income tax brackets, lowest first.
    pub provincial_brackets: Vec<TaxBracket>,
    /// CPP/RRQ, EI and RQAP schedules.
    pub contributions: ContributionRates,
}

impl TryFrom<RateFile> for RateTable {
    type Error = EngineError;

    fn try_from(file: RateFile) -> EngineResult<Self> {
        let federal = BracketTable::new(FEDERAL_TABLE, file.federal_brackets)?;
        let provincial = BracketTable::new(PROVINCIAL_TABLE, file.provincial_brackets)?;

        RateTable::new(
            file.tax_year,
            file.effective_date,
            file.sales_tax,
            federal,
            provincial,
            file.contributions,
        )
    }
}
