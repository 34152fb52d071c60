//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate tables
//! and employer identification from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::engine::TaxEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployerIdentity, RateTable};

use super::types::RateFile;

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every rate table it finds, and keys them by tax year.
///
/// # Directory Structure
///
/// ```text
/// config/quebec/
/// ├── employer.yaml       # Employer identification printed on slips
/// └── rates/
///     └── 2024.yaml       # Rates and brackets for one tax year
/// ```
///
/// # Example
///
/// ```no_run
/// use quebec_tax_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/quebec").unwrap();
///
/// let rates = loader.rate_table(2024).unwrap();
/// println!("QST rate: {}", rates.sales_tax().qst_rate);
///
/// let engine = loader.engine().unwrap();
/// println!("Loaded tax year {}", engine.rates().tax_year());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    employer: EmployerIdentity,
    rates: BTreeMap<i32, RateTable>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/quebec")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Two rate files describe the same tax year
    /// - A rate table fails validation (e.g. non-contiguous brackets)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let employer_path = path.join("employer.yaml");
        let employer = Self::load_yaml::<EmployerIdentity>(&employer_path)?;

        let rates_dir = path.join("rates");
        let rates = Self::load_rates(&rates_dir)?;

        info!(
            path = %path.display(),
            employer = %employer.name,
            tax_years = ?rates.keys().collect::<Vec<_>>(),
            "Loaded tax engine configuration"
        );

        Ok(Self { employer, rates })
    }

    /// Builds a loader from tables already in memory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` if two tables share a tax year, or
    /// `ConfigNotFound` if `tables` is empty.
    pub fn from_parts(
        employer: EmployerIdentity,
        tables: impl IntoIterator<Item = RateTable>,
    ) -> EngineResult<Self> {
        let mut rates = BTreeMap::new();
        for table in tables {
            Self::insert_table(&mut rates, table, "<memory>")?;
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: "<memory> (no rate tables supplied)".to_string(),
            });
        }

        Ok(Self { employer, rates })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<BTreeMap<i32, RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rate_file = Self::load_yaml::<RateFile>(&path)?;
                let table = RateTable::try_from(rate_file)?;
                debug!(path = %path.display(), tax_year = table.tax_year(), "Loaded rate table");
                Self::insert_table(&mut rates, table, &path.display().to_string())?;
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    fn insert_table(
        rates: &mut BTreeMap<i32, RateTable>,
        table: RateTable,
        source: &str,
    ) -> EngineResult<()> {
        let year = table.tax_year();
        if rates.insert(year, table).is_some() {
            return Err(EngineError::ConfigParseError {
                path: source.to_string(),
                message: format!("duplicate rate table for tax year {}", year),
            });
        }
        Ok(())
    }

    /// Returns the employer identification.
    pub fn employer(&self) -> &EmployerIdentity {
        &self.employer
    }

    /// Returns the loaded tax years in ascending order.
    pub fn tax_years(&self) -> Vec<i32> {
        self.rates.keys().copied().collect()
    }

    /// Returns every loaded rate table in ascending tax-year order.
    pub fn rate_tables(&self) -> impl Iterator<Item = &RateTable> {
        self.rates.values()
    }

    /// Gets the rate table for a tax year.
    ///
    /// # Returns
    ///
    /// Returns the table if loaded, or `TaxYearNotFound`.
    pub fn rate_table(&self, year: i32) -> EngineResult<&RateTable> {
        self.rates
            .get(&year)
            .ok_or(EngineError::TaxYearNotFound { year })
    }

    /// Gets the rate table for the most recent tax year loaded.
    pub fn latest_rate_table(&self) -> EngineResult<&RateTable> {
        self.rates
            .values()
            .next_back()
            .ok_or_else(|| EngineError::ConfigNotFound {
                path: "rates (no rate tables loaded)".to_string(),
            })
    }

    /// Gets the rate table in force on a given date.
    ///
    /// The method finds the most recent table whose effective date is on or
    /// before `date`.
    pub fn rate_table_on(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        use chrono::Datelike;

        self.rates
            .values()
            .rfind(|table| table.effective_date() <= date)
            .ok_or(EngineError::TaxYearNotFound { year: date.year() })
    }

    /// Builds an engine for the most recent tax year loaded.
    pub fn engine(&self) -> EngineResult<TaxEngine> {
        let rates = self.latest_rate_table()?;
        Ok(TaxEngine::new(rates.clone(), self.employer.clone()))
    }

    /// Builds an engine for a specific tax year.
    pub fn engine_for_year(&self, year: i32) -> EngineResult<TaxEngine> {
        let rates = self.rate_table(year)?;
        Ok(TaxEngine::new(rates.clone(), self.employer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::rate_table_2024;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/quebec"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_employer() -> EmployerIdentity {
        EmployerIdentity {
            name: "Test Traiteur".to_string(),
            address: "1 Rue Test, Québec, QC".to_string(),
            payroll_number: "RP0002".to_string(),
            business_number: "987654321RP0002".to_string(),
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.tax_years(), vec![2024]);
        assert_eq!(loader.employer().name, "Dounie Cuisine Inc.");
        assert_eq!(loader.employer().business_number, "123456789RP0001");
    }

    #[test]
    fn test_loaded_table_matches_2024_constants() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let loaded = loader.rate_table(2024).unwrap();

        assert_eq!(loaded, &rate_table_2024());
    }

    #[test]
    fn test_loaded_rates() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let table = loader.rate_table(2024).unwrap();

        assert_eq!(table.sales_tax().gst_rate, dec("0.05"));
        assert_eq!(table.sales_tax().qst_rate, dec("0.09975"));
        assert_eq!(table.federal_brackets().brackets().len(), 5);
        assert_eq!(table.provincial_brackets().brackets().len(), 4);
        assert_eq!(table.contributions().cpp.max_earnings, dec("68500"));
        assert_eq!(table.contributions().rqap.employer_multiplier, dec("1.4"));
    }

    #[test]
    fn test_unknown_year_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.rate_table(2019) {
            Err(EngineError::TaxYearNotFound { year }) => assert_eq!(year, 2019),
            other => panic!("Expected TaxYearNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_table_on_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(loader.rate_table_on(date).unwrap().tax_year(), 2024);

        let before = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert!(matches!(
            loader.rate_table_on(before),
            Err(EngineError::TaxYearNotFound { year: 2023 })
        ));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("employer.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_parts_rejects_duplicate_years() {
        let result =
            ConfigLoader::from_parts(test_employer(), [rate_table_2024(), rate_table_2024()]);

        match result {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("duplicate rate table for tax year 2024"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_parts_rejects_empty() {
        let result = ConfigLoader::from_parts(test_employer(), Vec::new());
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_engine_uses_latest_table_and_employer() {
        let loader = ConfigLoader::from_parts(test_employer(), [rate_table_2024()]).unwrap();
        let engine = loader.engine().unwrap();

        assert_eq!(engine.rates().tax_year(), 2024);
        assert_eq!(engine.employer().payroll_number, "RP0002");
        assert!(loader.engine_for_year(2030).is_err());
    }
}
