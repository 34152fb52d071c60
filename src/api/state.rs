//! Application state for the Quebec tax engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::TaxEngine;
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Holds the loaded configuration and one [`TaxEngine`] per loaded tax
/// year, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// Engines keyed by tax year.
    engines: Arc<BTreeMap<i32, TaxEngine>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let engines = config
            .rate_tables()
            .map(|rates| {
                let engine = TaxEngine::new(rates.clone(), config.employer().clone());
                (rates.tax_year(), engine)
            })
            .collect();

        Self {
            config: Arc::new(config),
            engines: Arc::new(engines),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the engine for `tax_year`, or for the latest loaded year
    /// when none is given.
    pub fn engine(&self, tax_year: Option<i32>) -> EngineResult<&TaxEngine> {
        match tax_year {
            Some(year) => self
                .engines
                .get(&year)
                .ok_or(EngineError::TaxYearNotFound { year }),
            None => self
                .engines
                .values()
                .next_back()
                .ok_or_else(|| EngineError::ConfigNotFound {
                    path: "rates (no rate tables loaded)".to_string(),
                }),
        }
    }
}
