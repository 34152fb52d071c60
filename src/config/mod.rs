//! Configuration loading for the Quebec tax engine.
//!
//! This module loads the employer identification and the per-year rate
//! tables from YAML files and validates them into [`RateTable`]s.
//!
//! # Example
//!
//! ```no_run
//! use quebec_tax_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/quebec").unwrap();
//! println!("Loaded tax years: {:?}", config.tax_years());
//! ```
//!
//! [`RateTable`]: crate::models::RateTable

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{FEDERAL_TABLE, PROVINCIAL_TABLE, RateFile};
