//! Error types for the Quebec tax engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every validation failure the engine can report. None of them are
//! fatal: they describe bad input or bad configuration and are meant to be
//! surfaced to the caller.

use thiserror::Error;

/// The main error type for the Quebec tax engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use quebec_tax_engine::error::EngineError;
///
/// let error = EngineError::InvalidPayPeriod {
///     value: "0".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid pay period count: 0 (must be a positive integer)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A monetary input was negative, NaN or infinite.
    #[error("Invalid amount for '{field}': {value}")]
    InvalidAmount {
        /// The name of the offending input.
        field: String,
        /// The rejected value, as text.
        value: String,
    },

    /// The number of pay periods per year was zero, negative or fractional.
    #[error("Invalid pay period count: {value} (must be a positive integer)")]
    InvalidPayPeriod {
        /// The rejected value, as text.
        value: String,
    },

    /// A bracket table was empty, unsorted, overlapping or had gaps.
    #[error("Invalid bracket table '{table}': {message}")]
    InvalidBracketTable {
        /// The name of the table (e.g. "federal").
        table: String,
        /// A description of what is wrong with the table.
        message: String,
    },

    /// A rate or contribution schedule in a rate table was out of range.
    #[error("Invalid rate table: {message}")]
    InvalidRateTable {
        /// A description of the problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table is loaded for the requested tax year.
    #[error("No rate table loaded for tax year {year}")]
    TaxYearNotFound {
        /// The requested tax year.
        year: i32,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidAmount`] for the given field.
    pub fn invalid_amount(field: &str, value: impl ToString) -> Self {
        Self::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
