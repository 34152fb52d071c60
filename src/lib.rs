//! Quebec Tax & Payroll Calculation Engine
//!
//! This crate computes GST/QST on order and quote subtotals, federal and
//! Quebec progressive income tax, CPP/RRQ, EI and RQAP payroll
//! contributions with their annual caps, net pay, the employer's
//! contribution cost, and the figures printed on a year-end T4 slip.
//!
//! Every rate, cap and bracket lives in a per-year [`models::RateTable`],
//! normally loaded from YAML by [`config::ConfigLoader`]. The
//! [`engine::TaxEngine`] facade binds one table to the employer
//! identification; the [`api`] module exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
