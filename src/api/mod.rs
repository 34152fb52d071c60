//! HTTP API module for the Quebec tax engine.
//!
//! This module exposes the sales tax, payroll, employer contribution and
//! annual slip calculations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AnnualSlipRequest, EmployerContributionRequest, PayrollRequest, SalesTaxRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
