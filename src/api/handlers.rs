//! HTTP request handlers for the Quebec tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;

use super::request::{
    AnnualSlipRequest, EmployerContributionRequest, PayrollRequest, SalesTaxRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sales-tax", post(sales_tax_handler))
        .route("/payroll", post(payroll_handler))
        .route(
            "/employer-contributions",
            post(employer_contributions_handler),
        )
        .route("/annual-slip", post(annual_slip_handler))
        .with_state(state)
}

/// Handler for POST /sales-tax.
async fn sales_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalesTaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing sales tax request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = state
        .engine(request.tax_year)
        .and_then(|engine| engine.compute_sales_tax(request.subtotal));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                subtotal = %result.subtotal,
                total = %result.total,
                duration_us = start_time.elapsed().as_micros(),
                "Sales tax calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = request.pay_periods().and_then(|periods| {
        state
            .engine(request.tax_year)?
            .compute_payroll(request.gross_pay, periods)
    });

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                gross_pay = %result.gross_pay,
                net_pay = %result.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /employer-contributions.
async fn employer_contributions_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployerContributionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employer contribution request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = state
        .engine(request.tax_year)
        .and_then(|engine| engine.compute_employer_contributions(request.gross_pay));

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                total_employer_cost = %result.total_employer_cost,
                duration_us = start_time.elapsed().as_micros(),
                "Employer contribution calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /annual-slip.
async fn annual_slip_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnualSlipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annual slip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = state.engine(request.tax_year).and_then(|engine| {
        engine.generate_annual_slip(request.employee, request.annual_gross_pay)
    });

    match result {
        Ok(slip) => {
            info!(
                correlation_id = %correlation_id,
                tax_year = slip.tax_year,
                employment_income = %slip.employment_income,
                duration_us = start_time.elapsed().as_micros(),
                "Annual slip generated successfully"
            );
            json_response(StatusCode::OK, slip)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            warn!(correlation_id = %correlation_id, "Missing JSON content type");
            ApiError::missing_content_type("Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}
