//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    BulkLeaveRequest, SalaryUpdate, build_monthly_report, calculate_employee, validate_bulk_leave,
};
use crate::error::PayrollError;
use crate::models::{CheckIn, CheckOut, PayMonth, Visit};

use super::request::SalaryInfoQuery;
use super::response::{ApiError, ApiErrorResponse, BulkLeaveResponse, HealthResponse};
use super::scope::CompanyScope;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/admin/employees-salary-info",
            get(salary_report_handler),
        )
        .route(
            "/api/admin/employees-salary-info/:employee_id",
            get(salary_detail_handler).put(update_salary_handler),
        )
        .route(
            "/api/admin/salaries/update-monthly-leaves",
            put(bulk_leave_handler),
        )
        .route("/api/visits/check-in", post(check_in_handler))
        .route("/api/visits/check-out", put(check_out_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: PayrollError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request failed"
    );
    ApiErrorResponse::from(error).into_response()
}

/// Maps a JSON body rejection to an API error.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_month(
    correlation_id: Uuid,
    query: Result<Query<SalaryInfoQuery>, QueryRejection>,
) -> Result<PayMonth, Response> {
    match query {
        Ok(Query(query)) => query
            .pay_month()
            .map_err(|err| error_response(correlation_id, err)),
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Query rejected");
            Err(ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response())
        }
    }
}

/// Loads the completed visits of a company for a month.
async fn month_visits(
    state: &AppState,
    scope: &CompanyScope,
    month: PayMonth,
) -> Result<Vec<Visit>, PayrollError> {
    let (from, to) = month.utc_bounds(state.config().calendar_offset());
    Ok(state
        .visits()
        .completed_visits(&scope.company, from, to)
        .await?)
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

/// Handler for GET /api/admin/employees-salary-info.
///
/// Returns every operational employee of the caller's company that has
/// something to be paid for in the requested month, each merged with its
/// salary calculation.
async fn salary_report_handler(
    State(state): State<AppState>,
    scope: CompanyScope,
    query: Result<Query<SalaryInfoQuery>, QueryRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %scope.company,
        "Processing salary report request"
    );

    let month = match query_month(correlation_id, query) {
        Ok(month) => month,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let employees = match state.employees().operational_employees(&scope.company).await {
        Ok(employees) => employees,
        Err(err) => return error_response(correlation_id, err.into()),
    };
    let visits = match month_visits(&state, &scope, month).await {
        Ok(visits) => visits,
        Err(err) => return error_response(correlation_id, err),
    };

    let report = build_monthly_report(&employees, &visits, month, state.config());

    info!(
        correlation_id = %correlation_id,
        month_year = %month,
        employees_count = employees.len(),
        visits_count = visits.len(),
        reported_count = report.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Salary report completed"
    );
    json_response(StatusCode::OK, report)
}

/// Handler for GET /api/admin/employees-salary-info/:employee_id.
///
/// Returns one employee's calculation regardless of the report filter.
async fn salary_detail_handler(
    State(state): State<AppState>,
    scope: CompanyScope,
    Path(employee_id): Path<String>,
    query: Result<Query<SalaryInfoQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %scope.company,
        employee_id = %employee_id,
        "Processing salary detail request"
    );

    let month = match query_month(correlation_id, query) {
        Ok(month) => month,
        Err(response) => return response,
    };

    let lookup = state
        .employees()
        .find_employee(&scope.company, &employee_id)
        .await;
    let employee = match lookup {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return error_response(correlation_id, PayrollError::EmployeeNotFound { employee_id });
        }
        Err(err) => return error_response(correlation_id, err.into()),
    };
    let visits = match month_visits(&state, &scope, month).await {
        Ok(visits) => visits,
        Err(err) => return error_response(correlation_id, err),
    };

    let info = calculate_employee(&employee, &visits, month, state.config());
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        net_salary = %info.calculated.net_salary,
        "Salary detail completed"
    );
    json_response(StatusCode::OK, info)
}

/// Handler for PUT /api/admin/employees-salary-info/:employee_id.
///
/// Applies a partial salary update and returns the stored profile.
async fn update_salary_handler(
    State(state): State<AppState>,
    scope: CompanyScope,
    Path(employee_id): Path<String>,
    payload: Result<Json<SalaryUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %scope.company,
        employee_id = %employee_id,
        "Processing salary update request"
    );

    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    if let Err(err) = update.validate() {
        return error_response(correlation_id, err);
    }

    let result = state
        .employees()
        .update_salary(&scope.company, &employee_id, update)
        .await;
    let (employee, applied) = match result {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            return error_response(correlation_id, PayrollError::EmployeeNotFound { employee_id });
        }
        Err(err) => return error_response(correlation_id, err.into()),
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        fields = ?applied,
        "Salary profile updated"
    );
    json_response(StatusCode::OK, employee)
}

/// Handler for PUT /api/admin/salaries/update-monthly-leaves.
///
/// Sets one month's bulk leave on every operational employee of the
/// caller's company.
async fn bulk_leave_handler(
    State(state): State<AppState>,
    scope: CompanyScope,
    payload: Result<Json<BulkLeaveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %scope.company,
        "Processing bulk leave request"
    );

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    let command = match validate_bulk_leave(&request) {
        Ok(command) => command,
        Err(err) => return error_response(correlation_id, err),
    };

    let modified_count = match state
        .employees()
        .apply_bulk_leave(&scope.company, &command)
        .await
    {
        Ok(count) => count,
        Err(err) => return error_response(correlation_id, err.into()),
    };

    info!(
        correlation_id = %correlation_id,
        month_year = %command.month,
        leaves = %command.leaves,
        modified_count,
        "Bulk leaves applied"
    );
    json_response(
        StatusCode::OK,
        BulkLeaveResponse {
            message: format!(
                "Monthly leaves set to {} for {} employees",
                command.leaves, modified_count
            ),
            modified_count,
            month_year: command.month.to_string(),
        },
    )
}

/// Handler for POST /api/visits/check-in.
///
/// Opens a new active visit for the caller. The check-in time defaults to
/// the server clock.
async fn check_in_handler(
    State(state): State<AppState>,
    scope: CompanyScope,
    payload: Result<Json<CheckIn>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let email = match scope.require_user_email() {
        Ok(email) => email.to_string(),
        Err(rejection) => return rejection.into_response(),
    };

    let mut check_in = match payload {
        Ok(Json(check_in)) => check_in,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    check_in.time.get_or_insert_with(Utc::now);

    let visit = Visit::open(
        Uuid::new_v4().to_string(),
        scope.company.clone(),
        email,
        check_in,
    );
    if let Err(err) = state.visits().insert_visit(visit.clone()).await {
        return error_response(correlation_id, err.into());
    }

    info!(
        correlation_id = %correlation_id,
        company_id = %scope.company,
        visit_id = %visit.id,
        "Visit checked in"
    );
    json_response(StatusCode::CREATED, visit)
}

/// Handler for PUT /api/visits/check-out.
///
/// Completes the caller's most recent active visit.
async fn check_out_handler(
    State(state): State<AppState>,
    scope: CompanyScope,
    payload: Result<Json<CheckOut>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let email = match scope.require_user_email() {
        Ok(email) => email.to_string(),
        Err(rejection) => return rejection.into_response(),
    };

    let mut check_out = match payload {
        Ok(Json(check_out)) => check_out,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    check_out.time.get_or_insert_with(Utc::now);

    match state
        .visits()
        .complete_latest_visit(&scope.company, &email, check_out)
        .await
    {
        Ok(Some(visit)) => {
            info!(
                correlation_id = %correlation_id,
                company_id = %scope.company,
                visit_id = %visit.id,
                duration_minutes = %visit.duration_minutes(),
                "Visit checked out"
            );
            json_response(StatusCode::OK, visit)
        }
        Ok(None) => error_response(correlation_id, PayrollError::NoActiveVisit { email }),
        Err(err) => error_response(correlation_id, err.into()),
    }
}
