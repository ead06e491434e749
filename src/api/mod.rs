//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for the monthly salary report,
//! salary profile updates, bulk leave broadcasts and visit check-in/out.
//! Every route is scoped to the caller's company.

mod handlers;
mod request;
mod response;
mod scope;
mod state;

pub use handlers::create_router;
pub use request::SalaryInfoQuery;
pub use response::{ApiError, ApiErrorResponse, BulkLeaveResponse, HealthResponse};
pub use scope::{COMPANY_HEADER, CompanyScope, USER_EMAIL_HEADER};
pub use state::AppState;
