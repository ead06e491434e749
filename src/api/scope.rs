//! Company scope extraction.
//!
//! Authentication happens upstream; the gateway forwards the caller's
//! company and login identity as headers. Every handler takes a
//! [`CompanyScope`] so no route can run unscoped.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::models::CompanyId;

use super::response::{ApiError, ApiErrorResponse};

/// Header carrying the caller's company id.
pub const COMPANY_HEADER: &str = "x-company-id";

/// Header carrying the caller's login email.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The caller's tenant and, when forwarded, login identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyScope {
    /// Company every query and mutation is restricted to.
    pub company: CompanyId,
    /// Login email of the caller, if forwarded.
    pub user_email: Option<String>,
}

impl CompanyScope {
    /// Returns the caller's login email, or a 401 if it was not forwarded.
    pub fn require_user_email(&self) -> Result<&str, ApiErrorResponse> {
        self.user_email
            .as_deref()
            .ok_or_else(|| ApiErrorResponse::unauthorized(ApiError::missing_scope(USER_EMAIL_HEADER)))
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CompanyScope
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(company) = header_value(parts, COMPANY_HEADER) else {
            warn!(uri = %parts.uri, "Request without company scope");
            return Err(ApiErrorResponse::unauthorized(ApiError::missing_scope(
                COMPANY_HEADER,
            )));
        };

        Ok(CompanyScope {
            company: CompanyId::new(company),
            user_email: header_value(parts, USER_EMAIL_HEADER),
        })
    }
}
