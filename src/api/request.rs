//! Request types for the payroll engine API.
//!
//! Bodies for the salary update and bulk leave endpoints live next to their
//! logic in [`crate::calculation`]; this module holds the query string of
//! the salary info endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{MAX_PAY_YEAR, MIN_PAY_YEAR, PayMonth};

/// Query string of `GET /api/admin/employees-salary-info`.
///
/// Both values are read as raw strings so that bad input becomes a
/// field-level validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryInfoQuery {
    /// Month, 1–12.
    pub month: Option<String>,
    /// Four-digit year.
    pub year: Option<String>,
}

impl SalaryInfoQuery {
    /// Validates the query into a [`PayMonth`].
    pub fn pay_month(&self) -> PayrollResult<PayMonth> {
        let month: u32 = parse_required(self.month.as_deref(), "month")?;
        if !(1..=12).contains(&month) {
            return Err(PayrollError::validation(
                "month",
                format!("{} is outside 1-12", month),
            ));
        }
        let year: i32 = parse_required(self.year.as_deref(), "year")?;
        PayMonth::new(month, year).ok_or_else(|| {
            PayrollError::validation(
                "year",
                format!("{} is outside {}-{}", year, MIN_PAY_YEAR, MAX_PAY_YEAR),
            )
        })
    }
}

fn parse_required<T: std::str::FromStr>(value: Option<&str>, field: &str) -> PayrollResult<T> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PayrollError::validation(field, "is required"))?;
    value
        .parse()
        .map_err(|_| PayrollError::validation(field, format!("'{}' is not an integer", value)))
}
