//! Bulk leave broadcast.
//!
//! A bulk leave request sets one month's entry in the company-wide leave
//! ledger of every operational employee. Validation happens up front so an
//! invalid request never touches any profile.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{PayrollError, PayrollResult};
use crate::models::lenient::parse_decimal;
use crate::models::{LeaveLedger, MAX_LEAVE_DAYS, MAX_PAY_YEAR, MIN_PAY_YEAR, PayMonth};

/// Raw bulk leave request body.
///
/// Fields are kept as raw JSON so that every kind of bad input surfaces as
/// a field-level validation error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BulkLeaveRequest {
    /// Month, 1–12.
    pub month: Option<Value>,
    /// Four-digit year.
    pub year: Option<Value>,
    /// Leave count to set.
    pub leaves: Option<Value>,
}

/// A validated bulk leave broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkLeaveCommand {
    /// Target month.
    pub month: PayMonth,
    /// Leave count written for that month.
    pub leaves: Decimal,
}

impl BulkLeaveCommand {
    /// Writes the leave count into a bulk ledger, replacing any previous
    /// value for the month.
    pub fn apply_to_ledger(&self, ledger: &mut LeaveLedger) {
        ledger.set(self.month, self.leaves);
    }
}

fn integer_field(value: Option<&Value>, field: &str) -> PayrollResult<i64> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| PayrollError::validation(field, "is required"))?;
    let number = parse_decimal(value)
        .ok_or_else(|| PayrollError::validation(field, format!("'{}' is not a number", value)))?;
    if !number.fract().is_zero() {
        return Err(PayrollError::validation(
            field,
            format!("{} is not an integer", number),
        ));
    }
    number
        .to_i64()
        .ok_or_else(|| PayrollError::validation(field, format!("{} is out of range", number)))
}

/// Validates a bulk leave request.
///
/// # Errors
///
/// Returns [`PayrollError::Validation`] naming the first offending field when:
/// - `month` is missing, not an integer, or outside 1–12
/// - `year` is missing, not an integer, or outside 1970–9999
/// - `leaves` is missing, not a number, or negative
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{BulkLeaveRequest, validate_bulk_leave};
/// use rust_decimal::Decimal;
///
/// let request: BulkLeaveRequest =
///     serde_json::from_str(r#"{"month": "6", "year": 2024, "leaves": 2.5}"#).unwrap();
/// let command = validate_bulk_leave(&request).unwrap();
/// assert_eq!(command.month.to_string(), "6-2024");
/// assert_eq!(command.leaves, Decimal::new(25, 1));
/// ```
pub fn validate_bulk_leave(request: &BulkLeaveRequest) -> PayrollResult<BulkLeaveCommand> {
    let month = integer_field(request.month.as_ref(), "month")?;
    if !(1..=12).contains(&month) {
        return Err(PayrollError::validation(
            "month",
            format!("{} is outside 1-12", month),
        ));
    }

    let year = integer_field(request.year.as_ref(), "year")?;
    if !(i64::from(MIN_PAY_YEAR)..=i64::from(MAX_PAY_YEAR)).contains(&year) {
        return Err(PayrollError::validation(
            "year",
            format!("{} is outside {}-{}", year, MIN_PAY_YEAR, MAX_PAY_YEAR),
        ));
    }

    let leaves = request
        .leaves
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or_else(|| PayrollError::validation("leaves", "is required"))?;
    let leaves = parse_decimal(leaves)
        .ok_or_else(|| PayrollError::validation("leaves", format!("'{}' is not a number", leaves)))?;
    if leaves < Decimal::ZERO {
        return Err(PayrollError::validation(
            "leaves",
            format!("{} must not be negative", leaves),
        ));
    }
    if leaves > MAX_LEAVE_DAYS {
        return Err(PayrollError::validation(
            "leaves",
            format!("{} exceeds {} days", leaves, MAX_LEAVE_DAYS),
        ));
    }

    let month = PayMonth::new(month as u32, year as i32)
        .ok_or_else(|| PayrollError::validation("month", "invalid month-year"))?;

    Ok(BulkLeaveCommand { month, leaves })
}
