//! Calculation logic for the payroll engine.
//!
//! This module contains the attendance aggregator that turns visits into
//! paid days, statutory contribution resolution, the monthly salary
//! calculator, the report filter policy, partial salary profile updates and
//! bulk leave validation.

mod attendance;
mod bulk_leave;
mod contributions;
mod report;
mod salary;
mod salary_update;

pub use attendance::{DayCredit, aggregate_attendance, classify_visit, counts_towards};
pub use bulk_leave::{BulkLeaveCommand, BulkLeaveRequest, validate_bulk_leave};
pub use contributions::{resolve_contribution, resolve_contributions};
pub use report::{build_monthly_report, calculate_employee, is_payroll_relevant};
pub use salary::{calculate_salary, daily_rate_divisor, round_money};
pub use salary_update::{SalaryUpdate, apply_salary_update, parse_leave_mutation};
