//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod leave;
pub mod lenient;
mod pay_month;
mod visit;

pub use calculation_result::{
    AttendanceSummary, Contribution, ContributionBreakdown, ContributionSource,
    EmployeeSalaryInfo, SalaryCalculation,
};
pub use employee::{
    CompanyId, DatedLineItem, Employee, LineItem, MAX_AMOUNT, Role, SalaryProfile,
};
pub use leave::{LeaveLedger, MAX_LEAVE_DAYS};
pub use pay_month::{InvalidMonthYear, MAX_PAY_YEAR, MIN_PAY_YEAR, PayMonth};
pub use visit::{CheckIn, CheckOut, GeoPoint, Visit, VisitStatus};
