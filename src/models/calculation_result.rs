//! Calculation result models.
//!
//! This module contains the [`AttendanceSummary`] produced by the attendance
//! aggregator and the [`SalaryCalculation`] produced by the salary
//! calculator. Every intermediate figure is kept so each step of a payroll
//! run can be inspected on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// Paid-day breakdown for one employee and month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceSummary;
/// use rust_decimal::Decimal;
///
/// let summary = AttendanceSummary {
///     full_days: 20,
///     half_days: 2,
///     actual_working_days: Decimal::from(21),
///     bulk_monthly_leaves: Decimal::from(4),
///     individual_paid_leaves: Decimal::new(15, 1),
///     paid_days: Decimal::new(265, 1),
///     total_actual_working_hours: Decimal::new(16250, 2),
/// };
/// assert_eq!(
///     summary.paid_days,
///     summary.actual_working_days + summary.bulk_monthly_leaves + summary.individual_paid_leaves
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    /// Visits credited as a full day.
    pub full_days: u32,
    /// Visits credited as a half day.
    pub half_days: u32,
    /// `full_days + 0.5 × half_days`.
    pub actual_working_days: Decimal,
    /// Bulk leaves recorded for the month.
    pub bulk_monthly_leaves: Decimal,
    /// Individual paid leaves recorded for the month.
    pub individual_paid_leaves: Decimal,
    /// Working days plus both leave kinds.
    pub paid_days: Decimal,
    /// Total duration of all counted visits, in hours.
    pub total_actual_working_hours: Decimal,
}

/// Where a statutory contribution amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    /// Stored on the employee profile.
    Explicit,
    /// Derived from the configured percentage of base salary.
    Derived,
}

/// A single statutory contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Monthly amount.
    pub amount: Decimal,
    /// How the amount was obtained.
    pub source: ContributionSource,
}

/// Employer and employee statutory contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionBreakdown {
    /// Employer provident fund.
    pub employer_pf: Contribution,
    /// Employer health insurance.
    pub employer_health_insurance: Contribution,
    /// Employee provident fund.
    pub employee_pf: Contribution,
    /// Employee health insurance.
    pub employee_health_insurance: Contribution,
}

impl ContributionBreakdown {
    /// Employer-side total.
    pub fn employer_total(&self) -> Decimal {
        self.employer_pf.amount + self.employer_health_insurance.amount
    }

    /// Employee-side total.
    pub fn employee_total(&self) -> Decimal {
        self.employee_pf.amount + self.employee_health_insurance.amount
    }
}

/// The complete salary computation for one employee and month.
///
/// Monetary fields are rounded to two decimal places; they are derived from
/// unrounded intermediates, so totals may differ from sums of the rounded
/// parts by a cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryCalculation {
    /// Month key the calculation is for.
    pub month_year: String,
    /// Calendar days in the month.
    pub total_days_in_month: u32,
    /// Divisor used to derive the daily rate.
    pub daily_rate_divisor: Decimal,
    /// Paid-day breakdown.
    pub attendance: AttendanceSummary,
    /// Monthly base salary the calculation started from.
    pub monthly_base_salary: Decimal,
    /// Base salary per paid day.
    pub daily_rate: Decimal,
    /// `paid_days × daily_rate`.
    pub attendance_adjusted_salary: Decimal,
    /// Fixed allowances from the profile.
    pub fixed_allowances: Decimal,
    /// Incentive from the profile.
    pub incentive: Decimal,
    /// Sum of allowance line items.
    pub total_allowances: Decimal,
    /// Sum of other-deduction line items.
    pub total_other_deductions: Decimal,
    /// Sum of reimbursement line items.
    pub total_reimbursements: Decimal,
    /// Whether reimbursements were counted in gross salary.
    pub reimbursements_in_gross: bool,
    /// Statutory contributions.
    pub contributions: ContributionBreakdown,
    /// Employee PF plus employee health insurance plus other deductions.
    pub total_deductions: Decimal,
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Cost to company.
    pub calculated_ctc: Decimal,
    /// Net salary before any manual override.
    pub computed_net_salary: Decimal,
    /// Net salary payable.
    pub net_salary: Decimal,
    /// True when the manual override replaced the computed net salary.
    pub override_applied: bool,
}

/// An employee profile merged with its calculation, as returned by the
/// salary-info endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalaryInfo {
    /// The stored profile.
    #[serde(flatten)]
    pub employee: Employee,
    /// The calculation for the requested month.
    pub calculated: SalaryCalculation,
}
