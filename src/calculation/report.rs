//! Monthly salary report.
//!
//! This module ties attendance aggregation and salary calculation together
//! for every operational employee of a company, and decides which employees
//! belong on the report.

use std::collections::HashMap;

use crate::config::ConfigLoader;
use crate::models::{
    AttendanceSummary, Employee, EmployeeSalaryInfo, PayMonth, SalaryProfile, Visit,
};
use rust_decimal::Decimal;

use super::attendance::aggregate_attendance;
use super::salary::calculate_salary;

/// Returns true if an employee has anything to be paid for in the month.
///
/// An employee is left off the report only when all of the following are
/// zero or absent: paid days, fixed allowances, incentive, a non-negative
/// net salary override, reimbursements and allowances.
pub fn is_payroll_relevant(profile: &SalaryProfile, attendance: &AttendanceSummary) -> bool {
    attendance.paid_days > Decimal::ZERO
        || profile.fixed_allowances != Decimal::ZERO
        || profile.incentive != Decimal::ZERO
        || profile.effective_override().is_some()
        || profile.total_reimbursements() != Decimal::ZERO
        || profile.total_allowances() != Decimal::ZERO
}

/// Calculates one employee's salary for `month` from the given visits.
///
/// Visits belonging to other employees are ignored, so the full company
/// visit list may be passed.
pub fn calculate_employee<'a, I>(
    employee: &Employee,
    visits: I,
    month: PayMonth,
    loader: &ConfigLoader,
) -> EmployeeSalaryInfo
where
    I: IntoIterator<Item = &'a Visit>,
{
    let config = loader.config();
    let attendance = aggregate_attendance(
        employee,
        visits,
        month,
        loader.calendar_offset(),
        &config.attendance,
    );
    let calculated = calculate_salary(
        &employee.salary,
        attendance,
        month,
        &config.salary,
        &config.statutory_rates,
    );
    EmployeeSalaryInfo {
        employee: employee.clone(),
        calculated,
    }
}

/// Builds the monthly salary report.
///
/// Visits are grouped by login once, so each employee only sees their own;
/// employees failing [`is_payroll_relevant`] are dropped. Output order
/// follows the input order of `employees`.
pub fn build_monthly_report(
    employees: &[Employee],
    visits: &[Visit],
    month: PayMonth,
    loader: &ConfigLoader,
) -> Vec<EmployeeSalaryInfo> {
    let mut by_login: HashMap<String, Vec<&Visit>> = HashMap::new();
    for visit in visits {
        by_login
            .entry(visit.employee_email.to_ascii_lowercase())
            .or_default()
            .push(visit);
    }

    employees
        .iter()
        .map(|employee| {
            let own = by_login
                .get(&employee.email.to_ascii_lowercase())
                .into_iter()
                .flatten()
                .copied();
            calculate_employee(employee, own, month, loader)
        })
        .filter(|info| is_payroll_relevant(&info.employee.salary, &info.calculated.attendance))
        .collect()
}
