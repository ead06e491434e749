//! Monthly salary calculation.
//!
//! This module turns a paid-day count and a salary profile into gross pay,
//! statutory contributions, cost to company and net pay. All arithmetic is
//! done at full decimal precision; monetary figures are rounded to two places
//! only when the result is assembled.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{CtcBase, DailyRateDivisor, SalaryPolicy, StatutoryRates};
use crate::models::{
    AttendanceSummary, Contribution, ContributionBreakdown, MAX_AMOUNT, PayMonth, SalaryCalculation,
    SalaryProfile,
};

use super::contributions::resolve_contributions;

/// Rounds a monetary amount to two decimal places, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the divisor used to turn a monthly salary into a daily rate.
pub fn daily_rate_divisor(month: PayMonth, policy: &SalaryPolicy) -> Decimal {
    match policy.daily_rate_divisor {
        DailyRateDivisor::FixedWorkingDays => Decimal::from(policy.working_days_per_month),
        DailyRateDivisor::CalendarDays => Decimal::from(month.days_in_month()),
    }
}

fn round_contribution(contribution: Contribution) -> Contribution {
    Contribution {
        amount: round_money(contribution.amount),
        source: contribution.source,
    }
}

/// Calculates one employee's salary for a month.
///
/// The steps, in order:
///
/// 1. `daily_rate = monthly_base_salary / divisor`
/// 2. `attendance_adjusted_salary = paid_days × daily_rate`
/// 3. Contributions are resolved (explicit or percentage of base)
/// 4. `gross = attendance_adjusted_salary + fixed_allowances + incentive +
///    total_allowances`, plus reimbursements when they count in gross
/// 5. `ctc = ctc_base + employer contributions + fixed_allowances +
///    total_allowances`
/// 6. `net = gross − employee contributions − other deductions`, plus
///    reimbursements when they do not count in gross
/// 7. A non-negative manual override replaces net
///
/// Monetary inputs and paid days are capped to [`MAX_AMOUNT`] first, so no
/// stored profile can overflow the arithmetic.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_salary;
/// use payroll_engine::config::{SalaryPolicy, StatutoryRates};
/// use payroll_engine::models::{AttendanceSummary, PayMonth, SalaryProfile};
/// use rust_decimal::Decimal;
///
/// let profile = SalaryProfile {
///     salary_in_hand_per_month: Decimal::from(30000),
///     ..SalaryProfile::default()
/// };
/// let attendance = AttendanceSummary {
///     bulk_monthly_leaves: Decimal::from(26),
///     paid_days: Decimal::from(26),
///     ..AttendanceSummary::default()
/// };
/// let june = PayMonth::new(6, 2024).unwrap();
///
/// let result = calculate_salary(
///     &profile,
///     attendance,
///     june,
///     &SalaryPolicy::default(),
///     &StatutoryRates::default(),
/// );
/// assert_eq!(result.attendance_adjusted_salary, Decimal::from(30000));
/// ```
pub fn calculate_salary(
    profile: &SalaryProfile,
    attendance: AttendanceSummary,
    month: PayMonth,
    policy: &SalaryPolicy,
    rates: &StatutoryRates,
) -> SalaryCalculation {
    let profile = &profile.within_limits();
    let paid_days = attendance.paid_days.clamp(Decimal::ZERO, MAX_AMOUNT);
    let monthly_base_salary = profile.salary_in_hand_per_month;
    let divisor = daily_rate_divisor(month, policy);
    let daily_rate = if divisor > Decimal::ZERO {
        monthly_base_salary / divisor
    } else {
        Decimal::ZERO
    };
    let attendance_adjusted_salary = paid_days * daily_rate;

    let total_allowances = profile.total_allowances();
    let total_other_deductions = profile.total_other_deductions();
    let total_reimbursements = profile.total_reimbursements();
    let contributions = resolve_contributions(profile, rates);

    let mut gross_salary = attendance_adjusted_salary
        + profile.fixed_allowances
        + profile.incentive
        + total_allowances;
    if policy.reimbursements_in_gross {
        gross_salary += total_reimbursements;
    }

    let ctc_base = match policy.ctc_base {
        CtcBase::SalaryInHand => monthly_base_salary,
        CtcBase::BasicPay => profile.basic_pay,
    };
    let calculated_ctc =
        ctc_base + contributions.employer_total() + profile.fixed_allowances + total_allowances;

    let total_deductions = contributions.employee_total() + total_other_deductions;
    let mut computed_net_salary = gross_salary - total_deductions;
    if !policy.reimbursements_in_gross {
        computed_net_salary += total_reimbursements;
    }

    let computed_net_salary = round_money(computed_net_salary);
    let (net_salary, override_applied) = match profile.effective_override() {
        Some(value) => (round_money(value), true),
        None => (computed_net_salary, false),
    };

    SalaryCalculation {
        month_year: month.to_string(),
        total_days_in_month: month.days_in_month(),
        daily_rate_divisor: divisor,
        attendance,
        monthly_base_salary: round_money(monthly_base_salary),
        daily_rate: round_money(daily_rate),
        attendance_adjusted_salary: round_money(attendance_adjusted_salary),
        fixed_allowances: round_money(profile.fixed_allowances),
        incentive: round_money(profile.incentive),
        total_allowances: round_money(total_allowances),
        total_other_deductions: round_money(total_other_deductions),
        total_reimbursements: round_money(total_reimbursements),
        reimbursements_in_gross: policy.reimbursements_in_gross,
        contributions: ContributionBreakdown {
            employer_pf: round_contribution(contributions.employer_pf),
            employer_health_insurance: round_contribution(contributions.employer_health_insurance),
            employee_pf: round_contribution(contributions.employee_pf),
            employee_health_insurance: round_contribution(contributions.employee_health_insurance),
        },
        total_deductions: round_money(total_deductions),
        gross_salary: round_money(gross_salary),
        calculated_ctc: round_money(calculated_ctc),
        computed_net_salary,
        net_salary,
        override_applied,
    }
}
