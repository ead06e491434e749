//! Attendance aggregation functionality.
//!
//! This module turns an employee's completed visits for a month into paid
//! days. Each visit is credited as a full day, a half day or nothing based on
//! its duration; leave ledgers are then added on top.

use chrono::FixedOffset;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::AttendanceThresholds;
use crate::models::{AttendanceSummary, Employee, PayMonth, Visit, VisitStatus};

/// Day credit earned by a single visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCredit {
    /// Counts as one day.
    Full,
    /// Counts as half a day.
    Half,
    /// Too short to count.
    None,
}

impl DayCredit {
    /// The number of days this credit is worth.
    pub fn days(self) -> Decimal {
        match self {
            DayCredit::Full => Decimal::ONE,
            DayCredit::Half => Decimal::new(5, 1),
            DayCredit::None => Decimal::ZERO,
        }
    }
}

/// Classifies a visit duration against the configured thresholds.
///
/// Both thresholds are inclusive lower bounds.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{DayCredit, classify_visit};
/// use payroll_engine::config::AttendanceThresholds;
/// use rust_decimal::Decimal;
///
/// let thresholds = AttendanceThresholds::default();
/// assert_eq!(classify_visit(Decimal::from(10), &thresholds), DayCredit::Full);
/// assert_eq!(classify_visit(Decimal::from(3), &thresholds), DayCredit::Half);
/// assert_eq!(classify_visit(Decimal::from(1), &thresholds), DayCredit::None);
/// ```
pub fn classify_visit(duration_minutes: Decimal, thresholds: &AttendanceThresholds) -> DayCredit {
    if duration_minutes >= thresholds.full_day_minutes {
        DayCredit::Full
    } else if duration_minutes >= thresholds.half_day_minutes {
        DayCredit::Half
    } else {
        DayCredit::None
    }
}

/// Returns true if `visit` counts towards `employee`'s attendance for `month`.
///
/// The visit must belong to the employee's company and login, be completed,
/// and have been checked into on a day of `month` on the company calendar.
pub fn counts_towards(
    visit: &Visit,
    employee: &Employee,
    month: PayMonth,
    offset: FixedOffset,
) -> bool {
    visit.company_id == employee.company_id
        && employee.has_login(&visit.employee_email)
        && visit.status == VisitStatus::Completed
        && visit
            .checked_in_at()
            .is_some_and(|checked_in| month.contains(checked_in, offset))
}

/// Aggregates an employee's visits and leaves into an [`AttendanceSummary`].
///
/// Visits of other employees or other companies may be passed in; they are
/// skipped. Missing or malformed visit fields never cause a failure: such
/// visits simply earn no credit.
///
/// `paid_days` is always exactly
/// `actual_working_days + bulk_monthly_leaves + individual_paid_leaves`.
///
/// # Arguments
///
/// * `employee` - Whose attendance to aggregate
/// * `visits` - Candidate visits
/// * `month` - The pay month
/// * `offset` - The company calendar offset
/// * `thresholds` - Full and half day duration thresholds
pub fn aggregate_attendance<'a, I>(
    employee: &Employee,
    visits: I,
    month: PayMonth,
    offset: FixedOffset,
    thresholds: &AttendanceThresholds,
) -> AttendanceSummary
where
    I: IntoIterator<Item = &'a Visit>,
{
    let mut full_days = 0u32;
    let mut half_days = 0u32;
    let mut total_minutes = Decimal::ZERO;

    for visit in visits
        .into_iter()
        .filter(|visit| counts_towards(visit, employee, month, offset))
    {
        let minutes = visit.duration_minutes();
        total_minutes += minutes;
        match classify_visit(minutes, thresholds) {
            DayCredit::Full => full_days += 1,
            DayCredit::Half => half_days += 1,
            DayCredit::None => {}
        }
    }

    let actual_working_days =
        Decimal::from(full_days) + DayCredit::Half.days() * Decimal::from(half_days);
    let bulk_monthly_leaves = employee.salary.monthly_leaves.get(month);
    let individual_paid_leaves = employee.salary.individual_paid_leaves.get(month);

    AttendanceSummary {
        full_days,
        half_days,
        actual_working_days,
        bulk_monthly_leaves,
        individual_paid_leaves,
        paid_days: actual_working_days + bulk_monthly_leaves + individual_paid_leaves,
        total_actual_working_hours: (total_minutes / Decimal::from(60))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    }
}
