//! Statutory contribution resolution.
//!
//! Each of the four statutory contributions is either stored explicitly on
//! the employee's profile or derived as a percentage of the monthly base
//! salary.

use rust_decimal::Decimal;

use crate::config::StatutoryRates;
use crate::models::{Contribution, ContributionBreakdown, ContributionSource, SalaryProfile};

/// Resolves one contribution: the explicit amount if set, otherwise
/// `base × percent / 100`.
///
/// The derived amount is not rounded.
pub fn resolve_contribution(explicit: Option<Decimal>, base: Decimal, percent: Decimal) -> Contribution {
    match explicit {
        Some(amount) => Contribution {
            amount,
            source: ContributionSource::Explicit,
        },
        None => Contribution {
            amount: base * percent / Decimal::ONE_HUNDRED,
            source: ContributionSource::Derived,
        },
    }
}

/// Resolves all four statutory contributions for a profile.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_contributions;
/// use payroll_engine::config::StatutoryRates;
/// use payroll_engine::models::{ContributionSource, SalaryProfile};
/// use rust_decimal::Decimal;
///
/// let profile = SalaryProfile {
///     salary_in_hand_per_month: Decimal::from(30000),
///     employee_pf: Some(Decimal::from(1800)),
///     ..SalaryProfile::default()
/// };
/// let breakdown = resolve_contributions(&profile, &StatutoryRates::default());
/// assert_eq!(breakdown.employer_pf.amount, Decimal::from(3600));
/// assert_eq!(breakdown.employer_pf.source, ContributionSource::Derived);
/// assert_eq!(breakdown.employee_pf.amount, Decimal::from(1800));
/// assert_eq!(breakdown.employee_pf.source, ContributionSource::Explicit);
/// ```
pub fn resolve_contributions(profile: &SalaryProfile, rates: &StatutoryRates) -> ContributionBreakdown {
    let base = profile.salary_in_hand_per_month;
    ContributionBreakdown {
        employer_pf: resolve_contribution(profile.employer_pf, base, rates.employer_pf_percent),
        employer_health_insurance: resolve_contribution(
            profile.employer_health_insurance,
            base,
            rates.employer_health_insurance_percent,
        ),
        employee_pf: resolve_contribution(profile.employee_pf, base, rates.employee_pf_percent),
        employee_health_insurance: resolve_contribution(
            profile.employee_health_insurance,
            base,
            rates.employee_health_insurance_percent,
        ),
    }
}
