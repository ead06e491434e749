//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! default, so a partial file only overrides what it names.

use rust_decimal::Decimal;
use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Company calendar used to place visits into months.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Offset of the company's local time from UTC, in minutes.
    pub utc_offset_minutes: i32,
}

/// Visit-duration thresholds for day credits.
///
/// Durations are measured in minutes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttendanceThresholds {
    /// Minimum duration credited as a full day.
    pub full_day_minutes: Decimal,
    /// Minimum duration credited as a half day.
    pub half_day_minutes: Decimal,
}

impl Default for AttendanceThresholds {
    fn default() -> Self {
        Self {
            full_day_minutes: Decimal::from(5),
            half_day_minutes: Decimal::from(2),
        }
    }
}

/// How the daily rate divisor is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyRateDivisor {
    /// A fixed number of working days per month.
    #[default]
    FixedWorkingDays,
    /// The calendar days of the target month.
    CalendarDays,
}

/// Which pay figure CTC is built on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtcBase {
    /// Monthly base salary ("salary in hand").
    #[default]
    SalaryInHand,
    /// Basic pay.
    BasicPay,
}

/// Salary formula policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SalaryPolicy {
    /// Daily rate divisor mode.
    pub daily_rate_divisor: DailyRateDivisor,
    /// Working days per month used by [`DailyRateDivisor::FixedWorkingDays`].
    pub working_days_per_month: u32,
    /// Count reimbursements in gross salary; otherwise they are added to net.
    pub reimbursements_in_gross: bool,
    /// Base figure for CTC.
    pub ctc_base: CtcBase,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self {
            daily_rate_divisor: DailyRateDivisor::FixedWorkingDays,
            working_days_per_month: 26,
            reimbursements_in_gross: true,
            ctc_base: CtcBase::SalaryInHand,
        }
    }
}

/// Default statutory contribution percentages of monthly base salary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatutoryRates {
    /// Employer provident fund, percent.
    pub employer_pf_percent: Decimal,
    /// Employer health insurance, percent.
    pub employer_health_insurance_percent: Decimal,
    /// Employee provident fund, percent.
    pub employee_pf_percent: Decimal,
    /// Employee health insurance, percent.
    pub employee_health_insurance_percent: Decimal,
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            employer_pf_percent: Decimal::from(12),
            employer_health_insurance_percent: Decimal::new(325, 2),
            employee_pf_percent: Decimal::from(12),
            employee_health_insurance_percent: Decimal::new(75, 2),
        }
    }
}

/// Startup data for the in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file of employees and visits loaded at startup, if any.
    pub seed_path: Option<String>,
}

/// The complete payroll configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Server settings.
    pub server: ServerConfig,
    /// Company calendar.
    pub calendar: CalendarConfig,
    /// Day-credit thresholds.
    pub attendance: AttendanceThresholds,
    /// Salary formula policy.
    pub salary: SalaryPolicy,
    /// Statutory contribution rates.
    pub statutory_rates: StatutoryRates,
    /// Store startup data.
    pub store: StoreConfig,
}
