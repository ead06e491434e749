//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file and validating it.

use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::{AttendanceThresholds, DailyRateDivisor, PayrollConfig, SalaryPolicy, StatutoryRates};

/// Largest accepted company calendar offset, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Loads and provides access to the payroll configuration.
///
/// # File Layout
///
/// ```text
/// server:
///   bind_addr: "0.0.0.0:8080"
/// calendar:
///   utc_offset_minutes: 330
/// attendance:
///   full_day_minutes: 5
///   half_day_minutes: 2
/// salary:
///   daily_rate_divisor: fixed_working_days   # or calendar_days
///   working_days_per_month: 26
///   reimbursements_in_gross: true
///   ctc_base: salary_in_hand                 # or basic_pay
/// statutory_rates:
///   employer_pf_percent: 12
///   employer_health_insurance_percent: 3.25
///   employee_pf_percent: 12
///   employee_health_insurance_percent: 0.75
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Binding to {}", loader.config().server.bind_addr);
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
    calendar_offset: FixedOffset,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or invalid values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content).map_err(|message| PayrollError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Parses and validates configuration from YAML text.
    fn from_yaml(content: &str) -> Result<Self, String> {
        let config: PayrollConfig = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        Self::validated(config)
    }

    /// Wraps an in-memory configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> PayrollResult<Self> {
        Self::validated(config).map_err(|message| PayrollError::ConfigParseError {
            path: "<in-memory>".to_string(),
            message,
        })
    }

    fn validated(config: PayrollConfig) -> Result<Self, String> {
        validate_thresholds(&config.attendance)?;
        validate_salary_policy(&config.salary)?;
        validate_rates(&config.statutory_rates)?;

        let offset_minutes = config.calendar.utc_offset_minutes;
        if offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(format!(
                "calendar.utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, offset_minutes
            ));
        }
        let calendar_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| format!("invalid calendar offset {}", offset_minutes))?;

        Ok(Self {
            config,
            calendar_offset,
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the company calendar offset.
    pub fn calendar_offset(&self) -> FixedOffset {
        self.calendar_offset
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config: PayrollConfig::default(),
            calendar_offset: Utc.fix(),
        }
    }
}

fn validate_thresholds(thresholds: &AttendanceThresholds) -> Result<(), String> {
    if thresholds.half_day_minutes < Decimal::ZERO {
        return Err("attendance.half_day_minutes must not be negative".to_string());
    }
    if thresholds.half_day_minutes > thresholds.full_day_minutes {
        return Err(format!(
            "attendance.half_day_minutes ({}) must not exceed full_day_minutes ({})",
            thresholds.half_day_minutes, thresholds.full_day_minutes
        ));
    }
    Ok(())
}

fn validate_salary_policy(policy: &SalaryPolicy) -> Result<(), String> {
    if policy.daily_rate_divisor == DailyRateDivisor::FixedWorkingDays
        && policy.working_days_per_month == 0
    {
        return Err("salary.working_days_per_month must be greater than zero".to_string());
    }
    Ok(())
}

fn validate_rates(rates: &StatutoryRates) -> Result<(), String> {
    let all = [
        ("employer_pf_percent", rates.employer_pf_percent),
        (
            "employer_health_insurance_percent",
            rates.employer_health_insurance_percent,
        ),
        ("employee_pf_percent", rates.employee_pf_percent),
        (
            "employee_health_insurance_percent",
            rates.employee_health_insurance_percent,
        ),
    ];
    match all
        .iter()
        .find(|(_, rate)| *rate < Decimal::ZERO || *rate > Decimal::ONE_HUNDRED)
    {
        Some((name, rate)) => Err(format!(
            "statutory_rates.{} must be within 0-100, got {}",
            name, rate
        )),
        None => Ok(()),
    }
}
