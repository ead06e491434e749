//! Configuration loading and management for the payroll engine.
//!
//! This module loads the payroll configuration from a YAML file: server
//! settings, the company calendar, attendance thresholds, the salary formula
//! policy, the default statutory contribution rates and the store seed file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Working days: {}", config.config().salary.working_days_per_month);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceThresholds, CalendarConfig, CtcBase, DailyRateDivisor, PayrollConfig, SalaryPolicy,
    ServerConfig, StatutoryRates, StoreConfig,
};
