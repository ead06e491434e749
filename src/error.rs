//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can surface to a caller. Computation itself
//! never fails on incomplete records; only validation, lookup, storage and
//! configuration problems produce errors.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request field was missing or malformed.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A human-readable explanation.
        message: String,
    },

    /// The employee does not exist within the caller's company.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The requested employee id.
        employee_id: String,
    },

    /// A check-out was attempted without an active visit.
    #[error("No active visit found for '{email}'")]
    NoActiveVisit {
        /// Login identity of the employee.
        email: String,
    },

    /// The underlying store rejected or failed an operation.
    #[error("Storage error: {message}")]
    Storage {
        /// The store's own message, kept for operator diagnosis.
        message: String,
    },
}

impl PayrollError {
    /// Shorthand for a [`PayrollError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
