//! Attendance and payroll engine for multi-tenant HR backends.
//!
//! This crate turns geotagged check-in/check-out visits into paid days and
//! computes monthly salary figures from each employee's pay configuration:
//! gross pay, statutory contributions, cost to company and net pay. It also
//! exposes the REST surface that drives those computations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
