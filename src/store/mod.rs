//! Persistence seams for employee profiles and visits.
//!
//! Every operation takes the caller's [`CompanyId`] as a mandatory argument;
//! no store method can read or write across companies.
//!
//! ```text
//!   EmployeeStore   VisitStore        ◄── traits used by the HTTP layer
//!         \            /
//!          InMemoryStore              ◄── tokio RwLock-guarded maps
//!                ▲
//!             SeedData                ◄── JSON file loaded at startup
//! ```

mod memory;
mod seed;

pub use memory::InMemoryStore;
pub use seed::SeedData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::calculation::{BulkLeaveCommand, SalaryUpdate};
use crate::error::PayrollError;
use crate::models::{CheckOut, CompanyId, Employee, Visit};

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// The backing store could not complete the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for PayrollError {
    fn from(err: StoreError) -> Self {
        PayrollError::Storage {
            message: err.to_string(),
        }
    }
}

/// Employee profile persistence.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All operational (`user` role) employees of a company.
    async fn operational_employees(&self, company: &CompanyId) -> StoreResult<Vec<Employee>>;

    /// Looks up an employee by id within a company.
    async fn find_employee(&self, company: &CompanyId, id: &str) -> StoreResult<Option<Employee>>;

    /// Inserts or replaces an employee profile.
    ///
    /// Fails with [`StoreError::Duplicate`] if another employee of the same
    /// company already uses the login email, or if the id is owned by a
    /// different company.
    async fn save_employee(&self, employee: Employee) -> StoreResult<()>;

    /// Applies a partial salary update to one employee in a single write.
    ///
    /// Only the fields carried by `update` change; a concurrent bulk leave
    /// broadcast is never overwritten. Returns the stored employee and the
    /// names of the fields written, or `None` if the employee is not in the
    /// company.
    async fn update_salary(
        &self,
        company: &CompanyId,
        id: &str,
        update: SalaryUpdate,
    ) -> StoreResult<Option<(Employee, Vec<&'static str>)>>;

    /// Sets one month's bulk leave on every operational employee of a
    /// company as a single batch, returning how many profiles were written.
    ///
    /// The month key is fully overwritten; the last write wins.
    async fn apply_bulk_leave(
        &self,
        company: &CompanyId,
        command: &BulkLeaveCommand,
    ) -> StoreResult<usize>;
}

/// Visit persistence.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Completed visits of a company checked in within `[from, to]`.
    async fn completed_visits(
        &self,
        company: &CompanyId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Visit>>;

    /// Stores a newly opened visit.
    async fn insert_visit(&self, visit: Visit) -> StoreResult<()>;

    /// Completes the most recently checked-in active visit of an employee.
    ///
    /// Returns `None` when the employee has no active visit.
    async fn complete_latest_visit(
        &self,
        company: &CompanyId,
        email: &str,
        check_out: CheckOut,
    ) -> StoreResult<Option<Visit>>;
}
