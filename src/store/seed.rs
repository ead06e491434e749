//! Startup seed for the in-memory store.
//!
//! A seed file is a JSON document holding `employees` and `visits` arrays in
//! the stored document shape. Records go through the lenient model adapters,
//! so historical values such as numeric strings load the same way they do
//! from the API.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, Visit};

use super::{EmployeeStore, StoreResult, VisitStore};

/// Employees and visits to load at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    /// Employee profiles of any company.
    pub employees: Vec<Employee>,
    /// Visits of any company.
    pub visits: Vec<Visit>,
}

impl SeedData {
    /// Reads a seed file.
    ///
    /// # Returns
    ///
    /// Returns the parsed seed on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not a valid seed document (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_json::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Writes every record into `store`, employees first.
    ///
    /// Stops at the first record the store rejects, such as a login email
    /// already taken within a company.
    pub async fn apply<S>(self, store: &S) -> StoreResult<(usize, usize)>
    where
        S: EmployeeStore + VisitStore,
    {
        let counts = (self.employees.len(), self.visits.len());
        for employee in self.employees {
            debug!(employee_id = %employee.id, company = %employee.company_id.as_str(), "Seeding employee");
            store.save_employee(employee).await?;
        }
        for visit in self.visits {
            store.insert_visit(visit).await?;
        }
        Ok(counts)
    }
}
