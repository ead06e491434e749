//! In-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::calculation::{BulkLeaveCommand, SalaryUpdate, apply_salary_update};
use crate::models::{CheckOut, CompanyId, Employee, Visit, VisitStatus};

use super::{EmployeeStore, StoreError, StoreResult, VisitStore};

/// Process-local store backing both traits.
///
/// Employees are keyed by id; visits are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<BTreeMap<String, Employee>>,
    visits: RwLock<Vec<Visit>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn operational_employees(&self, company: &CompanyId) -> StoreResult<Vec<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees
            .values()
            .filter(|e| &e.company_id == company && e.role.is_operational())
            .cloned()
            .collect())
    }

    async fn find_employee(&self, company: &CompanyId, id: &str) -> StoreResult<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees
            .get(id)
            .filter(|e| &e.company_id == company)
            .cloned())
    }

    async fn save_employee(&self, employee: Employee) -> StoreResult<()> {
        let mut employees = self.employees.write().await;

        let owned_elsewhere = employees
            .get(&employee.id)
            .is_some_and(|existing| existing.company_id != employee.company_id);
        if owned_elsewhere {
            return Err(StoreError::Duplicate(format!(
                "employee id '{}' belongs to another company",
                employee.id
            )));
        }

        let email_taken = employees.values().any(|other| {
            other.id != employee.id
                && other.company_id == employee.company_id
                && other.has_login(&employee.email)
        });
        if email_taken {
            return Err(StoreError::Duplicate(format!(
                "email '{}' already registered in company '{}'",
                employee.email, employee.company_id
            )));
        }

        employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    async fn update_salary(
        &self,
        company: &CompanyId,
        id: &str,
        update: SalaryUpdate,
    ) -> StoreResult<Option<(Employee, Vec<&'static str>)>> {
        let mut employees = self.employees.write().await;
        let Some(employee) = employees
            .get_mut(id)
            .filter(|e| &e.company_id == company)
        else {
            return Ok(None);
        };
        let applied = apply_salary_update(&mut employee.salary, update);
        Ok(Some((employee.clone(), applied)))
    }

    async fn apply_bulk_leave(
        &self,
        company: &CompanyId,
        command: &BulkLeaveCommand,
    ) -> StoreResult<usize> {
        let mut employees = self.employees.write().await;
        let mut modified = 0;
        for employee in employees
            .values_mut()
            .filter(|e| &e.company_id == company && e.role.is_operational())
        {
            command.apply_to_ledger(&mut employee.salary.monthly_leaves);
            modified += 1;
        }
        Ok(modified)
    }
}

#[async_trait]
impl VisitStore for InMemoryStore {
    async fn completed_visits(
        &self,
        company: &CompanyId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Visit>> {
        let visits = self.visits.read().await;
        Ok(visits
            .iter()
            .filter(|v| &v.company_id == company && v.status == VisitStatus::Completed)
            .filter(|v| {
                v.checked_in_at()
                    .is_some_and(|checked_in| checked_in >= from && checked_in <= to)
            })
            .cloned()
            .collect())
    }

    async fn insert_visit(&self, visit: Visit) -> StoreResult<()> {
        let mut visits = self.visits.write().await;
        if visits.iter().any(|v| v.id == visit.id) {
            return Err(StoreError::Duplicate(format!("visit id '{}'", visit.id)));
        }
        visits.push(visit);
        Ok(())
    }

    async fn complete_latest_visit(
        &self,
        company: &CompanyId,
        email: &str,
        check_out: CheckOut,
    ) -> StoreResult<Option<Visit>> {
        let mut visits = self.visits.write().await;
        let latest = visits
            .iter_mut()
            .enumerate()
            .filter(|(_, v)| {
                &v.company_id == company
                    && v.status == VisitStatus::Active
                    && v.employee_email.eq_ignore_ascii_case(email)
            })
            .max_by_key(|(index, v)| (v.checked_in_at(), *index))
            .map(|(_, v)| v);

        Ok(latest.map(|visit| {
            visit.complete(check_out);
            visit.clone()
        }))
    }
}
