//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{EmployeeStore, InMemoryStore, VisitStore};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers:
/// the loaded payroll configuration and the two stores.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    employees: Arc<dyn EmployeeStore>,
    visits: Arc<dyn VisitStore>,
}

impl AppState {
    /// Creates a new application state from a configuration and stores.
    pub fn new(
        config: ConfigLoader,
        employees: Arc<dyn EmployeeStore>,
        visits: Arc<dyn VisitStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            employees,
            visits,
        }
    }

    /// Creates a state backed by a single in-memory store.
    pub fn in_memory(config: ConfigLoader, store: Arc<InMemoryStore>) -> Self {
        Self::new(config, store.clone(), store)
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the employee store.
    pub fn employees(&self) -> &dyn EmployeeStore {
        self.employees.as_ref()
    }

    /// Returns the visit store.
    pub fn visits(&self) -> &dyn VisitStore {
        self.visits.as_ref()
    }
}
