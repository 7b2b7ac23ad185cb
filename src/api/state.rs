//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::repository::InMemoryStore;
use crate::service::PayrollService;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the payroll service and its backing store.
#[derive(Clone)]
pub struct AppState {
    service: PayrollService,
}

impl AppState {
    /// Creates a new application state around a payroll service.
    pub fn new(service: PayrollService) -> Self {
        Self { service }
    }

    /// Creates a state backed by an in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>, config: &ConfigLoader) -> Self {
        Self::new(PayrollService::in_memory(store, config))
    }

    /// Returns the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
