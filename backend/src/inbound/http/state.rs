//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain service, never on a concrete storage adapter. The
//! server decides at startup whether that service is backed by MongoDB or by
//! the disconnected repository.

use crate::domain::EmployeeService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Employee use-cases shared by every handler.
    pub employees: EmployeeService,
}

impl HttpState {
    /// Construct state around the employee service.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use employee_api::domain::EmployeeService;
    /// use employee_api::domain::ports::DisconnectedEmployeeRepository;
    /// use employee_api::inbound::http::state::HttpState;
    ///
    /// let service = EmployeeService::new(
    ///     Arc::new(DisconnectedEmployeeRepository),
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let state = HttpState::new(service);
    /// assert!(!state.employees.is_connected());
    /// ```
    pub fn new(employees: EmployeeService) -> Self {
        Self { employees }
    }
}
