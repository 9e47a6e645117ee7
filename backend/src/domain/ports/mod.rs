//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_repository;

pub use employee_repository::{
    DisconnectedEmployeeRepository, EmployeePersistenceError, EmployeeRepository,
};
