//! MongoDB persistence adapters.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   BSON documents and domain types. No business logic resides here.
//! - **Shared client**: [`MongoStore`] owns the driver's internally pooled
//!   client and is created once at startup.
//! - **Strongly typed errors**: driver errors are mapped to
//!   `EmployeePersistenceError` variants.
//!
//! # Example
//!
//! ```ignore
//! use employee_api::outbound::persistence::{MongoStore, StoreConfig};
//!
//! let store = MongoStore::connect(&StoreConfig::new("mongodb://localhost")).await?;
//! let repo = store.employees();
//! ```

mod mongo_employee_repository;
mod store;

pub use mongo_employee_repository::MongoEmployeeRepository;
pub(crate) use mongo_employee_repository::parse_object_id;
pub use store::{DEFAULT_DATABASE, EMPLOYEES_COLLECTION, MongoStore, StoreConfig, StoreError};
