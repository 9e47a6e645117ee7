//! Domain primitives, use-cases and ports.
//!
//! Purpose: define the employee record model and the service that validates
//! requests against it, independently of HTTP and MongoDB. Adapters live in
//! `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - Employee, EmployeeDraft, EmployeeChanges, EmployeeId — record model.
//! - EmployeeService — create/read/update/delete use-cases.
//! - TraceId — request correlation identifier.

pub mod employee;
pub mod employee_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::employee::{
    Employee, EmployeeChanges, EmployeeDraft, EmployeeField, EmployeeId,
    EmployeeIdValidationError, HIRE_DATE_FORMAT, ID_FIELD, first_missing_field,
};
pub use self::employee_service::{DATABASE_NOT_CONNECTED, EMPLOYEE_NOT_FOUND, EmployeeService};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
