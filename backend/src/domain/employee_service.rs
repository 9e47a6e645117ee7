//! Employee record use-cases.
//!
//! The service owns request validation and translates repository failures
//! into domain [`Error`] values; HTTP handlers only parse input and render
//! output.

use std::sync::Arc;

use mockable::Clock;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::domain::ports::{EmployeePersistenceError, EmployeeRepository};
use crate::domain::{
    Employee, EmployeeChanges, EmployeeDraft, EmployeeId, Error, first_missing_field,
};

/// Message returned whenever the document store is not connected.
pub const DATABASE_NOT_CONNECTED: &str = "Database not connected";

/// Message returned when an identifier matches no record.
pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found";

/// Service implementing create/read/update/delete over employee records.
#[derive(Clone)]
pub struct EmployeeService {
    repository: Arc<dyn EmployeeRepository>,
    clock: Arc<dyn Clock>,
}

impl EmployeeService {
    /// Create a service over the given repository.
    ///
    /// `clock` supplies the default `hire_date` for new records.
    pub fn new(repository: Arc<dyn EmployeeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Whether the backing document store is connected.
    pub fn is_connected(&self) -> bool {
        self.repository.is_connected()
    }

    /// Fail with a 503-class error unless storage is connected.
    ///
    /// Every operation checks this ahead of any input validation.
    pub fn ensure_connected(&self) -> Result<(), Error> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(Error::service_unavailable(DATABASE_NOT_CONNECTED))
        }
    }

    /// List every stored record.
    pub async fn list(&self) -> Result<Vec<Employee>, Error> {
        self.ensure_connected()?;
        self.repository.find_all().await.map_err(map_persistence_error)
    }

    /// Fetch one record by identifier.
    pub async fn get(&self, raw_id: &str) -> Result<Employee, Error> {
        self.ensure_connected()?;
        let id = parse_id(raw_id)?;
        self.repository
            .find_by_id(&id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(EMPLOYEE_NOT_FOUND))
    }

    /// Validate and persist a new record, returning it as stored.
    pub async fn create(&self, payload: &Value) -> Result<Employee, Error> {
        self.ensure_connected()?;
        let payload = as_object(payload)?;
        if let Some(field) = first_missing_field(payload) {
            debug!(%field, "rejecting employee without required field");
            return Err(
                Error::invalid_request(format!("Missing required field: {field}"))
                    .with_details(json!({ "field": field.as_str() })),
            );
        }

        let draft = EmployeeDraft::from_payload(payload, self.clock.utc().date_naive());
        let id = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_persistence_error)?;
        debug!(employee_id = %id, "employee created");

        self.reload(&id).await
    }

    /// Apply a partial update and return the record as stored afterwards.
    ///
    /// The identifier and unknown keys in `payload` are ignored.
    pub async fn update(&self, raw_id: &str, payload: &Value) -> Result<Employee, Error> {
        self.ensure_connected()?;
        let id = parse_id(raw_id)?;
        let changes = EmployeeChanges::from_payload(as_object(payload)?);
        let matched = self
            .repository
            .update_by_id(&id, &changes)
            .await
            .map_err(map_persistence_error)?;
        if !matched {
            return Err(Error::not_found(EMPLOYEE_NOT_FOUND));
        }
        debug!(employee_id = %id, fields = changes.len(), "employee updated");

        self.reload(&id).await
    }

    /// Remove a record.
    pub async fn delete(&self, raw_id: &str) -> Result<(), Error> {
        self.ensure_connected()?;
        let id = parse_id(raw_id)?;
        let deleted = self
            .repository
            .delete_by_id(&id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            return Err(Error::not_found(EMPLOYEE_NOT_FOUND));
        }
        debug!(employee_id = %id, "employee deleted");
        Ok(())
    }

    // A record that vanished between the write and the read is reported as
    // missing rather than as a server fault.
    async fn reload(&self, id: &EmployeeId) -> Result<Employee, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(EMPLOYEE_NOT_FOUND))
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, Error> {
    payload
        .as_object()
        .ok_or_else(|| Error::invalid_request("Request body must be a JSON object"))
}

fn parse_id(raw: &str) -> Result<EmployeeId, Error> {
    EmployeeId::new(raw).map_err(|err| Error::internal(err.to_string()))
}

fn map_persistence_error(error: EmployeePersistenceError) -> Error {
    match error {
        EmployeePersistenceError::Unavailable { message } => {
            debug!(%message, "employee storage unavailable");
            Error::service_unavailable(DATABASE_NOT_CONNECTED)
        }
        EmployeePersistenceError::InvalidIdentifier { message } => {
            warn!(%message, "malformed employee identifier");
            Error::internal(message)
        }
        EmployeePersistenceError::Query { message } => {
            warn!(%message, "employee storage query failed");
            Error::internal(message)
        }
    }
}
