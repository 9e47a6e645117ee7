//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature). Nothing here is used by the server binary.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};

use crate::domain::ports::{
    DisconnectedEmployeeRepository, EmployeePersistenceError, EmployeeRepository,
};
use crate::domain::{Employee, EmployeeChanges, EmployeeDraft, EmployeeId, EmployeeService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::parse_object_id;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Clock reading 09:00 UTC on the given calendar day.
    ///
    /// Invalid dates fall back to the Unix epoch.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let instant = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or(DateTime::UNIX_EPOCH);
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// In-memory employee collection mirroring MongoDB semantics.
///
/// Identifiers are freshly generated `ObjectId`s, malformed identifiers are
/// rejected exactly as the MongoDB adapter rejects them, and listing returns
/// records in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmployeeRepository {
    records: Arc<Mutex<Vec<(ObjectId, Map<String, Value>)>>>,
}

impl InMemoryEmployeeRepository {
    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().map(|records| records.len()).unwrap_or_default()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, Vec<(ObjectId, Map<String, Value>)>>, EmployeePersistenceError>
    {
        self.records
            .lock()
            .map_err(|_| EmployeePersistenceError::query("in-memory collection poisoned"))
    }
}

fn to_employee(oid: &ObjectId, fields: &Map<String, Value>) -> Result<Employee, EmployeePersistenceError> {
    let id = EmployeeId::new(oid.to_hex())
        .map_err(|err| EmployeePersistenceError::query(err.to_string()))?;
    Ok(Employee::new(id, fields.clone()))
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn insert(&self, draft: &EmployeeDraft) -> Result<EmployeeId, EmployeePersistenceError> {
        let oid = ObjectId::new();
        self.lock()?.push((oid, draft.fields()));
        EmployeeId::new(oid.to_hex()).map_err(|err| EmployeePersistenceError::query(err.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Employee>, EmployeePersistenceError> {
        self.lock()?
            .iter()
            .map(|(oid, fields)| to_employee(oid, fields))
            .collect()
    }

    async fn find_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeePersistenceError> {
        let oid = parse_object_id(id)?;
        self.lock()?
            .iter()
            .find(|(stored, _)| *stored == oid)
            .map(|(stored, fields)| to_employee(stored, fields))
            .transpose()
    }

    async fn update_by_id(
        &self,
        id: &EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, EmployeePersistenceError> {
        let oid = parse_object_id(id)?;
        let mut records = self.lock()?;
        let Some((_, fields)) = records.iter_mut().find(|(stored, _)| *stored == oid) else {
            return Ok(false);
        };
        for (key, value) in changes.fields() {
            fields.insert(key.clone(), value.clone());
        }
        Ok(true)
    }

    async fn delete_by_id(&self, id: &EmployeeId) -> Result<bool, EmployeePersistenceError> {
        let oid = parse_object_id(id)?;
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|(stored, _)| *stored != oid);
        Ok(records.len() < before)
    }
}

/// HTTP state over a fresh in-memory repository, returned alongside it so
/// tests can inspect what was persisted.
pub fn in_memory_http_state() -> (web::Data<HttpState>, InMemoryEmployeeRepository) {
    let repository = InMemoryEmployeeRepository::default();
    let service = EmployeeService::new(
        Arc::new(repository.clone()),
        Arc::new(FixedClock::on(2024, 5, 17)),
    );
    (web::Data::new(HttpState::new(service)), repository)
}

/// HTTP state whose storage was never connected.
pub fn disconnected_http_state() -> web::Data<HttpState> {
    let service = EmployeeService::new(
        Arc::new(DisconnectedEmployeeRepository),
        Arc::new(FixedClock::on(2024, 5, 17)),
    );
    web::Data::new(HttpState::new(service))
}
