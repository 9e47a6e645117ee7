//! MongoDB-backed `EmployeeRepository` implementation.
//!
//! Translates domain records to BSON documents and back. Identifiers are
//! MongoDB `ObjectId`s, exposed to the domain as their hex string.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::ports::{EmployeePersistenceError, EmployeeRepository};
use crate::domain::{Employee, EmployeeChanges, EmployeeDraft, EmployeeId, ID_FIELD};

/// MongoDB implementation of the `EmployeeRepository` port.
#[derive(Clone, Debug)]
pub struct MongoEmployeeRepository {
    collection: Collection<Document>,
}

impl MongoEmployeeRepository {
    /// Create a repository over the given collection.
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

/// Map driver errors to domain persistence errors, keeping the raw message.
fn map_driver_error(error: mongodb::error::Error, operation: &str) -> EmployeePersistenceError {
    let message = error.to_string();
    debug!(%message, %operation, "mongodb operation failed");
    EmployeePersistenceError::query(message)
}

/// Parse an identifier into an `ObjectId`, rejecting malformed strings.
pub(crate) fn parse_object_id(id: &EmployeeId) -> Result<ObjectId, EmployeePersistenceError> {
    ObjectId::parse_str(id.as_str()).map_err(|_| {
        EmployeePersistenceError::invalid_identifier(format!(
            "'{id}' is not a valid ObjectId, it must be a 12-byte input or a 24-character hex string"
        ))
    })
}

/// Convert JSON attributes into a BSON document.
pub(crate) fn fields_to_document(
    fields: &Map<String, Value>,
) -> Result<Document, EmployeePersistenceError> {
    bson::to_document(fields).map_err(|err| EmployeePersistenceError::query(err.to_string()))
}

/// Render a stored `_id` as the plain string clients see.
fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Convert a stored document into a domain record.
///
/// Returns `Ok(None)` for an absent document.
pub(crate) fn document_to_employee(
    document: Option<Document>,
) -> Result<Option<Employee>, EmployeePersistenceError> {
    let Some(mut document) = document else {
        return Ok(None);
    };
    let raw_id = document
        .remove(ID_FIELD)
        .ok_or_else(|| EmployeePersistenceError::query("stored employee has no _id"))?;
    let id = EmployeeId::new(id_to_string(&raw_id))
        .map_err(|err| EmployeePersistenceError::query(err.to_string()))?;

    let fields = match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    Ok(Some(Employee::new(id, fields)))
}

#[async_trait]
impl EmployeeRepository for MongoEmployeeRepository {
    async fn insert(&self, draft: &EmployeeDraft) -> Result<EmployeeId, EmployeePersistenceError> {
        let document = fields_to_document(&draft.fields())?;
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|err| map_driver_error(err, "insert_one"))?;
        EmployeeId::new(id_to_string(&result.inserted_id))
            .map_err(|err| EmployeePersistenceError::query(err.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Employee>, EmployeePersistenceError> {
        let documents: Vec<Document> = self
            .collection
            .find(doc! {})
            .await
            .map_err(|err| map_driver_error(err, "find"))?
            .try_collect()
            .await
            .map_err(|err| map_driver_error(err, "find"))?;

        documents
            .into_iter()
            .filter_map(|document| document_to_employee(Some(document)).transpose())
            .collect()
    }

    async fn find_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeePersistenceError> {
        let oid = parse_object_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_driver_error(err, "find_one"))?;
        document_to_employee(document)
    }

    async fn update_by_id(
        &self,
        id: &EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, EmployeePersistenceError> {
        let oid = parse_object_id(id)?;
        // MongoDB rejects an empty `$set`; an empty update only needs a match.
        if changes.is_empty() {
            let existing = self
                .collection
                .find_one(doc! { "_id": oid })
                .await
                .map_err(|err| map_driver_error(err, "find_one"))?;
            return Ok(existing.is_some());
        }

        let set = fields_to_document(changes.fields())?;
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await
            .map_err(|err| map_driver_error(err, "update_one"))?;
        Ok(result.matched_count > 0)
    }

    async fn delete_by_id(&self, id: &EmployeeId) -> Result<bool, EmployeePersistenceError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|err| map_driver_error(err, "delete_one"))?;
        Ok(result.deleted_count > 0)
    }
}
