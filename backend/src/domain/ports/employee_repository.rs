//! Port abstraction for employee persistence adapters and their errors.
//!
//! Every call is a single-document operation; adapters make no cross-document
//! guarantees.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeChanges, EmployeeDraft, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by employee repository adapters.
    pub enum EmployeePersistenceError {
        /// No connection to the document store was established at startup.
        Unavailable { message: String } => "employee storage unavailable: {message}",
        /// The identifier is not well formed for the storage backend.
        InvalidIdentifier { message: String } => "{message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "{message}",
    }
}

/// Document collection holding employee records.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Whether a live connection backs this repository.
    fn is_connected(&self) -> bool {
        true
    }

    /// Persist a new record and return its assigned identifier.
    async fn insert(&self, draft: &EmployeeDraft) -> Result<EmployeeId, EmployeePersistenceError>;

    /// Return every stored record in storage-native order.
    async fn find_all(&self) -> Result<Vec<Employee>, EmployeePersistenceError>;

    /// Fetch one record; `Ok(None)` when the identifier matches nothing.
    async fn find_by_id(&self, id: &EmployeeId)
    -> Result<Option<Employee>, EmployeePersistenceError>;

    /// Merge `changes` into the matching record. Returns whether a record
    /// matched, even if nothing changed.
    async fn update_by_id(
        &self,
        id: &EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, EmployeePersistenceError>;

    /// Remove the matching record. Returns whether one was deleted.
    async fn delete_by_id(&self, id: &EmployeeId) -> Result<bool, EmployeePersistenceError>;
}

/// Repository used when the document store could not be reached at startup.
///
/// Every operation fails with [`EmployeePersistenceError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedEmployeeRepository;

const DISCONNECTED: &str = "no database connection was established";

#[async_trait]
impl EmployeeRepository for DisconnectedEmployeeRepository {
    fn is_connected(&self) -> bool {
        false
    }

    async fn insert(&self, _draft: &EmployeeDraft) -> Result<EmployeeId, EmployeePersistenceError> {
        Err(EmployeePersistenceError::unavailable(DISCONNECTED))
    }

    async fn find_all(&self) -> Result<Vec<Employee>, EmployeePersistenceError> {
        Err(EmployeePersistenceError::unavailable(DISCONNECTED))
    }

    async fn find_by_id(
        &self,
        _id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeePersistenceError> {
        Err(EmployeePersistenceError::unavailable(DISCONNECTED))
    }

    async fn update_by_id(
        &self,
        _id: &EmployeeId,
        _changes: &EmployeeChanges,
    ) -> Result<bool, EmployeePersistenceError> {
        Err(EmployeePersistenceError::unavailable(DISCONNECTED))
    }

    async fn delete_by_id(&self, _id: &EmployeeId) -> Result<bool, EmployeePersistenceError> {
        Err(EmployeePersistenceError::unavailable(DISCONNECTED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn disconnected_repository_rejects_every_operation() {
        let repo = DisconnectedEmployeeRepository;
        let id = EmployeeId::new("65f1c0ffee0000000000beef").expect("valid id");

        assert!(matches!(
            repo.find_all().await,
            Err(EmployeePersistenceError::Unavailable { .. })
        ));
        assert!(matches!(
            repo.find_by_id(&id).await,
            Err(EmployeePersistenceError::Unavailable { .. })
        ));
        assert!(matches!(
            repo.update_by_id(&id, &EmployeeChanges::default()).await,
            Err(EmployeePersistenceError::Unavailable { .. })
        ));
        assert!(matches!(
            repo.delete_by_id(&id).await,
            Err(EmployeePersistenceError::Unavailable { .. })
        ));
    }

    #[rstest]
    fn invalid_identifier_displays_raw_message() {
        let err = EmployeePersistenceError::invalid_identifier("'abc' is not a valid ObjectId");
        assert_eq!(err.to_string(), "'abc' is not a valid ObjectId");
    }
}
