//! MongoDB client bootstrap.
//!
//! Builds a single driver client from the configured URI and verifies it with
//! a `ping` before handing out collection-backed repositories. The driver
//! pools connections internally, so one [`MongoStore`] is shared for the
//! process lifetime.

use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::info;

use super::mongo_employee_repository::MongoEmployeeRepository;

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "employee_management";

/// Collection holding employee documents.
pub const EMPLOYEES_COLLECTION: &str = "employees";

/// Errors raised while establishing the document store connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The URI could not be parsed or the client could not be built.
    #[error("failed to build MongoDB client: {message}")]
    Build { message: String },

    /// The server did not answer the startup ping.
    #[error("MongoDB ping failed: {message}")]
    Ping { message: String },
}

impl StoreError {
    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create a ping error with the given message.
    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }
}

/// Connection settings for the document store.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new("mongodb://localhost:27017").with_database("staff");
/// let store = MongoStore::connect(&config).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database: String,
}

impl StoreConfig {
    /// Create a configuration for `uri` using [`DEFAULT_DATABASE`].
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_owned(),
        }
    }

    /// Select the database holding the employee collection.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Live handle to the configured MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to MongoDB and confirm the server answers a `ping`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Build`] for unusable connection strings and
    /// [`StoreError::Ping`] when the server cannot be reached.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.uri())
            .await
            .map_err(|err| StoreError::build(err.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| StoreError::ping(err.to_string()))?;

        info!(database = config.database(), "connected to MongoDB");
        Ok(Self {
            database: client.database(config.database()),
        })
    }

    /// Repository over the employee collection.
    pub fn employees(&self) -> MongoEmployeeRepository {
        MongoEmployeeRepository::new(self.database.collection(EMPLOYEES_COLLECTION))
    }
}
