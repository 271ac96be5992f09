//! Storage seam for record documents.
//!
//! Handlers only see `dyn DocumentStore`; `MongoStore` backs production and
//! `MemoryStore` backs tests and database-less runs.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use service_core::error::AppError;
use thiserror::Error;

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MIN_LIST_LIMIT: i64 = 1;
pub const MAX_LIST_LIMIT: i64 = 200;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("database not initialized")]
    NotInitialized,

    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    #[error("failed to encode document: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidIdentifier(id) => {
                AppError::BadRequest(anyhow::anyhow!("Invalid identifier: {}", id))
            }
            StoreError::NotInitialized => {
                AppError::DatabaseError(anyhow::anyhow!("database not initialized"))
            }
            StoreError::Database(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            StoreError::Serialization(e) => AppError::InternalError(anyhow::Error::new(e)),
        }
    }
}

/// Whether the store holds a usable connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection settings were provided.
    Uninitialized,
    Connected,
    /// Settings were provided but the client could not be built.
    Failed(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `document` into the `kind` collection and return its encoded id.
    async fn insert(&self, kind: &str, document: Document) -> Result<String, StoreError>;

    /// Up to `limit` documents matching `filter`, in natural order.
    async fn list(
        &self,
        kind: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    /// `Ok(None)` when no document has this id.
    async fn find_by_id(&self, kind: &str, id: ObjectId)
        -> Result<Option<Document>, StoreError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;

    fn connection_state(&self) -> ConnectionState;

    /// Release the underlying connection. Called once at process exit.
    async fn shutdown(&self);
}

/// Clamp a caller-supplied list limit into `[1, 200]`, defaulting to 50.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    requested
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(MIN_LIST_LIMIT, MAX_LIST_LIMIT)
}

pub(crate) fn record_operation(operation: &'static str, succeeded: bool) {
    let outcome = if succeeded { "ok" } else { "error" };
    metrics::counter!(
        "store_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
