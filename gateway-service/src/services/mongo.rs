use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Client as MongoClient, Database,
};

use super::identifier;
use super::store::{record_operation, ConnectionState, DocumentStore, StoreError};

#[derive(Clone)]
enum Connection {
    Uninitialized,
    Connected { client: MongoClient, db: Database },
    Failed(String),
}

/// MongoDB-backed store. One collection per record kind.
#[derive(Clone)]
pub struct MongoStore {
    connection: Connection,
}

impl MongoStore {
    /// Build the client for `url`.
    ///
    /// Never fails: a missing URL leaves the store uninitialized and a client
    /// that cannot be built leaves it failed. Both states surface through the
    /// health report and as `StoreError::NotInitialized` on every operation.
    pub async fn connect(url: Option<&str>, database: &str) -> Self {
        let Some(uri) = url else {
            tracing::warn!("DATABASE_URL not set; MongoDB store left uninitialized");
            return Self {
                connection: Connection::Uninitialized,
            };
        };

        tracing::info!(database = %database, "Connecting to MongoDB");
        match MongoClient::with_uri_str(uri).await {
            Ok(client) => {
                tracing::info!(database = %database, "MongoDB client ready");
                Self::from_client(client, database)
            }
            Err(e) => {
                tracing::error!(database = %database, "Failed to connect to MongoDB: {}", e);
                Self {
                    connection: Connection::Failed(e.to_string()),
                }
            }
        }
    }

    pub fn from_client(client: MongoClient, database: &str) -> Self {
        let db = client.database(database);
        Self {
            connection: Connection::Connected { client, db },
        }
    }

    fn database(&self) -> Result<&Database, StoreError> {
        match &self.connection {
            Connection::Connected { db, .. } => Ok(db),
            _ => Err(StoreError::NotInitialized),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, kind: &str, document: Document) -> Result<String, StoreError> {
        let result = self
            .database()?
            .collection::<Document>(kind)
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %kind, "Failed to insert document: {}", e);
                StoreError::from(e)
            });
        record_operation("insert", result.is_ok());

        Ok(identifier::encode_bson(&result?.inserted_id))
    }

    async fn list(
        &self,
        kind: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let options = FindOptions::builder().limit(limit).build();

        let result = async {
            let cursor = self
                .database()?
                .collection::<Document>(kind)
                .find(filter, options)
                .await?;
            let documents: Vec<Document> = cursor.try_collect().await?;
            Ok::<_, StoreError>(documents)
        }
        .await;

        if let Err(e) = &result {
            tracing::error!(collection = %kind, "Failed to list documents: {}", e);
        }
        record_operation("list", result.is_ok());
        result
    }

    async fn find_by_id(
        &self,
        kind: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        let result = self
            .database()?
            .collection::<Document>(kind)
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %kind, id = %id, "Failed to find document: {}", e);
                StoreError::from(e)
            });
        record_operation("find_by_id", result.is_ok());
        result
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let result = self
            .database()?
            .list_collection_names(None)
            .await
            .map_err(StoreError::from);
        record_operation("list_collection_names", result.is_ok());
        result
    }

    fn connection_state(&self) -> ConnectionState {
        match &self.connection {
            Connection::Uninitialized => ConnectionState::Uninitialized,
            Connection::Connected { .. } => ConnectionState::Connected,
            Connection::Failed(e) => ConnectionState::Failed(e.clone()),
        }
    }

    async fn shutdown(&self) {
        if let Connection::Connected { client, .. } = &self.connection {
            tracing::info!("Closing MongoDB client");
            client.clone().shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::clamp_limit;

    const TEST_URI: &str = "mongodb://localhost:27017";

    async fn test_store() -> (MongoStore, Database) {
        let db_name = format!("gateway_test_{}", ObjectId::new().to_hex());
        let client = MongoClient::with_uri_str(TEST_URI)
            .await
            .expect("Failed to build MongoDB client");
        let db = client.database(&db_name);
        (MongoStore::from_client(client, &db_name), db)
    }

    #[tokio::test]
    async fn missing_url_leaves_store_uninitialized() {
        let store = MongoStore::connect(None, "unused").await;

        assert_eq!(store.connection_state(), ConnectionState::Uninitialized);
        assert!(matches!(
            store.insert("user", doc! { "name": "Alice" }).await,
            Err(StoreError::NotInitialized)
        ));
        assert!(matches!(
            store.list("user", doc! {}, 10).await,
            Err(StoreError::NotInitialized)
        ));
        assert!(matches!(
            store.find_by_id("user", ObjectId::new()).await,
            Err(StoreError::NotInitialized)
        ));
        assert!(matches!(
            store.list_collection_names().await,
            Err(StoreError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn unparseable_url_marks_store_failed() {
        let store = MongoStore::connect(Some("definitely-not-a-uri"), "unused").await;
        assert!(matches!(store.connection_state(), ConnectionState::Failed(_)));
    }

    #[tokio::test]
    #[ignore = "Requires MongoDB at mongodb://localhost:27017"]
    async fn insert_then_find_round_trips() {
        let (store, db) = test_store().await;

        let id = store
            .insert("user", doc! { "name": "Alice", "email": "a@example.com" })
            .await
            .unwrap();
        let oid = identifier::decode(&id).unwrap();

        let found = store.find_by_id("user", oid).await.unwrap().unwrap();
        assert_eq!(found.get_object_id("_id").unwrap(), oid);
        assert_eq!(found.get_str("name").unwrap(), "Alice");

        assert!(store
            .find_by_id("user", ObjectId::new())
            .await
            .unwrap()
            .is_none());

        let _ = db.drop(None).await;
    }

    #[tokio::test]
    #[ignore = "Requires MongoDB at mongodb://localhost:27017"]
    async fn list_respects_limit_and_insertion_order() {
        let (store, db) = test_store().await;

        for i in 0..5 {
            store
                .insert("product", doc! { "title": format!("item-{}", i) })
                .await
                .unwrap();
        }

        let limited = store.list("product", doc! {}, 3).await.unwrap();
        assert_eq!(limited.len(), 3);

        let all = store
            .list("product", doc! {}, clamp_limit(None))
            .await
            .unwrap();
        let titles: Vec<_> = all.iter().map(|d| d.get_str("title").unwrap()).collect();
        assert_eq!(titles, ["item-0", "item-1", "item-2", "item-3", "item-4"]);

        let names = store.list_collection_names().await.unwrap();
        assert!(names.contains(&"product".to_string()));

        let _ = db.drop(None).await;
    }
}
