use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::identifier;
use super::store::{record_operation, ConnectionState, DocumentStore, StoreError};

/// In-process store keeping each collection as an insertion-ordered vector.
///
/// Filters match on top-level field equality only.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, kind: &str, mut document: Document) -> Result<String, StoreError> {
        let id = match document.get("_id") {
            Some(existing) => existing.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        self.collections
            .write()
            .await
            .entry(kind.to_string())
            .or_default()
            .push(document);
        record_operation("insert", true);

        Ok(identifier::encode_bson(&id))
    }

    async fn list(
        &self,
        kind: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let collections = self.collections.read().await;
        let documents = collections
            .get(kind)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        record_operation("list", true);

        Ok(documents)
    }

    async fn find_by_id(
        &self,
        kind: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        let found = collections.get(kind).and_then(|docs| {
            docs.iter()
                .find(|doc| doc.get_object_id("_id").ok() == Some(id))
                .cloned()
        });
        record_operation("find_by_id", true);

        Ok(found)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        record_operation("list_collection_names", true);

        Ok(names)
    }

    fn connection_state(&self) -> ConnectionState {
        ConnectionState::Connected
    }

    async fn shutdown(&self) {}
}
