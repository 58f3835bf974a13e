//! In-memory document collection.
//!
//! A `BTreeMap` keyed by document id gives the same ascending-id listing
//! order as the Postgres table. Backs the test suite and `STORE=memory`
//! runs where no database is available.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::collection::{new_document_id, JobCollection, RawJob};
use super::error::StoreError;

/// Process-local document collection.
#[derive(Default)]
pub struct MemoryCollection {
    docs: RwLock<BTreeMap<String, Value>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under a caller-chosen id (fixture convenience).
    pub fn insert_with_id(&self, id: impl Into<String>, fields: Value) {
        self.docs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.into(), fields);
    }

    pub fn len(&self) -> usize {
        self.docs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl JobCollection for MemoryCollection {
    async fn list_all(&self) -> Result<Vec<RawJob>, StoreError> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs
            .iter()
            .map(|(id, fields)| RawJob::new(id.clone(), fields.clone()))
            .collect())
    }

    async fn find(&self, id: &str) -> Result<Option<RawJob>, StoreError> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs.get(id).map(|fields| RawJob::new(id, fields.clone())))
    }

    async fn insert(&self, fields: Map<String, Value>) -> Result<String, StoreError> {
        let id = new_document_id();
        self.docs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.clone(), Value::Object(fields));
        Ok(id)
    }

    async fn merge(&self, id: &str, patch: Map<String, Value>) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        match docs.get_mut(id) {
            Some(Value::Object(existing)) => {
                for (key, value) in patch {
                    existing.insert(key, value);
                }
                Ok(true)
            }
            Some(other) => {
                *other = Value::Object(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .docs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some())
    }

    async fn list_where_eq(&self, field: &str, value: &str) -> Result<Vec<RawJob>, StoreError> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs
            .iter()
            .filter(|(_, fields)| fields.get(field).and_then(Value::as_str) == Some(value))
            .map(|(id, fields)| RawJob::new(id.clone(), fields.clone()))
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_lists_in_insertion_order() {
        let collection = MemoryCollection::new();
        let first = collection.insert(obj(json!({"n": 1}))).await.unwrap();
        let second = collection.insert(obj(json!({"n": 2}))).await.unwrap();
        let third = collection.insert(obj(json!({"n": 3}))).await.unwrap();

        let ids: Vec<String> = collection
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|raw| raw.id)
            .collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[tokio::test]
    async fn test_merge_leaves_absent_fields_untouched() {
        let collection = MemoryCollection::new();
        let id = collection
            .insert(obj(json!({"jobTitle": "Dev", "companyName": "Acme"})))
            .await
            .unwrap();

        let merged = collection
            .merge(&id, obj(json!({"jobTitle": "Senior Dev"})))
            .await
            .unwrap();
        assert!(merged);

        let doc = collection.find(&id).await.unwrap().unwrap();
        assert_eq!(doc.fields["jobTitle"], "Senior Dev");
        assert_eq!(doc.fields["companyName"], "Acme");
    }

    #[tokio::test]
    async fn test_merge_and_remove_report_missing_ids() {
        let collection = MemoryCollection::new();
        assert!(!collection.merge("nope", Map::new()).await.unwrap());
        assert!(!collection.remove("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_where_eq_filters_on_string_equality() {
        let collection = MemoryCollection::new();
        collection
            .insert(obj(json!({"postedBy": "a@example.com"})))
            .await
            .unwrap();
        collection
            .insert(obj(json!({"postedBy": "b@example.com"})))
            .await
            .unwrap();
        collection
            .insert(obj(json!({"postedBy": "a@example.com"})))
            .await
            .unwrap();

        let mine = collection
            .list_where_eq("postedBy", "a@example.com")
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine
            .iter()
            .all(|raw| raw.fields["postedBy"] == "a@example.com"));
    }
}
