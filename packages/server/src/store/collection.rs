//! The backing-collection contract.
//!
//! A job collection is a document store addressable by opaque string id,
//! supporting list-all, get-by-id, insert-returning-id, partial-update-by-id,
//! delete-by-id, and an equality-filtered list. The store facade depends only
//! on this capability set, not on any specific product, so swapping the
//! hosted backend means writing one more implementation of this trait.

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::StoreError;

/// One raw document as the collection returns it: the assigned id plus the
/// stored fields, before any normalization.
#[derive(Debug, Clone)]
pub struct RawJob {
    pub id: String,
    pub fields: Value,
}

impl RawJob {
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        RawJob {
            id: id.into(),
            fields,
        }
    }
}

/// Mint a new document id.
///
/// V7 UUIDs in simple form: opaque to callers, lexically time-ordered, so
/// listing by id is listing in insertion order.
pub fn new_document_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Capability contract for the backing job collection.
///
/// Implementations surface connectivity failures as
/// [`StoreError::Unavailable`]; "no such document" is expressed through
/// `Option`/`bool` return values and turned into [`StoreError::NotFound`]
/// by the store facade, which owns that policy.
#[async_trait]
pub trait JobCollection: Send + Sync {
    /// Every document in the collection, in ascending id order.
    async fn list_all(&self) -> Result<Vec<RawJob>, StoreError>;

    /// One document by id, or `None` when no such id exists.
    async fn find(&self, id: &str) -> Result<Option<RawJob>, StoreError>;

    /// Insert a new document; the collection assigns and returns the id.
    async fn insert(&self, fields: Map<String, Value>) -> Result<String, StoreError>;

    /// Merge `patch` into an existing document, key by key; fields absent
    /// from `patch` are left untouched. Returns `false` when no such id
    /// exists.
    async fn merge(&self, id: &str, patch: Map<String, Value>) -> Result<bool, StoreError>;

    /// Delete a document. Returns `false` when no such id exists.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Documents whose top-level `field` equals `value` exactly, in
    /// ascending id order.
    async fn list_where_eq(&self, field: &str, value: &str) -> Result<Vec<RawJob>, StoreError>;

    /// Cheap reachability probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
