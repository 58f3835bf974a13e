//! Data access for job postings.
//!
//! `JobStore` is the only path between handlers and the backing collection.
//! Every read is normalized through [`JobPosting::from_document`] before it
//! leaves this module, and every write stamps its own timestamps, so callers
//! never see a partial record or pick a clock themselves.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::store::{JobCollection, StoreError};

use super::models::job::{JobDraft, JobPatch, JobPosting};

/// Acknowledgement returned by [`JobStore::create`].
#[derive(Debug, Clone, Serialize)]
pub struct CreatedJob {
    pub id: String,
}

/// Facade over the document collection holding job postings.
#[derive(Clone)]
pub struct JobStore {
    collection: Arc<dyn JobCollection>,
}

impl JobStore {
    pub fn new(collection: Arc<dyn JobCollection>) -> Self {
        Self { collection }
    }

    /// Every posting on the board, in stored order, normalized.
    pub async fn list_all(&self) -> Result<Vec<JobPosting>, StoreError> {
        let raw = self.collection.list_all().await?;
        Ok(raw
            .into_iter()
            .map(|doc| JobPosting::from_document(doc.id, &doc.fields))
            .collect())
    }

    /// One posting by id, or `NotFound`.
    pub async fn get(&self, id: &str) -> Result<JobPosting, StoreError> {
        match self.collection.find(id).await? {
            Some(doc) => Ok(JobPosting::from_document(doc.id, &doc.fields)),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Insert a new posting. The collection assigns the id; `createdAt` and
    /// `updatedAt` are stamped here with the same instant.
    pub async fn create(&self, draft: &JobDraft) -> Result<CreatedJob, StoreError> {
        let mut doc = draft.to_document();
        let now = Value::String(Utc::now().to_rfc3339());
        doc.insert("createdAt".to_string(), now.clone());
        doc.insert("updatedAt".to_string(), now);

        let id = self.collection.insert(doc).await?;
        Ok(CreatedJob { id })
    }

    /// Merge `patch` into an existing posting. Fields absent from the patch
    /// are left untouched; `updatedAt` is refreshed with every merge. A patch
    /// carrying no recognized fields is rejected rather than stamping
    /// `updatedAt` alone.
    pub async fn update(&self, id: &str, patch: &JobPatch) -> Result<(), StoreError> {
        if patch.is_empty() {
            return Err(StoreError::InvalidArgument(
                "patch has no fields".to_string(),
            ));
        }

        let mut doc = patch.to_document();
        doc.insert(
            "updatedAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        if self.collection.merge(id, doc).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    /// All postings created by one account, same normalization as `list_all`.
    pub async fn list_posted_by(&self, email: &str) -> Result<Vec<JobPosting>, StoreError> {
        let raw = self.collection.list_where_eq("postedBy", email).await?;
        Ok(raw
            .into_iter()
            .map(|doc| JobPosting::from_document(doc.id, &doc.fields))
            .collect())
    }

    /// Delete a posting by id.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        if id.is_empty() {
            return Err(StoreError::InvalidArgument("job id is required".to_string()));
        }
        if self.collection.remove(id).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    /// Round trip to the backing collection, for health checks.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.collection.ping().await
    }
}
