//! Postgres-backed document collection.
//!
//! Documents live in one JSONB table. Partial updates use the `||`
//! concatenation operator, a shallow key merge, which is exactly the
//! partial-update semantics the store facade promises.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;

use super::collection::{new_document_id, JobCollection, RawJob};
use super::error::StoreError;

/// Document collection stored in the `job_documents` table.
#[derive(Clone)]
pub struct PgCollection {
    pool: PgPool,
}

impl PgCollection {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobCollection for PgCollection {
    async fn list_all(&self) -> Result<Vec<RawJob>, StoreError> {
        let rows =
            sqlx::query_as::<_, (String, Value)>("SELECT id, doc FROM job_documents ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, fields)| RawJob { id, fields })
            .collect())
    }

    async fn find(&self, id: &str) -> Result<Option<RawJob>, StoreError> {
        let row =
            sqlx::query_as::<_, (String, Value)>("SELECT id, doc FROM job_documents WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, fields)| RawJob { id, fields }))
    }

    async fn insert(&self, fields: Map<String, Value>) -> Result<String, StoreError> {
        let id = new_document_id();

        sqlx::query("INSERT INTO job_documents (id, doc) VALUES ($1, $2)")
            .bind(&id)
            .bind(Value::Object(fields))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn merge(&self, id: &str, patch: Map<String, Value>) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE job_documents SET doc = doc || $2 WHERE id = $1")
            .bind(id)
            .bind(Value::Object(patch))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_where_eq(&self, field: &str, value: &str) -> Result<Vec<RawJob>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT id, doc FROM job_documents WHERE doc ->> $1 = $2 ORDER BY id",
        )
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, fields)| RawJob { id, fields })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
