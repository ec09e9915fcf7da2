use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Collection, Document, DocumentData, DocumentStore, StoreError};

/// Postgres-backed document store. Every collection shares the `documents`
/// table; the document body is a JSONB column.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn read_err(e: sqlx::Error) -> StoreError {
    StoreError::Read(e.to_string())
}

fn write_err(e: sqlx::Error) -> StoreError {
    StoreError::Write(e.to_string())
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        collection: Collection,
        data: DocumentData,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection.name())
            .bind(&id)
            .bind(Json(data))
            .execute(&self.pool)
            .await
            .map_err(write_err)?;

        info!("Inserted {collection}/{id}");
        Ok(id)
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        patch: DocumentData,
    ) -> Result<(), StoreError> {
        // `||` on JSONB objects replaces top-level keys and keeps the rest
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = data || $3, updated_at = now()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(patch))
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }

        info!("Updated {collection}/{id}");
        Ok(())
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(write_err)?;

        debug!(
            "Delete {collection}/{id} removed {} row(s)",
            result.rows_affected()
        );
        Ok(())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let sql = format!(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1
            ORDER BY COALESCE((data->>'order')::DOUBLE PRECISION, 0) {}, id ASC
            "#,
            collection.sort_direction().sql()
        );

        let rows: Vec<(String, Json<DocumentData>)> = sqlx::query_as(&sql)
            .bind(collection.name())
            .fetch_all(&self.pool)
            .await
            .map_err(read_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(data))| Document { id, data })
            .collect())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let row: Option<(String, Json<DocumentData>)> =
            sqlx::query_as("SELECT id, data FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection.name())
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(read_err)?;

        Ok(row.map(|(id, Json(data))| Document { id, data }))
    }
}
