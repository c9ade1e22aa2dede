/**
 * Task Store Gateway
 *
 * Thin persistence adapter for the task collection. The rest of the server
 * treats it as a black box with insert / list / merge / remove semantics;
 * the mutation service decides what a zero-rows result means.
 *
 * The production implementation keeps the opaque field set in a JSONB
 * column, so a partial update is a single field-level merge statement and
 * the identifier and creation timestamp columns are never written after
 * insert.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::tasks::model::Task;

/// Storage operations for the task collection.
///
/// Errors are the store's own; the mutation service maps them onto the API
/// error taxonomy and turns rows-affected counts into not-found results.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new task, assigning its identifier. Returns the stored task.
    async fn insert(
        &self,
        fields: &Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Result<Task, sqlx::Error>;

    /// Fetch every stored task.
    async fn list(&self) -> Result<Vec<Task>, sqlx::Error>;

    /// Merge `fields` into the task's field set. Returns rows affected;
    /// zero means the identifier did not resolve.
    async fn merge_fields(
        &self,
        id: Uuid,
        fields: &Map<String, Value>,
    ) -> Result<u64, sqlx::Error>;

    /// Remove a task. Returns rows affected.
    async fn remove(&self, id: Uuid) -> Result<u64, sqlx::Error>;
}

/// Postgres-backed task store.
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_task(row: PgRow) -> Result<Task, sqlx::Error> {
    let Json(fields): Json<Map<String, Value>> = row.try_get("fields")?;
    Ok(Task {
        id: row.try_get("id")?,
        created_at: row.try_get("created_at")?,
        fields,
    })
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(
        &self,
        fields: &Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Result<Task, sqlx::Error> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO tasks (id, fields, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(Json(fields))
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Task {
            id,
            created_at,
            fields: fields.clone(),
        })
    }

    async fn list(&self) -> Result<Vec<Task>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, fields, created_at
            FROM tasks
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn merge_fields(
        &self,
        id: Uuid,
        fields: &Map<String, Value>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET fields = fields || $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn remove(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
