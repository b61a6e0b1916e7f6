use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::{CandidateRecord, SavedEntry};
use crate::store::{RecordStore, StoreError, LIST_LIMIT};

#[derive(Debug, FromRow)]
struct SavedResumeRow {
    id: Uuid,
    owner_email: String,
    record: Json<CandidateRecord>,
    generated_text: String,
    created_at: DateTime<Utc>,
}

impl From<SavedResumeRow> for SavedEntry {
    fn from(row: SavedResumeRow) -> Self {
        SavedEntry {
            id: row.id,
            owner_email: row.owner_email,
            record: row.record.0,
            generated_text: row.generated_text,
            created_at: row.created_at,
        }
    }
}

/// `saved_resumes` table. The schema is created by `db::ensure_schema`.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn save(
        &self,
        owner_email: &str,
        record: &CandidateRecord,
        generated_text: &str,
    ) -> Result<Uuid, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO saved_resumes (id, owner_email, record, generated_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_email)
        .bind(Json(record))
        .bind(generated_text)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved resume {id} for {owner_email}");
        Ok(id)
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<SavedEntry>, StoreError> {
        let rows = sqlx::query_as::<_, SavedResumeRow>(
            r#"
            SELECT id, owner_email, record, generated_text, created_at
            FROM saved_resumes
            WHERE owner_email = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_email)
        .bind(LIST_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SavedEntry::from).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM saved_resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        info!("Deleted resume {id} ({} rows)", result.rows_affected());
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<SavedEntry>, StoreError> {
        let row = sqlx::query_as::<_, SavedResumeRow>(
            "SELECT id, owner_email, record, generated_text, created_at FROM saved_resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SavedEntry::from))
    }
}
