use async_trait::async_trait;
use sqlx::PgPool;

use super::{pool, RecordStore, StoreBackend};
use crate::models::{Insight, NewInsight, NewUploadedFile, UploadedFile};
use crate::types::AppResult;

/// Postgres-backed record store. Each query checks a connection out of the
/// pool and returns it when the query completes or fails.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create_uploaded_file(&self, new_file: NewUploadedFile) -> AppResult<UploadedFile> {
        let record = sqlx::query_as::<_, UploadedFile>(
            r#"
            INSERT INTO uploaded_files (filename, rows, cols)
            VALUES ($1, $2, $3)
            RETURNING id, filename, uploaded_at, rows, cols
            "#,
        )
        .bind(&new_file.filename)
        .bind(new_file.rows)
        .bind(new_file.cols)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn get_uploaded_file(&self, id: i64) -> AppResult<Option<UploadedFile>> {
        let record = sqlx::query_as::<_, UploadedFile>(
            "SELECT id, filename, uploaded_at, rows, cols FROM uploaded_files WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn create_insight(&self, new_insight: NewInsight) -> AppResult<Insight> {
        let insight = sqlx::query_as::<_, Insight>(
            r#"
            INSERT INTO insights (file_id, content)
            VALUES ($1, $2)
            RETURNING id, file_id, content
            "#,
        )
        .bind(new_insight.file_id)
        .bind(&new_insight.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(insight)
    }

    async fn ping(&self) -> AppResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Postgres
    }
}
