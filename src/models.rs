use std::sync::Arc;

use crate::config::Config;
use crate::db::RecordStore;
use crate::llm::LLM;
use crate::storage::BlobStore;

/// Process-wide collaborators, built once at start-up and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub records: Arc<dyn RecordStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub llm: Arc<LLM>,
}

impl AppState {
    pub fn new(
        config: Config,
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        llm: Arc<LLM>,
    ) -> Self {
        Self {
            config,
            records,
            blobs,
            llm,
        }
    }
}

// Note: FromRow is needed for runtime query_as (without DATABASE_URL at compile time)

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct UploadedFile {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub rows: i64,
    pub cols: i64,
}

#[derive(Debug, Clone)]
pub struct NewUploadedFile {
    pub filename: String,
    pub rows: i64,
    pub cols: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Insight {
    pub id: i64,
    pub file_id: i64,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewInsight {
    pub file_id: i64,
    pub content: String,
}

// API Request/Response types

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UploadResponse {
    pub id: i64,
    pub filename: String,
    pub rows: i64,
    pub cols: i64,
}

impl From<UploadedFile> for UploadResponse {
    fn from(record: UploadedFile) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            rows: record.rows,
            cols: record.cols,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct InsightResponse {
    pub insight: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}
