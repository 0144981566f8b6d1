// Record store for upload metadata and generated insights

use async_trait::async_trait;

use crate::models::{Insight, NewInsight, NewUploadedFile, UploadedFile};
use crate::types::AppResult;

pub mod memory;
pub mod operations;
pub mod pool;

pub use memory::MemoryRecordStore;
pub use operations::PgRecordStore;
pub use pool::*;

/// Which kind of store is serving records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record; the store assigns `id` and `uploaded_at`.
    async fn create_uploaded_file(&self, new_file: NewUploadedFile) -> AppResult<UploadedFile>;

    async fn get_uploaded_file(&self, id: i64) -> AppResult<Option<UploadedFile>>;

    async fn create_insight(&self, new_insight: NewInsight) -> AppResult<Insight>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> AppResult<()>;

    fn backend(&self) -> StoreBackend;
}
