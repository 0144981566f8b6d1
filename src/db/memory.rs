use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{RecordStore, StoreBackend};
use crate::models::{Insight, NewInsight, NewUploadedFile, UploadedFile};
use crate::types::AppResult;

/// In-process record store for development and tests. Ids start at 1.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    files: BTreeMap<i64, UploadedFile>,
    insights: Vec<Insight>,
    last_file_id: i64,
    last_insight_id: i64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn insights(&self) -> Vec<Insight> {
        self.inner.read().await.insights.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create_uploaded_file(&self, new_file: NewUploadedFile) -> AppResult<UploadedFile> {
        let mut guard = self.inner.write().await;
        guard.last_file_id += 1;
        let record = UploadedFile {
            id: guard.last_file_id,
            filename: new_file.filename,
            uploaded_at: Utc::now(),
            rows: new_file.rows,
            cols: new_file.cols,
        };
        guard.files.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_uploaded_file(&self, id: i64) -> AppResult<Option<UploadedFile>> {
        let guard = self.inner.read().await;
        Ok(guard.files.get(&id).cloned())
    }

    async fn create_insight(&self, new_insight: NewInsight) -> AppResult<Insight> {
        let mut guard = self.inner.write().await;
        guard.last_insight_id += 1;
        let insight = Insight {
            id: guard.last_insight_id,
            file_id: new_insight.file_id,
            content: new_insight.content,
        };
        guard.insights.push(insight.clone());
        Ok(insight)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }
}
