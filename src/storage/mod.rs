// Blob storage for uploaded payloads.
// Keys live in the fixed `uploads` namespace; writes overwrite unconditionally.

use async_trait::async_trait;
use thiserror::Error;

pub mod local;

pub use local::LocalBlobStore;

/// Namespace every uploaded blob is stored under.
pub const UPLOAD_NAMESPACE: &str = "uploads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No such file: {0}")]
    NotFound(String),

    #[error("Invalid blob key: {0:?}")]
    InvalidKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn write(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError>;
}

/// A key must be a single, non-empty path component.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if invalid {
        Err(StorageError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}
