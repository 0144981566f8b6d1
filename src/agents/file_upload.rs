// Ingest pipeline: validate, persist the raw bytes, decode, clean, record the shape.

use tracing::{info, warn};

use crate::models::{AppState, NewUploadedFile, UploadedFile};
use crate::storage::StorageError;
use crate::tabular::{Cell, Table, TableError, TableFormat};
use crate::types::{AppError, AppResult};

pub struct FileUploadAgent;

impl FileUploadAgent {
    /// Ingest one uploaded spreadsheet and return the created record.
    ///
    /// The blob is written before decoding, so a decode failure leaves the
    /// (possibly overwritten) blob in place without a record.
    pub async fn process_file(
        state: &AppState,
        filename: &str,
        content: &[u8],
    ) -> AppResult<UploadedFile> {
        let format = TableFormat::from_filename(filename).ok_or_else(|| {
            AppError::UnsupportedFormat {
                filename: filename.to_string(),
            }
        })?;

        state
            .blobs
            .write(filename, content)
            .await
            .map_err(|e| match e {
                StorageError::InvalidKey(_) => AppError::InvalidRequest(e.to_string()),
                other => AppError::Internal(format!("Failed to store upload: {}", other)),
            })?;

        let table = Self::clean(format, content).map_err(|e| {
            warn!(filename, error = %e, "Uploaded file could not be decoded");
            AppError::IngestFailure(e.to_string())
        })?;
        let (rows, cols) = table.shape();

        let record = state
            .records
            .create_uploaded_file(NewUploadedFile {
                filename: filename.to_string(),
                rows: rows as i64,
                cols: cols as i64,
            })
            .await?;

        info!(
            file_id = record.id,
            filename = %record.filename,
            rows = record.rows,
            cols = record.cols,
            "File ingested"
        );

        Ok(record)
    }

    /// Decode, drop exact duplicate rows, then fill missing cells with 0.
    pub fn clean(format: TableFormat, content: &[u8]) -> Result<Table, TableError> {
        Ok(Table::parse(format, content)?
            .drop_duplicates()
            .fill_missing(Cell::Int(0)))
    }
}
