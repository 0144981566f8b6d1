use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::info;

use crate::agents::FileUploadAgent;
use crate::models::{AppState, UploadResponse, UploadedFile};
use crate::types::{AppError, AppResult};

/// Multipart field carrying the spreadsheet.
const FILE_FIELD: &str = "file";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/upload/", post(upload_file))
        .route("/files/{file_id}", get(get_file))
        .with_state(state)
}

async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidRequest("Field 'file' has no file name".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::InvalidRequest("Field 'file' is required".to_string()))?;
    info!(filename = %filename, size = data.len(), "File upload request received");

    let record = FileUploadAgent::process_file(&state, &filename, &data).await?;
    Ok(Json(UploadResponse::from(record)))
}

async fn get_file(
    State(state): State<AppState>,
    Path(file_id): Path<i64>,
) -> AppResult<Json<UploadedFile>> {
    let record = state
        .records
        .get_uploaded_file(file_id)
        .await?
        .ok_or(AppError::RecordNotFound(file_id))?;
    Ok(Json(record))
}
