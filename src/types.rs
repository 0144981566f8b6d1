// Type definitions shared across the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LLMMessage {
    pub role: String, // "user", "assistant", "system"
    pub content: String,
}

impl LLMMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Failure kinds surfaced by the ingest and insight pipelines.
///
/// Messages for client-facing input errors are written for the service's
/// Indonesian-speaking audience; provider messages pass through untouched.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Format file tidak didukung")]
    UnsupportedFormat { filename: String },

    #[error("{0}")]
    IngestFailure(String),

    #[error("File tidak ditemukan")]
    RecordNotFound(i64),

    #[error("Gagal membaca file: {0}")]
    SourceUnavailable(String),

    #[error("{0}")]
    GenerationFailure(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFormat { .. } => StatusCode::BAD_REQUEST,
            AppError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::GenerationFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::IngestFailure(_)
            | AppError::SourceUnavailable(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                "Internal Server Error".to_string()
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                "Internal Server Error".to_string()
            }
            other => {
                if status.is_server_error() {
                    error!(status = %status, "{}", other);
                }
                other.to_string()
            }
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
